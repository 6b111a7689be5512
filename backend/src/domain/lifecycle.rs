//! The request lifecycle manager.
//!
//! Owns the status state machine and the inventory gate: `APPROVED` may only
//! be persisted when an availability check passes immediately before the
//! write. The availability check and the status write are separate store
//! operations, so two concurrent approvals against the same single-unit key
//! can both pass their checks; at most one `consume_one` then succeeds and
//! the losing approval is kept, not rolled back. That window is the source
//! behaviour, preserved deliberately (see DESIGN.md for the strengthening
//! option that was not taken).

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::error::Error;
use crate::domain::events::{Approved, Notification, StatusChanged, Unavailable};
use crate::domain::inventory::InventoryLedger;
use crate::domain::ports::{
    DonationRepository, EventSink, InventoryCheck, RequestLifecycle, RequestRepository,
};
use crate::domain::request::{
    DonationRequest, NewRequest, RequestFilter, RequestId, RequestStatus,
};
use crate::domain::user::UserId;

/// Lifecycle use-cases over a request store, the inventory ledger, and an
/// injected notification sink.
#[derive(Clone)]
pub struct LifecycleManager<R, D, E> {
    requests: Arc<R>,
    ledger: InventoryLedger<D>,
    sink: Arc<E>,
}

impl<R, D, E> LifecycleManager<R, D, E> {
    /// Wire the manager to its stores and notification sink.
    pub fn new(requests: Arc<R>, donations: Arc<D>, sink: Arc<E>) -> Self {
        Self {
            requests,
            ledger: InventoryLedger::new(donations),
            sink,
        }
    }
}

impl<R, D, E> LifecycleManager<R, D, E>
where
    R: RequestRepository,
    D: DonationRepository,
    E: EventSink,
{
    async fn load(&self, id: &RequestId) -> Result<DonationRequest, Error> {
        self.requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("request {id} not found")))
    }

    fn status_message(request: &DonationRequest, status: RequestStatus) -> String {
        format!(
            "Your {} request has been {}",
            request.need.kind(),
            status.as_lowercase()
        )
    }
}

#[async_trait]
impl<R, D, E> RequestLifecycle for LifecycleManager<R, D, E>
where
    R: RequestRepository,
    D: DonationRepository,
    E: EventSink,
{
    async fn create_request(&self, new: NewRequest) -> Result<DonationRequest, Error> {
        let request = DonationRequest::open(new);
        self.requests.insert(&request).await?;
        debug!(request_id = %request.id, need = %request.need, "request opened");
        self.sink.emit(&Notification::New(request.clone()));
        Ok(request)
    }

    async fn set_status(
        &self,
        id: &RequestId,
        target: RequestStatus,
    ) -> Result<DonationRequest, Error> {
        let request = self.load(id).await?;

        if target == RequestStatus::Approved {
            let status = self.ledger.check_availability(&request.need).await?;
            if !status.available {
                // The request is left untouched; the caller gets the short
                // item so it can render "out of stock".
                return Err(Error::insufficient_inventory(&request.need));
            }
        }

        let updated = self
            .requests
            .update_status(id, target)
            .await?
            .ok_or_else(|| Error::not_found(format!("request {id} not found")))?;

        self.sink.emit(&Notification::Status(StatusChanged {
            id: updated.id,
            status: target,
            recipient_id: updated.requester_id,
            message: Self::status_message(&updated, target),
        }));

        if target == RequestStatus::Approved {
            self.sink.emit(&Notification::Approved(Approved {
                request_id: updated.id,
                kind: updated.need.kind(),
                blood_type: updated.need.blood_type().map(str::to_owned),
                organ: updated.need.organ_name().map(str::to_owned),
                urgency: updated.urgency,
            }));

            match self.ledger.consume_one(&updated.need).await? {
                Some(donation) => {
                    debug!(
                        request_id = %updated.id,
                        donation_id = %donation.id,
                        need = %updated.need,
                        "consumed one donation for approval"
                    );
                }
                None => {
                    // Race lost: the approval is already persisted and is
                    // not rolled back.
                    warn!(
                        request_id = %updated.id,
                        need = %updated.need,
                        "approval persisted but no matching donation remained"
                    );
                }
            }
        }

        Ok(updated)
    }

    async fn notify_unavailable(&self, id: &RequestId) -> Result<(), Error> {
        let request = self.load(id).await?;
        self.sink.emit(&Notification::Unavailable(Unavailable {
            id: request.id,
            recipient_id: request.requester_id,
            message: format!(
                "Unfortunately, no {} donors are currently available for your request",
                request.need.kind()
            ),
        }));
        Ok(())
    }

    async fn inventory_for_request(&self, id: &RequestId) -> Result<InventoryCheck, Error> {
        let request = self.load(id).await?;
        let status = self.ledger.check_availability(&request.need).await?;
        Ok(InventoryCheck {
            available: status.available,
            count: status.count,
            kind: request.need.kind(),
            item: request.need.item().to_owned(),
        })
    }

    async fn list_requests(&self, filter: RequestFilter) -> Result<Vec<DonationRequest>, Error> {
        Ok(self.requests.list(&filter).await?)
    }

    async fn requests_for(&self, requester: &UserId) -> Result<Vec<DonationRequest>, Error> {
        Ok(self.requests.list_for_requester(requester).await?)
    }
}
