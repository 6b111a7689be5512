//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe how the domain reaches storage and the notification
//! channel; driving ports are the use-case surface HTTP handlers depend on.
//! Adapters map their failures into [`StoreError`] so the core never sees a
//! backend-specific error type.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::donation::{Donation, Need, NeedKind, NewDonation};
use crate::domain::error::Error;
use crate::domain::events::Notification;
use crate::domain::request::{
    DonationRequest, NewRequest, RequestFilter, RequestId, RequestStatus,
};
use crate::domain::user::{Availability, Role, User, UserId};

/// Failures surfaced by storage adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Backend connectivity failure.
    #[error("store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("store query failed: {message}")]
    Query { message: String },
}

impl StoreError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

// Storage failures surface as generic internal errors; the core never
// retries them.
impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Error::internal(err.to_string())
    }
}

/// Persistence port for donation requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestRepository: Send + Sync {
    /// Persist a newly opened request.
    async fn insert(&self, request: &DonationRequest) -> Result<(), StoreError>;

    /// Fetch a request by identifier.
    async fn find_by_id(&self, id: &RequestId) -> Result<Option<DonationRequest>, StoreError>;

    /// Persist a status change, returning the updated record if it exists.
    async fn update_status(
        &self,
        id: &RequestId,
        status: RequestStatus,
    ) -> Result<Option<DonationRequest>, StoreError>;

    /// All requests passing `filter`, newest first.
    async fn list(&self, filter: &RequestFilter) -> Result<Vec<DonationRequest>, StoreError>;

    /// A requester's own requests, newest first.
    async fn list_for_requester(
        &self,
        requester: &UserId,
    ) -> Result<Vec<DonationRequest>, StoreError>;
}

/// Persistence port for donation records, the inventory's backing store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonationRepository: Send + Sync {
    /// Persist a recorded donation.
    async fn insert(&self, donation: &Donation) -> Result<(), StoreError>;

    /// Count donations matching `need` by value equality.
    async fn count_matching(&self, need: &Need) -> Result<u64, StoreError>;

    /// Delete the oldest donation matching `need`, returning it if one
    /// existed. Oldest-first keeps consumption deterministic in-process; no
    /// cross-donor fairness is promised.
    async fn remove_one_matching(&self, need: &Need) -> Result<Option<Donation>, StoreError>;

    /// A donor's own donations, newest first, capped at `limit`.
    async fn list_for_donor(
        &self,
        donor: &UserId,
        limit: usize,
    ) -> Result<Vec<Donation>, StoreError>;
}

/// Persistence port for user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError>;

    /// Replace a donor's availability, returning the stored value if the
    /// user exists.
    async fn update_availability(
        &self,
        id: &UserId,
        availability: &Availability,
    ) -> Result<Option<Availability>, StoreError>;
}

/// Fire-and-forget notification channel.
///
/// Injected into the lifecycle manager rather than held as ambient global
/// state. Best-effort: no delivery guarantee, no retry, and an emission
/// failure must never fail the transition that triggered it.
pub trait EventSink: Send + Sync {
    /// Emit one notification event.
    fn emit(&self, event: &Notification);
}

/// Resolves a bearer token to the calling identity.
///
/// Registration, login, and password hashing live outside this service; the
/// core trusts whatever implements this port.
#[cfg_attr(test, mockall::automock)]
pub trait CallerAuthenticator: Send + Sync {
    /// The identity behind `token`, if the token is known.
    fn authenticate(&self, token: &str) -> Option<Caller>;
}

/// Authenticated caller attached to each request by the HTTP adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub id: UserId,
    pub role: Role,
}

/// Result of an availability check against the derived inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InventoryStatus {
    pub available: bool,
    pub count: u64,
}

/// Inventory answer for one specific request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryCheck {
    pub available: bool,
    pub count: u64,
    #[serde(rename = "type")]
    pub kind: NeedKind,
    pub item: String,
}

/// Driving port: the request lifecycle use-cases.
#[async_trait]
pub trait RequestLifecycle: Send + Sync {
    /// Open a request in `PENDING` and emit `request:new`.
    async fn create_request(&self, new: NewRequest) -> Result<DonationRequest, Error>;

    /// Move a request to `target`, gating `APPROVED` on inventory.
    async fn set_status(
        &self,
        id: &RequestId,
        target: RequestStatus,
    ) -> Result<DonationRequest, Error>;

    /// Emit `request:unavailable` for a request without changing state.
    async fn notify_unavailable(&self, id: &RequestId) -> Result<(), Error>;

    /// Availability and count for the request's need.
    async fn inventory_for_request(&self, id: &RequestId) -> Result<InventoryCheck, Error>;

    /// Admin listing with optional filters, newest first.
    async fn list_requests(&self, filter: RequestFilter) -> Result<Vec<DonationRequest>, Error>;

    /// A requester's own requests, newest first.
    async fn requests_for(&self, requester: &UserId) -> Result<Vec<DonationRequest>, Error>;
}

/// Driving port: the donor-side supply use-cases.
#[async_trait]
pub trait DonationIntake: Send + Sync {
    /// Record a donation, growing the derived inventory by one unit.
    async fn record_donation(&self, new: NewDonation) -> Result<Donation, Error>;

    /// A donor's recent donations, newest first.
    async fn donations_for(&self, donor: &UserId) -> Result<Vec<Donation>, Error>;

    /// Replace the donor's availability flags.
    async fn set_availability(
        &self,
        donor: &UserId,
        availability: Availability,
    ) -> Result<Availability, Error>;
}
