//! In-memory persistence adapters.
//!
//! The persistence backend is an external collaborator; these adapters give
//! the service a working default and the tests a deterministic store.
//! Collections are `Mutex`-guarded vectors, so the only atomicity on offer
//! is per-call. That matches the per-record guarantee the lifecycle manager
//! assumes of any backing store.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::donation::{Donation, Need};
use crate::domain::ports::{DonationRepository, RequestRepository, StoreError, UserRepository};
use crate::domain::request::{DonationRequest, RequestFilter, RequestId, RequestStatus};
use crate::domain::user::{Availability, User, UserId};

fn poisoned(store: &str) -> StoreError {
    StoreError::query(format!("{store} store poisoned"))
}

/// Donation requests held in memory.
#[derive(Default)]
pub struct InMemoryRequestRepository {
    rows: Mutex<Vec<DonationRequest>>,
}

#[async_trait]
impl RequestRepository for InMemoryRequestRepository {
    async fn insert(&self, request: &DonationRequest) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().map_err(|_| poisoned("request"))?;
        rows.push(request.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &RequestId) -> Result<Option<DonationRequest>, StoreError> {
        let rows = self.rows.lock().map_err(|_| poisoned("request"))?;
        Ok(rows.iter().find(|row| row.id == *id).cloned())
    }

    async fn update_status(
        &self,
        id: &RequestId,
        status: RequestStatus,
    ) -> Result<Option<DonationRequest>, StoreError> {
        let mut rows = self.rows.lock().map_err(|_| poisoned("request"))?;
        Ok(rows.iter_mut().find(|row| row.id == *id).map(|row| {
            row.status = status;
            row.updated_at = chrono::Utc::now();
            row.clone()
        }))
    }

    async fn list(&self, filter: &RequestFilter) -> Result<Vec<DonationRequest>, StoreError> {
        // Rows are appended in creation order; reverse iteration gives a
        // deterministic newest-first listing.
        let rows = self.rows.lock().map_err(|_| poisoned("request"))?;
        Ok(rows
            .iter()
            .rev()
            .filter(|row| filter.matches(row))
            .cloned()
            .collect())
    }

    async fn list_for_requester(
        &self,
        requester: &UserId,
    ) -> Result<Vec<DonationRequest>, StoreError> {
        let rows = self.rows.lock().map_err(|_| poisoned("request"))?;
        Ok(rows
            .iter()
            .rev()
            .filter(|row| row.requester_id == *requester)
            .cloned()
            .collect())
    }
}

/// Donations held in memory, insertion order preserved so consumption is
/// oldest-first and deterministic.
#[derive(Default)]
pub struct InMemoryDonationRepository {
    rows: Mutex<Vec<Donation>>,
}

#[async_trait]
impl DonationRepository for InMemoryDonationRepository {
    async fn insert(&self, donation: &Donation) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().map_err(|_| poisoned("donation"))?;
        rows.push(donation.clone());
        Ok(())
    }

    async fn count_matching(&self, need: &Need) -> Result<u64, StoreError> {
        let rows = self.rows.lock().map_err(|_| poisoned("donation"))?;
        Ok(rows.iter().filter(|row| row.need == *need).count() as u64)
    }

    async fn remove_one_matching(&self, need: &Need) -> Result<Option<Donation>, StoreError> {
        let mut rows = self.rows.lock().map_err(|_| poisoned("donation"))?;
        let position = rows.iter().position(|row| row.need == *need);
        Ok(position.map(|index| rows.remove(index)))
    }

    async fn list_for_donor(
        &self,
        donor: &UserId,
        limit: usize,
    ) -> Result<Vec<Donation>, StoreError> {
        let rows = self.rows.lock().map_err(|_| poisoned("donation"))?;
        Ok(rows
            .iter()
            .rev()
            .filter(|row| row.donor_id == *donor)
            .take(limit)
            .cloned()
            .collect())
    }
}

/// Users held in memory.
#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Insert a user directly; registration itself is out of scope.
    pub fn seed(&self, user: User) {
        if let Ok(mut rows) = self.rows.lock() {
            rows.push(user);
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        let rows = self.rows.lock().map_err(|_| poisoned("user"))?;
        Ok(rows.iter().find(|row| row.id == *id).cloned())
    }

    async fn update_availability(
        &self,
        id: &UserId,
        availability: &Availability,
    ) -> Result<Option<Availability>, StoreError> {
        let mut rows = self.rows.lock().map_err(|_| poisoned("user"))?;
        Ok(rows.iter_mut().find(|row| row.id == *id).map(|row| {
            row.availability = availability.clone();
            row.availability.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::donation::NewDonation;
    use crate::domain::request::{NewRequest, Urgency};
    use chrono::NaiveDate;
    use rstest::rstest;

    fn request(need: Need, urgency: Urgency) -> DonationRequest {
        DonationRequest::open(NewRequest {
            requester_id: UserId::new(),
            need,
            radius_km: None,
            urgency,
            description: None,
            hospital_name: None,
            doctor_name: None,
            contact_phone: None,
        })
    }

    #[rstest]
    #[actix_rt::test]
    async fn update_status_stamps_updated_at() {
        let repo = InMemoryRequestRepository::default();
        let opened = request(Need::blood("A+").expect("valid"), Urgency::Normal);
        repo.insert(&opened).await.expect("insert");

        let updated = repo
            .update_status(&opened.id, RequestStatus::Verified)
            .await
            .expect("update")
            .expect("request exists");
        assert_eq!(updated.status, RequestStatus::Verified);
        assert!(updated.updated_at >= opened.updated_at);

        let missing = repo
            .update_status(&RequestId::new(), RequestStatus::Verified)
            .await
            .expect("update");
        assert!(missing.is_none());
    }

    #[rstest]
    #[actix_rt::test]
    async fn list_applies_filters() {
        let repo = InMemoryRequestRepository::default();
        repo.insert(&request(
            Need::blood("A+").expect("valid"),
            Urgency::Emergency,
        ))
        .await
        .expect("insert");
        repo.insert(&request(
            Need::organ("liver").expect("valid"),
            Urgency::Low,
        ))
        .await
        .expect("insert");

        let emergencies = repo
            .list(&RequestFilter {
                urgency: Some(Urgency::Emergency),
                ..RequestFilter::default()
            })
            .await
            .expect("list");
        assert_eq!(emergencies.len(), 1);

        let everything = repo.list(&RequestFilter::default()).await.expect("list");
        assert_eq!(everything.len(), 2);
    }

    #[rstest]
    #[actix_rt::test]
    async fn donor_history_is_capped() {
        let repo = InMemoryDonationRepository::default();
        let donor = UserId::new();
        for _ in 0..3 {
            let donation = Donation::record(NewDonation {
                donor_id: donor,
                need: Need::blood("O-").expect("valid"),
                date: NaiveDate::from_ymd_opt(2026, 5, 5).expect("valid date"),
                address: None,
                notes: None,
            });
            repo.insert(&donation).await.expect("insert");
        }

        let capped = repo.list_for_donor(&donor, 2).await.expect("list");
        assert_eq!(capped.len(), 2);
    }
}
