//! Donor-side supply use-cases.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::donation::{Donation, NewDonation};
use crate::domain::error::Error;
use crate::domain::ports::{DonationIntake, DonationRepository, UserRepository};
use crate::domain::user::{Availability, UserId};

/// Donor history views are capped like the source listing.
const DONOR_HISTORY_LIMIT: usize = 20;

/// Donation intake over the donation and user stores.
#[derive(Clone)]
pub struct DonationService<D, U> {
    donations: Arc<D>,
    users: Arc<U>,
}

impl<D, U> DonationService<D, U> {
    /// Wire the service to its stores.
    pub fn new(donations: Arc<D>, users: Arc<U>) -> Self {
        Self { donations, users }
    }
}

#[async_trait]
impl<D, U> DonationIntake for DonationService<D, U>
where
    D: DonationRepository,
    U: UserRepository,
{
    async fn record_donation(&self, new: NewDonation) -> Result<Donation, Error> {
        let donation = Donation::record(new);
        self.donations.insert(&donation).await?;
        debug!(donation_id = %donation.id, need = %donation.need, "donation recorded");
        Ok(donation)
    }

    async fn donations_for(&self, donor: &UserId) -> Result<Vec<Donation>, Error> {
        Ok(self
            .donations
            .list_for_donor(donor, DONOR_HISTORY_LIMIT)
            .await?)
    }

    async fn set_availability(
        &self,
        donor: &UserId,
        availability: Availability,
    ) -> Result<Availability, Error> {
        self.users
            .update_availability(donor, &availability)
            .await?
            .ok_or_else(|| Error::not_found(format!("user {donor} not found")))
    }
}
