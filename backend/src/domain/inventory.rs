//! The derived inventory ledger.
//!
//! There is no stored balance: availability is computed on demand as the
//! count of donation records matching a [`Need`], and consumed by deleting
//! exactly one matching record. Deleting the record removes it from the
//! donor's history and decrements availability in one step (a known design
//! smell, recorded in DESIGN.md).

use std::sync::Arc;

use crate::domain::donation::{Donation, Need};
use crate::domain::error::Error;
use crate::domain::ports::{DonationRepository, InventoryStatus};

/// Query-plus-consume view over the donation store.
#[derive(Clone)]
pub struct InventoryLedger<D> {
    donations: Arc<D>,
}

impl<D> InventoryLedger<D> {
    /// Build the ledger over a donation store.
    pub fn new(donations: Arc<D>) -> Self {
        Self { donations }
    }
}

impl<D: DonationRepository> InventoryLedger<D> {
    /// Is at least one matching unit available, and how many are there?
    ///
    /// No side effects; repeated calls without intervening donation changes
    /// return the same count.
    pub async fn check_availability(&self, need: &Need) -> Result<InventoryStatus, Error> {
        let count = self.donations.count_matching(need).await?;
        Ok(InventoryStatus {
            available: count > 0,
            count,
        })
    }

    /// Consume one matching unit by deleting the oldest matching donation.
    ///
    /// The only mutation entry point into inventory. Returns the consumed
    /// record, or `None` when nothing matched at this instant.
    pub async fn consume_one(&self, need: &Need) -> Result<Option<Donation>, Error> {
        Ok(self.donations.remove_one_matching(need).await?)
    }
}
