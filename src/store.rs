// In-memory offer collection shared by all request handlers

use crate::models::Offer;
use tokio::sync::{RwLock, RwLockReadGuard};

/// Writers exclude each other and all readers; readers share the lock.
/// A snapshot is the read guard itself, so a search never sees a half-applied write.
#[derive(Debug, Default)]
pub struct OfferStore {
    offers: RwLock<Vec<Offer>>,
}

pub type Snapshot<'a> = RwLockReadGuard<'a, Vec<Offer>>;

impl OfferStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a batch and returns the new store size.
    pub async fn append(&self, batch: Vec<Offer>) -> usize {
        let mut offers = self.offers.write().await;
        offers.extend(batch);
        offers.len()
    }

    /// Drops every offer and returns how many were removed.
    pub async fn clear(&self) -> usize {
        let mut offers = self.offers.write().await;
        let removed = offers.len();
        offers.clear();
        offers.shrink_to_fit();
        removed
    }

    pub async fn snapshot(&self) -> Snapshot<'_> {
        self.offers.read().await
    }
}
