//! Repository seam for price persistence.
//!
//! The drop detector and the pipeline depend on this trait rather than on
//! [`PriceStore`] directly, so both can be exercised against an in-memory
//! fake.

use async_trait::async_trait;

use super::PriceStore;
use crate::record::PriceRecord;

/// Data-access contract used by the pipeline.
#[async_trait]
pub trait PriceRepository: Send + Sync {
    /// Stores a record idempotently. `false` means nothing usable was written
    /// (absent/invalid record or storage fault).
    async fn insert(&self, record: Option<&PriceRecord>) -> bool;

    /// Price of the most recent observation of `model`, if any.
    async fn latest_price(&self, model: &str) -> Option<f64>;
}

#[async_trait]
impl PriceRepository for PriceStore {
    async fn insert(&self, record: Option<&PriceRecord>) -> bool {
        PriceStore::insert(self, record).await
    }

    async fn latest_price(&self, model: &str) -> Option<f64> {
        PriceStore::latest_price(self, model).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Database;

    async fn store_and_read(repo: &dyn PriceRepository, record: &PriceRecord) -> Option<f64> {
        assert!(repo.insert(Some(record)).await);
        repo.latest_price(&record.model).await
    }

    #[tokio::test]
    async fn test_price_repository_trait_delegates_to_store() {
        let store = PriceStore::new(Database::new_in_memory().await.unwrap());
        let record = PriceRecord::observed_now("iPhone 14", 999.0, "https://example.com/a");

        assert_eq!(store_and_read(&store, &record).await, Some(999.0));
        assert!(!PriceRepository::insert(&store, None).await);
    }
}
