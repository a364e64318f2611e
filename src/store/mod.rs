//! Append-only price history backed by `SQLite`.
//!
//! The store owns the `prices` table. Rows are only ever inserted; a row that
//! repeats an existing (model, price, source_url, timestamp) tuple is ignored.
//!
//! # Example
//!
//! ```no_run
//! use pricewatch_core::{Database, PriceRecord, PriceStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = PriceStore::new(Database::new_in_memory().await?);
//! let record = PriceRecord::observed_now("iPhone 14", 999.0, "https://example.com/api/feed");
//! assert!(store.insert(Some(&record)).await);
//! assert_eq!(store.latest_price("iPhone 14").await, Some(999.0));
//! # Ok(())
//! # }
//! ```

mod error;
mod repository;

pub use error::{StoreError, StoreErrorKind};
pub use repository::PriceRepository;

use chrono::{DateTime, Utc};
use sqlx::Row;
use tracing::{debug, error, info, instrument, warn};

use crate::db::Database;
use crate::record::PriceRecord;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// What an insert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new row was written.
    Inserted,
    /// An identical row already existed; nothing changed.
    AlreadyPresent,
}

/// One persisted observation, as read back from the table.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPrice {
    /// Auto-incremented row id.
    pub id: i64,
    /// Canonical model name.
    pub model: String,
    /// Observed price.
    pub price: f64,
    /// Source locator.
    pub source_url: String,
    /// Observation instant.
    pub timestamp: DateTime<Utc>,
}

/// Price history store.
#[derive(Debug, Clone)]
pub struct PriceStore {
    db: Database,
}

impl PriceStore {
    /// Creates a store over an open (and migrated) database.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Stores `record` if it is present and valid.
    ///
    /// Returns `true` when the record is in the table afterwards, whether it
    /// was written now or already existed. Returns `false` for an absent or
    /// invalid record and for storage faults, which are logged.
    #[instrument(skip(self, record))]
    pub async fn insert(&self, record: Option<&PriceRecord>) -> bool {
        let Some(record) = record else {
            return false;
        };

        match self.try_insert(record).await {
            Ok(InsertOutcome::Inserted) => {
                info!(model = %record.model, price = record.price, url = %record.source_url, "price stored");
                true
            }
            Ok(InsertOutcome::AlreadyPresent) => {
                debug!(model = %record.model, price = record.price, "identical observation already stored");
                true
            }
            Err(StoreError::InvalidRecord { reason }) => {
                debug!(reason = %reason, "invalid record not stored");
                false
            }
            Err(e) => {
                let kind = e.log_kind();
                if kind.is_transient() {
                    warn!(kind = %kind, error = %e, record = ?record, "price insert failed, database busy");
                } else {
                    error!(kind = %kind, error = %e, record = ?record, "price insert failed");
                }
                false
            }
        }
    }

    /// Inserts `record`, reporting whether a new row was written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidRecord`] for records that fail validation
    /// and [`StoreError::Database`] if the insert fails.
    pub async fn try_insert(&self, record: &PriceRecord) -> Result<InsertOutcome> {
        if !record.is_valid() {
            return Err(StoreError::invalid_record(format!(
                "model {:?} with price {}",
                record.model, record.price
            )));
        }

        let result = sqlx::query(
            r"INSERT OR IGNORE INTO prices (model, price, source_url, timestamp)
              VALUES (?, ?, ?, ?)",
        )
        .bind(&record.model)
        .bind(record.price)
        .bind(&record.source_url)
        .bind(record.timestamp_text())
        .execute(self.db.pool())
        .await?;

        Ok(if result.rows_affected() == 0 {
            InsertOutcome::AlreadyPresent
        } else {
            InsertOutcome::Inserted
        })
    }

    /// Price of the most recent observation of `model`.
    ///
    /// Returns `None` when the model has never been observed, or when the
    /// lookup fails (the failure is logged).
    #[instrument(skip(self))]
    pub async fn latest_price(&self, model: &str) -> Option<f64> {
        match self.try_latest_price(model).await {
            Ok(price) => price,
            Err(e) => {
                error!(model = %model, kind = %e.log_kind(), error = %e, "latest price lookup failed");
                None
            }
        }
    }

    /// Fallible form of [`latest_price`](Self::latest_price).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the query fails.
    pub async fn try_latest_price(&self, model: &str) -> Result<Option<f64>> {
        let row: Option<(f64,)> = sqlx::query_as(
            r"SELECT price FROM prices
              WHERE model = ?
              ORDER BY timestamp DESC, id DESC
              LIMIT 1",
        )
        .bind(model)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(|(price,)| price))
    }

    /// All observations of `model`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the query fails, or
    /// [`StoreError::CorruptTimestamp`] if a stored timestamp is unreadable.
    pub async fn history(&self, model: &str) -> Result<Vec<StoredPrice>> {
        let rows = sqlx::query(
            r"SELECT id, model, price, source_url, timestamp FROM prices
              WHERE model = ?
              ORDER BY timestamp ASC, id ASC",
        )
        .bind(model)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter()
            .map(|row| -> Result<StoredPrice> {
                let id: i64 = row.try_get("id")?;
                let timestamp: String = row.try_get("timestamp")?;
                let timestamp = DateTime::parse_from_rfc3339(&timestamp)
                    .map_err(|_| StoreError::CorruptTimestamp {
                        id,
                        value: timestamp.clone(),
                    })?
                    .with_timezone(&Utc);
                Ok(StoredPrice {
                    id,
                    model: row.try_get("model")?,
                    price: row.try_get("price")?,
                    source_url: row.try_get("source_url")?,
                    timestamp,
                })
            })
            .collect()
    }

    /// Total number of stored observations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the query fails.
    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM prices")
            .fetch_one(self.db.pool())
            .await?;
        Ok(count)
    }

    /// Closes the underlying connection pool.
    pub async fn close(&self) {
        self.db.close().await;
        info!("price store closed");
    }

    /// Returns true once the store has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.db.is_closed()
    }
}
