//! Canonical price observation.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// One price observation for one product from one source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRecord {
    /// Canonical model name, e.g. "iPhone 14 Pro".
    pub model: String,
    /// Observed price in the source's currency unit.
    pub price: f64,
    /// Locator of the source the price was read from.
    pub source_url: String,
    /// Instant the observation was made.
    pub timestamp: DateTime<Utc>,
}

impl PriceRecord {
    /// Creates a record observed right now.
    #[must_use]
    pub fn observed_now(
        model: impl Into<String>,
        price: f64,
        source_url: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            price,
            source_url: source_url.into(),
            timestamp: Utc::now(),
        }
    }

    /// Returns true when the record may be stored: a non-empty model and a
    /// finite, positive price.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.model.trim().is_empty() && self.price.is_finite() && self.price > 0.0
    }

    /// Timestamp in the fixed-width form written to storage.
    ///
    /// Fixed width keeps lexicographic order equal to chronological order.
    #[must_use]
    pub fn timestamp_text(&self) -> String {
        format_timestamp(&self.timestamp)
    }
}

/// Formats an instant as RFC 3339 with microseconds and a `Z` suffix.
#[must_use]
pub fn format_timestamp(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, true)
}
