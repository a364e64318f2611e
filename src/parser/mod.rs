//! Price extraction from fetched content.
//!
//! The parser turns [`RawContent`] of either shape into a [`PriceRecord`]:
//! - [`json`] reads fixed keys with fallbacks from a JSON object
//! - [`html`] tries an ordered list of CSS extraction strategies
//!
//! A source that cannot be parsed is logged and yields `None`; it never
//! aborts the run.
//!
//! # Example
//!
//! ```
//! use pricewatch_core::fetch::RawContent;
//! use pricewatch_core::parser::parse_record;
//!
//! let content = RawContent::Structured(serde_json::json!({"model": "iphone 14", "price": "999"}));
//! let record = parse_record(&content, "https://example.com/api/feed").unwrap();
//! assert_eq!(record.model, "iPhone 14");
//! assert_eq!(record.price, 999.0);
//! ```

pub mod html;
pub mod json;

use tracing::{info, warn};

use crate::fetch::RawContent;
use crate::normalize::{normalize_model, normalize_price};
use crate::record::PriceRecord;

/// Raw model and price strings located in a document, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPair {
    /// Model text as found in the source.
    pub model: String,
    /// Price text as found in the source.
    pub price: String,
}

/// Normalizes both fields; accepts only a non-empty model and a positive,
/// finite price.
pub(crate) fn accept_fields(pair: &FieldPair) -> Option<(String, f64)> {
    let model = normalize_model(&pair.model);
    let price = normalize_price(&pair.price)?;
    if model.is_empty() || !price.is_finite() || price <= 0.0 {
        return None;
    }
    Some((model, price))
}

/// Extracts a price record from `content`, stamped with the current instant.
///
/// Returns `None` (after logging a warning) when no model/price pair can be
/// found and normalized.
#[must_use]
pub fn parse_record(content: &RawContent, source_url: &str) -> Option<PriceRecord> {
    let extracted = match content {
        RawContent::Structured(value) => json::extract_price(value),
        RawContent::Text(body) => html::extract_price(body),
    };

    let Some((model, price)) = extracted else {
        warn!(url = %source_url, kind = ?content.kind(), "price extraction failed");
        return None;
    };

    let record = PriceRecord::observed_now(model, price, source_url);
    info!(url = %source_url, model = %record.model, price = record.price, "price extracted");
    Some(record)
}
