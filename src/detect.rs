//! Price drop detection against stored history.

use std::fmt;

use tracing::warn;

use crate::store::PriceRepository;

/// Default relative drop (10%) that must be exceeded to raise an alert.
pub const DEFAULT_DROP_THRESHOLD: f64 = 0.10;

/// A detected drop from the last stored price.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceDrop {
    /// Canonical model name.
    pub model: String,
    /// Most recent stored price.
    pub previous_price: f64,
    /// Newly observed price.
    pub new_price: f64,
    /// Drop as a percentage of the previous price, rounded to two decimals.
    pub percent: f64,
}

impl fmt::Display for PriceDrop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "price drop detected: {} fell from {} to {} ({}% down)",
            self.model, self.previous_price, self.new_price, self.percent
        )
    }
}

/// Flags new prices that undercut the latest stored price by more than a
/// threshold. Purely advisory.
#[derive(Debug, Clone, Copy)]
pub struct DropDetector {
    threshold: f64,
}

impl Default for DropDetector {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_DROP_THRESHOLD,
        }
    }
}

impl DropDetector {
    /// Creates a detector with a custom relative threshold, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    /// Compares `new_price` with the latest stored price of `model`.
    ///
    /// Returns a [`PriceDrop`] (also logged as a warning) when the new price
    /// is below `latest * (1 - threshold)`; `None` when there is no history
    /// or the drop is within the threshold.
    pub async fn check(
        &self,
        model: &str,
        new_price: f64,
        store: &dyn PriceRepository,
    ) -> Option<PriceDrop> {
        let previous_price = store.latest_price(model).await?;
        self.compare(model, previous_price, new_price)
    }

    /// Pure comparison used by [`check`](Self::check).
    #[must_use]
    pub fn compare(&self, model: &str, previous_price: f64, new_price: f64) -> Option<PriceDrop> {
        if previous_price <= 0.0 || new_price >= previous_price * (1.0 - self.threshold) {
            return None;
        }

        let percent = round_2((previous_price - new_price) / previous_price * 100.0);
        let drop = PriceDrop {
            model: model.to_string(),
            previous_price,
            new_price,
            percent,
        };
        warn!(
            model = %drop.model,
            previous_price,
            new_price,
            percent,
            "{drop}"
        );
        Some(drop)
    }
}

fn round_2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
