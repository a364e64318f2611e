//! Retry budget with jittered pauses between attempts.
//!
//! Every failed attempt is retried the same way: scraped sources fail for
//! reasons that rarely say anything about the next attempt (bot walls, flaky
//! CDNs, rate limits), so there is no per-error classification. The pause
//! before each retry is drawn uniformly from a [`DelayRange`].
//!
//! # Example
//!
//! ```
//! use pricewatch_core::fetch::{RetryDecision, RetryPolicy};
//! use pricewatch_core::pacing::RandomSource;
//!
//! let policy = RetryPolicy::default();
//! let random = RandomSource::seeded(1);
//!
//! match policy.should_retry(1, &random) {
//!     RetryDecision::Retry { delay, attempt } => {
//!         println!("Retrying in {:?} (attempt {})", delay, attempt);
//!     }
//!     RetryDecision::DoNotRetry { reason } => {
//!         println!("Not retrying: {}", reason);
//!     }
//! }
//! ```

use std::time::Duration;

use tracing::debug;

use crate::pacing::{DelayRange, RandomSource};

/// Default maximum attempts per source, including the first one.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default lower bound of the pause between attempts.
pub const DEFAULT_RETRY_DELAY_MIN: Duration = Duration::from_millis(1000);

/// Default upper bound of the pause between attempts.
pub const DEFAULT_RETRY_DELAY_MAX: Duration = Duration::from_millis(2000);

/// Decision on whether to retry a failed fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry after the specified delay.
    Retry {
        /// How long to wait before retrying.
        delay: Duration,
        /// Which attempt number this will be (1-indexed, so first retry is attempt 2).
        attempt: u32,
    },

    /// Give up on this source.
    DoNotRetry {
        /// Human-readable reason why retry is not attempted.
        reason: String,
    },
}

/// Attempt budget and pause range for fetches.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the initial attempt).
    max_attempts: u32,

    /// Range the pause between attempts is drawn from.
    delay: DelayRange,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_RETRIES,
            delay: DelayRange::new(DEFAULT_RETRY_DELAY_MIN, DEFAULT_RETRY_DELAY_MAX),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with a custom attempt budget and pause range.
    ///
    /// `max_attempts` below 1 is raised to 1.
    #[must_use]
    pub fn new(max_attempts: u32, delay: DelayRange) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Creates a policy with a custom `max_attempts`, using the default pause range.
    #[must_use]
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    /// Returns the maximum number of attempts configured.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the pause range.
    #[must_use]
    pub fn delay_range(&self) -> DelayRange {
        self.delay
    }

    /// Decides what happens after attempt number `attempt` (1-indexed) failed.
    pub fn should_retry(&self, attempt: u32, random: &RandomSource) -> RetryDecision {
        if attempt >= self.max_attempts {
            debug!(attempt, max = self.max_attempts, "max attempts reached");
            return RetryDecision::DoNotRetry {
                reason: format!("max attempts ({}) exhausted", self.max_attempts),
            };
        }

        let delay = random.delay(self.delay);
        debug!(
            attempt,
            next_attempt = attempt + 1,
            delay_ms = delay.as_millis(),
            "will retry"
        );

        RetryDecision::Retry {
            delay,
            attempt: attempt + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_policy_default_values() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.delay_range().min(), Duration::from_secs(1));
        assert_eq!(policy.delay_range().max(), Duration::from_secs(2));
    }

    #[test]
    fn test_retry_policy_max_attempts_minimum_is_one() {
        let policy = RetryPolicy::with_max_attempts(0);
        assert_eq!(policy.max_attempts(), 1);
        let policy = RetryPolicy::new(0, DelayRange::ZERO);
        assert_eq!(policy.max_attempts(), 1);
    }

    #[test]
    fn test_should_retry_respects_max_attempts() {
        let policy = RetryPolicy::new(3, DelayRange::ZERO);
        let random = RandomSource::seeded(3);

        assert_eq!(
            policy.should_retry(1, &random),
            RetryDecision::Retry {
                delay: Duration::ZERO,
                attempt: 2
            }
        );
        assert!(matches!(
            policy.should_retry(2, &random),
            RetryDecision::Retry { attempt: 3, .. }
        ));

        let decision = policy.should_retry(3, &random);
        assert!(matches!(decision, RetryDecision::DoNotRetry { .. }));
        if let RetryDecision::DoNotRetry { reason } = decision {
            assert!(reason.contains("exhausted"));
        }
    }

    #[test]
    fn test_single_attempt_never_retries() {
        let policy = RetryPolicy::with_max_attempts(1);
        let random = RandomSource::seeded(3);
        assert!(matches!(
            policy.should_retry(1, &random),
            RetryDecision::DoNotRetry { .. }
        ));
    }

    #[test]
    fn test_retry_delay_within_configured_range() {
        let policy = RetryPolicy::default();
        let random = RandomSource::seeded(11);
        for _ in 0..50 {
            let RetryDecision::Retry { delay, .. } = policy.should_retry(1, &random) else {
                panic!("first failure should be retried");
            };
            assert!(delay >= DEFAULT_RETRY_DELAY_MIN && delay <= DEFAULT_RETRY_DELAY_MAX);
        }
    }
}
