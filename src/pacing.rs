//! Randomized request identity and jittered delays.
//!
//! All randomness in a run flows through one [`RandomSource`], which can be
//! seeded so that User-Agent choices and sleep durations are reproducible.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::user_agent::USER_AGENTS;

/// Inclusive range a jittered delay is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    min: Duration,
    max: Duration,
}

impl DelayRange {
    /// A range that never sleeps.
    pub const ZERO: Self = Self {
        min: Duration::ZERO,
        max: Duration::ZERO,
    };

    /// Creates a range; bounds given in the wrong order are swapped.
    #[must_use]
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Creates a range from millisecond bounds.
    #[must_use]
    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self::new(Duration::from_millis(min_ms), Duration::from_millis(max_ms))
    }

    /// Lower bound.
    #[must_use]
    pub fn min(&self) -> Duration {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub fn max(&self) -> Duration {
        self.max
    }

    /// True when every draw is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.max.is_zero()
    }
}

/// Source of all randomness used by the fetcher and the pipeline.
#[derive(Debug)]
pub struct RandomSource {
    rng: Mutex<StdRng>,
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource {
    /// Seeds from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic source for reproducible runs and tests.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Picks a User-Agent from the browser pool.
    pub fn user_agent(&self) -> &'static str {
        let index = self.with_rng(|rng| rng.gen_range(0..USER_AGENTS.len()));
        USER_AGENTS[index]
    }

    /// Draws a delay uniformly from `range`.
    pub fn delay(&self, range: DelayRange) -> Duration {
        if range.min == range.max {
            return range.min;
        }
        let min_ms = range.min.as_millis() as u64;
        let max_ms = range.max.as_millis() as u64;
        Duration::from_millis(self.with_rng(|rng| rng.gen_range(min_ms..=max_ms)))
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut guard = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}
