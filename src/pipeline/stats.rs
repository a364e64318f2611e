//! Run counters and the process exit outcome derived from them.

use std::fmt;
use std::time::{Duration, Instant};

use crate::detect::PriceDrop;

/// Counters for an ingestion run, owned by the run loop.
#[derive(Debug)]
pub struct RunStats {
    succeeded: usize,
    failed: usize,
    alerts: Vec<PriceDrop>,
    started: Instant,
}

impl Default for RunStats {
    fn default() -> Self {
        Self {
            succeeded: 0,
            failed: 0,
            alerts: Vec::new(),
            started: Instant::now(),
        }
    }
}

impl RunStats {
    /// Creates a tracker with zero counts, starting the clock now.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_success(&mut self) {
        self.succeeded += 1;
    }

    pub(crate) fn record_failure(&mut self) {
        self.failed += 1;
    }

    pub(crate) fn record_drop(&mut self, drop: PriceDrop) {
        self.alerts.push(drop);
    }

    /// Final counters with the elapsed time.
    #[must_use]
    pub fn report(self) -> RunReport {
        RunReport {
            succeeded: self.succeeded,
            failed: self.failed,
            alerts: self.alerts,
            elapsed: self.started.elapsed(),
        }
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Sources whose record was stored.
    pub succeeded: usize,
    /// Sources skipped after a fetch, parse or store failure.
    pub failed: usize,
    /// Drop alerts raised, in source order.
    pub alerts: Vec<PriceDrop>,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

impl RunReport {
    /// Number of sources processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Number of drop alerts raised.
    #[must_use]
    pub fn drops(&self) -> usize {
        self.alerts.len()
    }

    /// Process exit outcome for this run.
    #[must_use]
    pub fn exit_outcome(&self) -> ExitOutcome {
        determine_exit_outcome(self.succeeded, self.failed)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Run complete: {} succeeded, {} failed ({:.1}s)",
            self.succeeded,
            self.failed,
            self.elapsed.as_secs_f64()
        )
    }
}

/// How the process should exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// No source failed.
    Success,
    /// Some sources failed, some succeeded.
    Partial,
    /// Every source failed.
    Failure,
    /// The run could not start.
    Fatal,
}

impl ExitOutcome {
    /// Numeric process exit code.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Partial => 1,
            Self::Failure => 2,
            Self::Fatal => 3,
        }
    }
}

/// Maps run counts to an exit outcome.
#[must_use]
pub fn determine_exit_outcome(succeeded: usize, failed: usize) -> ExitOutcome {
    if failed == 0 {
        ExitOutcome::Success
    } else if succeeded > 0 {
        ExitOutcome::Partial
    } else {
        ExitOutcome::Failure
    }
}
