//! Sequential ingestion run over a list of sources.
//!
//! For each source the pipeline fetches, parses, checks for a price drop
//! against prior history and then stores the observation. A failure at any
//! step is counted and logged, and the run moves on to the next source.
//! Sources are spaced by a random pause; the store is closed when the run
//! ends.

mod stats;

pub use stats::{ExitOutcome, RunReport, RunStats, determine_exit_outcome};

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::detect::{DropDetector, PriceDrop};
use crate::fetch::Fetcher;
use crate::pacing::{DelayRange, RandomSource};
use crate::parser::parse_record;
use crate::store::PriceStore;

/// Default lower bound of the pause between sources.
pub const DEFAULT_PACING_MIN: Duration = Duration::from_millis(1200);

/// Default upper bound of the pause between sources.
pub const DEFAULT_PACING_MAX: Duration = Duration::from_millis(2500);

/// Why a single source produced no stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFailure {
    /// Every fetch attempt failed.
    Fetch,
    /// The fetch succeeded but returned nothing to parse.
    EmptyContent,
    /// No model/price pair could be extracted.
    Parse,
    /// The store rejected the record or failed to write it.
    Store,
}

/// Result of processing one source.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome {
    /// A record is in the store for this source. Carries the drop alert, if any.
    Stored {
        /// Drop relative to the previous stored price.
        drop: Option<PriceDrop>,
    },
    /// The source was skipped.
    Failed(SourceFailure),
}

/// One ingestion run.
#[derive(Debug)]
pub struct Pipeline {
    sources: Vec<String>,
    fetcher: Fetcher,
    store: PriceStore,
    detector: DropDetector,
    random: Arc<RandomSource>,
    pacing: DelayRange,
}

impl Pipeline {
    /// Creates a pipeline with the default drop threshold and pacing.
    #[must_use]
    pub fn new(
        sources: Vec<String>,
        fetcher: Fetcher,
        store: PriceStore,
        random: Arc<RandomSource>,
    ) -> Self {
        Self {
            sources,
            fetcher,
            store,
            detector: DropDetector::default(),
            random,
            pacing: DelayRange::new(DEFAULT_PACING_MIN, DEFAULT_PACING_MAX),
        }
    }

    /// Replaces the drop detector.
    #[must_use]
    pub fn with_detector(mut self, detector: DropDetector) -> Self {
        self.detector = detector;
        self
    }

    /// Replaces the pause range between sources.
    #[must_use]
    pub fn with_pacing(mut self, pacing: DelayRange) -> Self {
        self.pacing = pacing;
        self
    }

    /// Processes every source in order and closes the store.
    ///
    /// Never fails: per-source problems are counted in the returned report.
    pub async fn run(self) -> RunReport {
        let mut stats = RunStats::new();
        info!(sources = self.sources.len(), "ingestion run starting");

        for (index, url) in self.sources.iter().enumerate() {
            if index > 0 {
                let pause = self.random.delay(self.pacing);
                if !pause.is_zero() {
                    debug!(pause_ms = pause.as_millis(), "pacing before next source");
                    tokio::time::sleep(pause).await;
                }
            }

            match self.process_source(url).await {
                SourceOutcome::Stored { drop } => {
                    stats.record_success();
                    if let Some(drop) = drop {
                        stats.record_drop(drop);
                    }
                }
                SourceOutcome::Failed(reason) => {
                    warn!(url = %url, reason = ?reason, "source skipped");
                    stats.record_failure();
                }
            }
        }

        let report = stats.report();
        info!(
            succeeded = report.succeeded,
            failed = report.failed,
            drops = report.drops(),
            elapsed_ms = report.elapsed.as_millis(),
            "ingestion run complete"
        );

        self.store.close().await;
        report
    }

    /// Runs fetch, parse, drop check and insert for one source.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn process_source(&self, url: &str) -> SourceOutcome {
        let Some(content) = self.fetcher.fetch(url).await else {
            return SourceOutcome::Failed(SourceFailure::Fetch);
        };
        if content.is_empty() {
            return SourceOutcome::Failed(SourceFailure::EmptyContent);
        }

        let Some(record) = parse_record(&content, url) else {
            return SourceOutcome::Failed(SourceFailure::Parse);
        };

        // Compared against history before this observation is written.
        let drop = self
            .detector
            .check(&record.model, record.price, &self.store)
            .await;

        if self.store.insert(Some(&record)).await {
            SourceOutcome::Stored { drop }
        } else {
            SourceOutcome::Failed(SourceFailure::Store)
        }
    }
}
