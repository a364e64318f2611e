//! Source fetching with retry and rotating browser identity.
//!
//! [`Fetcher::fetch`] never fails: after the retry budget is spent it returns
//! `None`, and the caller skips the source. Every failed attempt is logged
//! with the source URL and the attempt number.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use pricewatch_core::fetch::{Fetcher, HttpClient, RetryPolicy};
//! use pricewatch_core::pacing::RandomSource;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = Fetcher::new(
//!     HttpClient::new()?,
//!     RetryPolicy::default(),
//!     Arc::new(RandomSource::from_entropy()),
//! );
//! if let Some(content) = fetcher.fetch("https://example.com/api/price-feed").await {
//!     println!("{:?}", content.kind());
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod content;
mod error;
mod retry;

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::pacing::RandomSource;

pub use client::{DEFAULT_TIMEOUT_SECS, HttpClient};
pub use content::{RawContent, SourceKind};
pub use error::FetchError;
pub use retry::{
    DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY_MAX, DEFAULT_RETRY_DELAY_MIN, RetryDecision,
    RetryPolicy,
};

/// Fetches one source at a time, retrying failed attempts.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: HttpClient,
    retry_policy: RetryPolicy,
    random: Arc<RandomSource>,
}

impl Fetcher {
    /// Creates a fetcher from its collaborators.
    #[must_use]
    pub fn new(client: HttpClient, retry_policy: RetryPolicy, random: Arc<RandomSource>) -> Self {
        Self {
            client,
            retry_policy,
            random,
        }
    }

    /// Fetches `url`, retrying on any failure.
    ///
    /// Returns `None` once the retry budget is exhausted.
    #[instrument(skip(self), fields(url = %url, max_attempts = self.retry_policy.max_attempts()))]
    pub async fn fetch(&self, url: &str) -> Option<RawContent> {
        let mut attempt = 1;
        loop {
            let user_agent = self.random.user_agent();
            debug!(attempt, user_agent, "fetch attempt");

            match self.client.get(url, user_agent).await {
                Ok(content) => {
                    debug!(attempt, kind = ?content.kind(), "fetch succeeded");
                    return Some(content);
                }
                Err(error) => {
                    warn!(url = %url, attempt, error = %error, "fetch attempt failed");

                    match self.retry_policy.should_retry(attempt, &self.random) {
                        RetryDecision::Retry {
                            delay,
                            attempt: next_attempt,
                        } => {
                            if !delay.is_zero() {
                                tokio::time::sleep(delay).await;
                            }
                            attempt = next_attempt;
                        }
                        RetryDecision::DoNotRetry { reason } => {
                            warn!(url = %url, attempts = attempt, reason = %reason, "giving up on source");
                            return None;
                        }
                    }
                }
            }
        }
    }
}
