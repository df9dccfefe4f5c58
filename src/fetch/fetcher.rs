//! The retrying upstream fetcher. One instance per client; each call is
//! an independent request with bounded retries and linear backoff.

use crate::fetch::error::FetchError;
use crate::types::raw_reading::{RawReading, ReadingBatch};
use log::{info, warn};
use reqwest::Client;
use std::time::Duration;

pub(crate) const DEFAULT_MAX_RETRIES: u32 = 3;
pub(crate) const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);
pub(crate) const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches raw readings from the upstream API with bounded retries.
///
/// Per request the state machine is
/// `Fetching → {Success | RetryPending → Fetching → ... → Exhausted}`:
/// every attempt runs under a hard timeout, a failed attempt waits
/// `base_delay * attempt_number` before the next one, and after
/// `max_retries` attempts the last error is returned. Degrading to
/// fallback data is the caller's job — this type only reports the
/// failure.
#[derive(Debug, Clone)]
pub struct ResilientFetcher {
    client: Client,
    max_retries: u32,
    base_delay: Duration,
    attempt_timeout: Duration,
}

impl ResilientFetcher {
    /// `max_retries` is the total number of attempts and is clamped to
    /// at least one.
    pub fn new(max_retries: u32, base_delay: Duration, attempt_timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            max_retries: max_retries.max(1),
            base_delay,
            attempt_timeout,
        }
    }

    /// Fetches and decodes a batch of raw readings from `url` with the
    /// given query parameters.
    ///
    /// # Errors
    ///
    /// Returns the last [`FetchError`] only after every attempt failed;
    /// transient failures that a retry recovers from are logged, not
    /// returned.
    pub async fn fetch_readings(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<Vec<RawReading>, FetchError> {
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            let outcome = match tokio::time::timeout(
                self.attempt_timeout,
                self.attempt(url, query),
            )
            .await
            {
                Ok(result) => result,
                // The attempt future is dropped here: a timed-out
                // attempt is cancelled outright, not awaited further.
                Err(_) => Err(FetchError::Timeout {
                    url: url.to_string(),
                    timeout: self.attempt_timeout,
                    attempt,
                }),
            };

            match outcome {
                Ok(readings) => {
                    if attempt > 1 {
                        info!("upstream recovered on attempt {attempt} for {url}");
                    }
                    return Ok(readings);
                }
                Err(error) => {
                    warn!(
                        "attempt {attempt}/{} failed for {url}: {error}",
                        self.max_retries
                    );
                    last_error = Some(error);
                    if attempt < self.max_retries {
                        tokio::time::sleep(self.base_delay * attempt).await;
                    }
                }
            }
        }

        // max_retries >= 1, so the loop ran and recorded an error.
        Err(last_error.expect("at least one attempt was made"))
    }

    async fn attempt(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<Vec<RawReading>, FetchError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => {
                return Err(if let Some(status) = e.status() {
                    FetchError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    FetchError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        let batch = response
            .json::<ReadingBatch>()
            .await
            .map_err(|e| FetchError::InvalidBody {
                url: url.to_string(),
                source: e,
            })?;
        Ok(batch.into_readings())
    }
}
