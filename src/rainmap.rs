//! The main entry point for consuming rainfall station telemetry.
//! A [`Rainmap`] client fetches raw readings from the upstream API,
//! reduces them to the canonical station set, and always hands the
//! rendering layer something it can draw — live data when the upstream
//! answers, deterministic sample data with a degraded-mode notice when
//! it does not.

use crate::error::RainmapError;
use crate::fetch::fallback::{fallback_stations, DEFAULT_FALLBACK_SEED};
use crate::fetch::fetcher::{
    ResilientFetcher, DEFAULT_ATTEMPT_TIMEOUT, DEFAULT_BASE_DELAY, DEFAULT_MAX_RETRIES,
};
use crate::fetch::generation::GenerationCounter;
use crate::scale::RainfallScale;
use crate::stations::reduce::reduce_readings;
use crate::types::outcome::{DataStatus, FetchOutcome};
use bon::bon;
use log::warn;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:2004/api";

/// The client for the rainfall telemetry pipeline.
///
/// Construction uses a builder; every knob is optional:
///
/// ```no_run
/// use rainmap::Rainmap;
/// use std::time::Duration;
///
/// let client = Rainmap::builder()
///     .base_url("http://localhost:2004/api")
///     .max_retries(3)
///     .base_delay(Duration::from_secs(1))
///     .attempt_timeout(Duration::from_secs(10))
///     .build();
/// ```
///
/// The two query methods, [`current_stations`] and
/// [`stations_by_province`], run the whole pipeline: fetch with
/// retry/backoff, reduce to one validated [`Station`](crate::Station)
/// per id, and attach a [`DataStatus`]. On upstream exhaustion they
/// return synthetic stations plus [`DataStatus::Degraded`] instead of an
/// error, so consumers always receive a renderable set.
///
/// Rapid re-queries are safe: each logical query tracks a request
/// generation, and a response that was superseded while in flight comes
/// back as [`RainmapError::Superseded`], which callers simply drop.
///
/// [`current_stations`]: Rainmap::current_stations
/// [`stations_by_province`]: Rainmap::stations_by_province
#[derive(Debug)]
pub struct Rainmap {
    fetcher: ResilientFetcher,
    base_url: String,
    scale: RainfallScale,
    fallback_seed: u64,
    current_track: GenerationCounter,
    province_track: GenerationCounter,
}

#[bon]
impl Rainmap {
    /// Builds a client.
    ///
    /// # Arguments
    ///
    /// * `.base_url(...)`: Optional. Upstream API root. Defaults to the
    ///   local backend (`http://localhost:2004/api`).
    /// * `.max_retries(u32)`: Optional. Total attempts per request,
    ///   minimum 1. Defaults to 3.
    /// * `.base_delay(Duration)`: Optional. Backoff unit; attempt `n`
    ///   waits `base_delay * n` before retrying. Defaults to 1s.
    /// * `.attempt_timeout(Duration)`: Optional. Hard cancellation
    ///   timeout per attempt. Defaults to 10s.
    /// * `.fallback_seed(u64)`: Optional. Seed for degraded-mode
    ///   synthetic data; fix it for reproducible tests.
    /// * `.scale(RainfallScale)`: Optional. Bucket table used by
    ///   downstream classification; defaults to the standard legend.
    #[builder]
    pub fn new(
        #[builder(into)] base_url: Option<String>,
        max_retries: Option<u32>,
        base_delay: Option<Duration>,
        attempt_timeout: Option<Duration>,
        fallback_seed: Option<u64>,
        scale: Option<RainfallScale>,
    ) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            fetcher: ResilientFetcher::new(
                max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
                base_delay.unwrap_or(DEFAULT_BASE_DELAY),
                attempt_timeout.unwrap_or(DEFAULT_ATTEMPT_TIMEOUT),
            ),
            base_url: base_url.trim_end_matches('/').to_string(),
            scale: scale.unwrap_or_default(),
            fallback_seed: fallback_seed.unwrap_or(DEFAULT_FALLBACK_SEED),
            current_track: GenerationCounter::new(),
            province_track: GenerationCounter::new(),
        }
    }

    /// The bucket table this client was built with, for legends and
    /// per-station styling.
    pub fn scale(&self) -> &RainfallScale {
        &self.scale
    }

    /// Fetches the current reading of every station.
    ///
    /// # Returns
    ///
    /// A [`FetchOutcome`] whose stations are canonical (deduplicated,
    /// coordinate-validated, defaults applied). `status` says whether
    /// they are live or synthetic fallback data.
    ///
    /// # Errors
    ///
    /// Only [`RainmapError::Superseded`], when a newer
    /// `current_stations` call was issued while this one was in flight.
    /// Upstream failures do not surface here — they degrade.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use rainmap::{Rainmap, RainmapError, RainfallStats};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), RainmapError> {
    /// let client = Rainmap::builder().build();
    /// let outcome = client.current_stations().await?;
    ///
    /// if let Some(notice) = outcome.status.notice() {
    ///     eprintln!("degraded: {notice}");
    /// }
    /// let stats = RainfallStats::aggregate(&outcome.stations, client.scale());
    /// println!("{} stations, {} with rain", stats.total, stats.with_rain);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn current_stations(&self) -> Result<FetchOutcome, RainmapError> {
        let url = format!("{}/station-rain", self.base_url);
        self.run_query(&self.current_track, url, Vec::new()).await
    }

    /// Fetches current readings for the stations of one province.
    ///
    /// Tracks its own request generation, independent of
    /// [`current_stations`](Rainmap::current_stations) — the two query
    /// kinds never supersede each other.
    ///
    /// # Errors
    ///
    /// Only [`RainmapError::Superseded`]; see
    /// [`current_stations`](Rainmap::current_stations).
    pub async fn stations_by_province(
        &self,
        province: &str,
    ) -> Result<FetchOutcome, RainmapError> {
        let url = format!("{}/provinces/stations", self.base_url);
        let query = vec![("province".to_string(), province.to_string())];
        self.run_query(&self.province_track, url, query).await
    }

    async fn run_query(
        &self,
        track: &GenerationCounter,
        url: String,
        query: Vec<(String, String)>,
    ) -> Result<FetchOutcome, RainmapError> {
        let generation = track.begin();
        let result = self.fetcher.fetch_readings(&url, &query).await;

        if !track.is_current(generation) {
            // A newer request owns consumer state now; whatever this one
            // brought back is stale.
            return Err(RainmapError::Superseded);
        }

        match result {
            Ok(readings) => Ok(FetchOutcome {
                stations: reduce_readings(&readings),
                status: DataStatus::Live,
            }),
            Err(error) => {
                warn!("serving fallback data after exhausted retries: {error}");
                Ok(FetchOutcome {
                    stations: fallback_stations(self.fallback_seed),
                    status: DataStatus::Degraded {
                        notice: error.notice(),
                    },
                })
            }
        }
    }
}

impl Default for Rainmap {
    fn default() -> Self {
        Rainmap::builder().build()
    }
}
