mod error;
mod fetch;
mod filtering;
mod rainmap;
mod scale;
mod stations;
mod stats;
mod types;

pub use error::RainmapError;
pub use rainmap::*;

pub use fetch::error::FetchError;
pub use fetch::fetcher::ResilientFetcher;
pub use fetch::generation::{GenerationCounter, RequestGeneration};

pub use filtering::StationFilter;
pub use scale::{Bucket, RainfallScale};
pub use stats::{by_province, top_rainfall, BucketCount, ProvinceSummary, RainfallStats};

pub use stations::coordinates::is_valid_coordinate;
pub use stations::reduce::reduce_readings;

pub use types::outcome::{DataStatus, FetchOutcome};
pub use types::raw_reading::RawReading;
pub use types::station::Station;
