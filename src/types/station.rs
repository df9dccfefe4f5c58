//! The canonical station reading: deduplicated, validated, ready for the
//! rendering layer. Stations are value objects recomputed from scratch on
//! every fetch cycle; there is no update-in-place.

use crate::stations::coordinates::is_valid_coordinate;
use crate::types::raw_reading::RawReading;
use chrono::NaiveDateTime;
use log::debug;
use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_CODE: &str = "N/A";
pub(crate) const DEFAULT_NAME: &str = "Unknown";
pub(crate) const DEFAULT_PROVINCE: &str = "Unknown";

/// A single weather station's current rainfall reading.
///
/// Invariants, upheld by [`Station::from_reading`] and the reducer:
/// `latitude`/`longitude` pass [`is_valid_coordinate`], and `rain_value`
/// is finite and `>= 0` (never `NaN`, never negative).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// Stable identifier, unique within one canonical set.
    pub id: String,
    /// Short display code; `"N/A"` when the upstream omits it.
    pub code: String,
    /// Display name, preferring the local-language spelling; `"Unknown"`
    /// when absent.
    pub name: String,
    /// Decimal degrees, positive north.
    pub latitude: f64,
    /// Decimal degrees, positive east.
    pub longitude: f64,
    /// Rainfall in millimeters; unparseable upstream values coerce to 0.
    pub rain_value: f64,
    /// Timestamp of the retained reading. `None` (an undated upstream
    /// row) sorts earliest, so any dated reading outranks it.
    pub observed_at: Option<NaiveDateTime>,
    /// Province display name; `"Unknown"` when absent.
    pub province: String,
}

impl Station {
    /// Builds a canonical station from one raw upstream record.
    ///
    /// This is the single place raw fields are coerced: missing
    /// code/name/province get their documented defaults, unusable
    /// rainfall becomes `0.0`, and negative sign noise is clamped to
    /// `0.0`.
    ///
    /// Returns `None` (and logs at debug level) when the record cannot
    /// become a station at all: no usable id, or coordinates that fail
    /// [`is_valid_coordinate`]. Such records are dropped entirely — they
    /// never act as a stale candidate for deduplication.
    pub fn from_reading(reading: &RawReading) -> Option<Station> {
        let (latitude, longitude) = match (reading.latitude, reading.longitude) {
            (Some(lat), Some(lon)) if is_valid_coordinate(lat, lon) => (lat, lon),
            _ => {
                debug!(
                    "skipping reading with unusable coordinates {:?}/{:?} (station {:?})",
                    reading.latitude, reading.longitude, reading.station_id
                );
                return None;
            }
        };
        let Some(id) = reading.station_id.clone() else {
            debug!("skipping reading without a station id");
            return None;
        };

        let rain = reading.rain().unwrap_or(0.0);
        let rain_value = if rain.is_finite() && rain > 0.0 { rain } else { 0.0 };

        Some(Station {
            id,
            code: reading
                .station_code
                .clone()
                .unwrap_or_else(|| DEFAULT_CODE.to_string()),
            name: reading
                .name_local
                .clone()
                .or_else(|| reading.name.clone())
                .unwrap_or_else(|| DEFAULT_NAME.to_string()),
            latitude,
            longitude,
            rain_value,
            observed_at: reading.observed_at(),
            province: reading
                .province_name
                .clone()
                .or_else(|| reading.province.clone())
                .unwrap_or_else(|| DEFAULT_PROVINCE.to_string()),
        })
    }

    /// True when any rain was recorded.
    pub fn has_rain(&self) -> bool {
        self.rain_value > 0.0
    }
}
