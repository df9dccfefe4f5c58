//! Collapses a raw upstream batch into the canonical station set: one
//! station per id, latest reading wins, invalid records dropped.

use crate::types::raw_reading::RawReading;
use crate::types::station::Station;
use log::debug;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Deduplicates a batch of raw readings into canonical stations.
///
/// For every id the reading with the latest `observed_at` is retained;
/// an undated reading never replaces a dated one. Records that fail
/// coordinate validation or lack an id are skipped silently (logged, not
/// raised) — a single bad record never aborts the batch.
///
/// Output order is not significant; callers must not rely on it.
///
/// # Examples
///
/// ```
/// use rainmap::{reduce_readings, RawReading};
/// use serde_json::json;
///
/// let readings: Vec<RawReading> = serde_json::from_value(json!([
///     { "StationID": 1, "Latitude": 21.0, "Longitude": 105.8,
///       "RainValue": "12.5", "DtDate": "2025-08-04T09:00" },
///     { "StationID": 1, "Latitude": 21.0, "Longitude": 105.8,
///       "RainValue": "15.0", "DtDate": "2025-08-04T10:00" },
/// ])).unwrap();
///
/// let stations = reduce_readings(&readings);
/// assert_eq!(stations.len(), 1);
/// assert_eq!(stations[0].rain_value, 15.0);
/// ```
pub fn reduce_readings(readings: &[RawReading]) -> Vec<Station> {
    let mut latest: HashMap<String, Station> = HashMap::with_capacity(readings.len());
    let mut dropped = 0usize;

    for reading in readings {
        let Some(station) = Station::from_reading(reading) else {
            dropped += 1;
            continue;
        };
        match latest.entry(station.id.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(station);
            }
            Entry::Occupied(mut slot) => {
                // Strictly later only; equal timestamps keep the first
                // record seen. None sorts before any Some.
                if station.observed_at > slot.get().observed_at {
                    slot.insert(station);
                }
            }
        }
    }

    if dropped > 0 {
        debug!(
            "dropped {dropped} of {} raw readings during reduction",
            readings.len()
        );
    }
    latest.into_values().collect()
}
