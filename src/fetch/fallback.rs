//! Synthetic station data served when the upstream is unreachable, so
//! the map and charts stay populated in degraded mode.
//!
//! The set is deterministic: a fixed roster of plausible stations with
//! rain values drawn from a seeded xorshift64* stream, bounded to
//! `[0, 50)` mm like a typical live batch. Same seed, same output —
//! degraded-mode rendering is reproducible in tests.

use crate::types::station::Station;

/// Seed used when the caller does not supply one.
pub(crate) const DEFAULT_FALLBACK_SEED: u64 = 1;

/// id, code, name, latitude, longitude, province.
const FALLBACK_SITES: [(&str, &str, &str, f64, f64, &str); 5] = [
    ("1", "HN001", "Hà Nội", 21.0285, 105.8542, "Hà Nội"),
    ("2", "HCM001", "TP.HCM", 10.8231, 106.6297, "TP. Hồ Chí Minh"),
    ("3", "DN001", "Đà Nẵng", 16.0471, 108.2068, "Đà Nẵng"),
    ("4", "CT001", "Cần Thơ", 10.0452, 105.7469, "Cần Thơ"),
    ("5", "HP001", "Hải Phòng", 20.8449, 106.6881, "Hải Phòng"),
];

/// xorshift64*: small, seedable, good enough for plausible-looking
/// sample values. State must be non-zero.
fn next_u64(state: &mut u64) -> u64 {
    let mut x = *state;
    x ^= x >> 12;
    x ^= x << 25;
    x ^= x >> 27;
    *state = x;
    x.wrapping_mul(0x2545_F491_4F6C_DD1D)
}

/// A rain value in `[0, 50)` mm with one decimal, like the live feed
/// reports.
fn bounded_rain(state: &mut u64) -> f64 {
    let unit = (next_u64(state) >> 11) as f64 / (1u64 << 53) as f64;
    (unit * 500.0).floor() / 10.0
}

/// The deterministic synthetic station set for `seed`.
///
/// Always non-empty, always coordinate-valid, ids unique — the same
/// canonical shape a live batch reduces to.
pub(crate) fn fallback_stations(seed: u64) -> Vec<Station> {
    let mut state = if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed };
    FALLBACK_SITES
        .iter()
        .map(|&(id, code, name, latitude, longitude, province)| Station {
            id: id.to_string(),
            code: code.to_string(),
            name: name.to_string(),
            latitude,
            longitude,
            rain_value: bounded_rain(&mut state),
            observed_at: None,
            province: province.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stations::coordinates::is_valid_coordinate;
    use std::collections::HashSet;

    #[test]
    fn same_seed_same_stations() {
        assert_eq!(fallback_stations(42), fallback_stations(42));
        assert_eq!(
            fallback_stations(DEFAULT_FALLBACK_SEED),
            fallback_stations(DEFAULT_FALLBACK_SEED)
        );
    }

    #[test]
    fn different_seeds_differ() {
        let a: Vec<f64> = fallback_stations(1).iter().map(|s| s.rain_value).collect();
        let b: Vec<f64> = fallback_stations(2).iter().map(|s| s.rain_value).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn zero_seed_is_usable() {
        let stations = fallback_stations(0);
        assert_eq!(stations.len(), FALLBACK_SITES.len());
        assert_eq!(stations, fallback_stations(0));
    }

    #[test]
    fn output_is_a_valid_canonical_set() {
        let stations = fallback_stations(DEFAULT_FALLBACK_SEED);
        assert!(!stations.is_empty());

        let ids: HashSet<&str> = stations.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), stations.len(), "ids must be unique");

        for station in &stations {
            assert!(is_valid_coordinate(station.latitude, station.longitude));
            assert!(station.rain_value >= 0.0);
            assert!(station.rain_value < 50.0);
            assert!(station.rain_value.is_finite());
        }
    }
}
