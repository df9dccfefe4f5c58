//! Summary statistics over a canonical station set, for the legend and
//! summary panels. Everything here is a pure function of its inputs.

use crate::scale::RainfallScale;
use crate::types::station::Station;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// How many stations fell into one bucket of the scale.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketCount {
    pub label: String,
    pub color: String,
    pub count: usize,
}

/// Aggregate rainfall statistics for one station set.
///
/// All numeric fields are well-defined for the empty set: counts and
/// totals are zero and `average_rainfall`/`max_rainfall`/`min_rainfall`
/// are `0.0` — never `NaN` or an infinity.
#[derive(Debug, Clone, PartialEq)]
pub struct RainfallStats {
    pub total: usize,
    /// Stations with `rain_value > 0`.
    pub with_rain: usize,
    pub no_rain: usize,
    /// One entry per scale bucket, in scale order; counts sum to `total`.
    pub bucket_counts: Vec<BucketCount>,
    pub total_rainfall: f64,
    pub average_rainfall: f64,
    pub max_rainfall: f64,
    pub min_rainfall: f64,
    /// The station with the highest rainfall, when any rain fell at all.
    /// The first such station wins on ties.
    pub wettest_station: Option<Station>,
}

impl RainfallStats {
    /// Computes statistics over `stations`, tallying buckets with
    /// `scale`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rainmap::{RainfallScale, RainfallStats};
    ///
    /// let stats = RainfallStats::aggregate(&[], &RainfallScale::default());
    /// assert_eq!(stats.total, 0);
    /// assert_eq!(stats.average_rainfall, 0.0);
    /// ```
    pub fn aggregate(stations: &[Station], scale: &RainfallScale) -> RainfallStats {
        let total = stations.len();
        let with_rain = stations.iter().filter(|s| s.has_rain()).count();

        let mut counts = vec![0usize; scale.buckets().len()];
        for station in stations {
            counts[scale.bucket_index(station.rain_value)] += 1;
        }
        let bucket_counts = scale
            .buckets()
            .iter()
            .zip(counts)
            .map(|(bucket, count)| BucketCount {
                label: bucket.label.clone(),
                color: bucket.color.clone(),
                count,
            })
            .collect();

        let total_rainfall: f64 = stations.iter().map(|s| s.rain_value).sum();
        let average_rainfall = if total > 0 {
            total_rainfall / total as f64
        } else {
            0.0
        };
        let max_rainfall = stations.iter().map(|s| s.rain_value).fold(0.0, f64::max);
        let min_rainfall = if total == 0 {
            0.0
        } else {
            stations
                .iter()
                .map(|s| s.rain_value)
                .fold(f64::INFINITY, f64::min)
        };

        // min_by_key keeps the first of equal elements, so ties go to
        // the earliest station in the set.
        let wettest_station = stations
            .iter()
            .filter(|s| s.has_rain())
            .min_by_key(|s| Reverse(OrderedFloat(s.rain_value)))
            .cloned();

        RainfallStats {
            total,
            with_rain,
            no_rain: total - with_rain,
            bucket_counts,
            total_rainfall,
            average_rainfall,
            max_rainfall,
            min_rainfall,
            wettest_station,
        }
    }
}

/// The `n` stations with the highest rainfall, descending. Dry stations
/// are never "top"; ties keep their original relative order.
pub fn top_rainfall(stations: &[Station], n: usize) -> Vec<Station> {
    let mut rainy: Vec<Station> = stations
        .iter()
        .filter(|s| s.has_rain())
        .cloned()
        .collect();
    // Vec::sort_by_key is stable, which is what preserves tie order.
    rainy.sort_by_key(|s| Reverse(OrderedFloat(s.rain_value)));
    rainy.truncate(n);
    rainy
}

/// Per-province rollup for the province summary panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvinceSummary {
    pub stations: usize,
    pub with_rain: usize,
    pub total_rainfall: f64,
    pub average_rainfall: f64,
    pub max_rainfall: f64,
}

/// Groups stations by province name, sorted by name.
pub fn by_province(stations: &[Station]) -> BTreeMap<String, ProvinceSummary> {
    let mut grouped: BTreeMap<String, Vec<&Station>> = BTreeMap::new();
    for station in stations {
        grouped.entry(station.province.clone()).or_default().push(station);
    }

    grouped
        .into_iter()
        .map(|(province, members)| {
            let total_rainfall: f64 = members.iter().map(|s| s.rain_value).sum();
            let summary = ProvinceSummary {
                stations: members.len(),
                with_rain: members.iter().filter(|s| s.has_rain()).count(),
                total_rainfall,
                average_rainfall: total_rainfall / members.len() as f64,
                max_rainfall: members.iter().map(|s| s.rain_value).fold(0.0, f64::max),
            };
            (province, summary)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: &str, province: &str, rain: f64) -> Station {
        Station {
            id: id.to_string(),
            code: format!("ST{id}"),
            name: format!("Station {id}"),
            latitude: 21.0,
            longitude: 105.8,
            rain_value: rain,
            observed_at: None,
            province: province.to_string(),
        }
    }

    #[test]
    fn empty_set_yields_zeroes_not_nan() {
        let stats = RainfallStats::aggregate(&[], &RainfallScale::default());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.with_rain, 0);
        assert_eq!(stats.no_rain, 0);
        assert_eq!(stats.total_rainfall, 0.0);
        assert_eq!(stats.average_rainfall, 0.0);
        assert_eq!(stats.max_rainfall, 0.0);
        assert_eq!(stats.min_rainfall, 0.0);
        assert_eq!(stats.wettest_station, None);
        assert!(stats.bucket_counts.iter().all(|b| b.count == 0));
    }

    #[test]
    fn counts_totals_and_extremes() {
        let stations = vec![
            station("1", "Hà Nội", 0.0),
            station("2", "Hà Nội", 12.5),
            station("3", "Đà Nẵng", 42.0),
            station("4", "Cần Thơ", 3.5),
        ];
        let stats = RainfallStats::aggregate(&stations, &RainfallScale::default());

        assert_eq!(stats.total, 4);
        assert_eq!(stats.with_rain, 3);
        assert_eq!(stats.no_rain, 1);
        assert_eq!(stats.total_rainfall, 58.0);
        assert_eq!(stats.average_rainfall, 14.5);
        assert_eq!(stats.max_rainfall, 42.0);
        assert_eq!(stats.min_rainfall, 0.0);
        assert_eq!(stats.wettest_station.unwrap().id, "3");
    }

    #[test]
    fn every_station_lands_in_exactly_one_bucket() {
        let stations = vec![
            station("1", "A", 0.0),   // 0 mm
            station("2", "A", 0.5),   // 0.1-5 mm
            station("3", "A", 5.0),   // 5-15 mm (upper bucket at the edge)
            station("4", "A", 17.0),  // 15-25 mm
            station("5", "A", 120.0), // 100+ mm
        ];
        let stats = RainfallStats::aggregate(&stations, &RainfallScale::default());

        let count_for = |label: &str| {
            stats
                .bucket_counts
                .iter()
                .find(|b| b.label == label)
                .map(|b| b.count)
                .unwrap()
        };
        assert_eq!(count_for("0 mm"), 1);
        assert_eq!(count_for("0.1-5 mm"), 1);
        assert_eq!(count_for("5-15 mm"), 1);
        assert_eq!(count_for("15-25 mm"), 1);
        assert_eq!(count_for("100+ mm"), 1);

        let tallied: usize = stats.bucket_counts.iter().map(|b| b.count).sum();
        assert_eq!(tallied, stats.total);
    }

    #[test]
    fn top_rainfall_is_stable_and_excludes_dry_stations() {
        let stations = vec![
            station("1", "A", 10.0),
            station("2", "A", 0.0),
            station("3", "A", 25.0),
            station("4", "A", 10.0), // ties with "1"; must stay behind it
            station("5", "A", 7.0),
        ];

        let top = top_rainfall(&stations, 3);
        let ids: Vec<&str> = top.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["3", "1", "4"]);

        // Asking for more than exist returns only the rainy ones.
        assert_eq!(top_rainfall(&stations, 10).len(), 4);
        assert!(top_rainfall(&[], 5).is_empty());
    }

    #[test]
    fn province_rollup_groups_and_averages() {
        let stations = vec![
            station("1", "Hà Nội", 4.0),
            station("2", "Hà Nội", 0.0),
            station("3", "Đà Nẵng", 30.0),
        ];
        let rollup = by_province(&stations);

        assert_eq!(rollup.len(), 2);
        let hanoi = &rollup["Hà Nội"];
        assert_eq!(hanoi.stations, 2);
        assert_eq!(hanoi.with_rain, 1);
        assert_eq!(hanoi.total_rainfall, 4.0);
        assert_eq!(hanoi.average_rainfall, 2.0);
        assert_eq!(hanoi.max_rainfall, 4.0);

        let danang = &rollup["Đà Nẵng"];
        assert_eq!(danang.stations, 1);
        assert_eq!(danang.max_rainfall, 30.0);
    }
}
