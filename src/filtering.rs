//! User-selected predicates over the canonical station set. All criteria
//! are optional and conjunctive; an absent criterion filters nothing out.

use crate::types::station::Station;

/// Filter criteria for a station set.
///
/// The default value matches every station. Criteria combine with AND
/// semantics; empty strings behave like absent criteria.
///
/// # Examples
///
/// ```
/// use rainmap::StationFilter;
///
/// let filter = StationFilter {
///     province: Some("Hà Nội".to_string()),
///     min_rainfall: Some(5.0),
///     ..StationFilter::default()
/// };
/// # let _ = filter;
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationFilter {
    /// Case-insensitive substring match against code, name, or id.
    pub search_text: Option<String>,
    /// Exact province match.
    pub province: Option<String>,
    /// Keep stations with `rain_value >= min_rainfall`.
    pub min_rainfall: Option<f64>,
    /// Keep stations with `rain_value <= max_rainfall`.
    pub max_rainfall: Option<f64>,
    /// Keep only stations with `rain_value > 0`.
    pub only_rainy: bool,
}

impl StationFilter {
    /// True when `station` satisfies every provided criterion.
    pub fn matches(&self, station: &Station) -> bool {
        if let Some(text) = &self.search_text {
            let needle = text.trim().to_lowercase();
            if !needle.is_empty() {
                let hit = station.code.to_lowercase().contains(&needle)
                    || station.name.to_lowercase().contains(&needle)
                    || station.id.to_lowercase().contains(&needle);
                if !hit {
                    return false;
                }
            }
        }
        if let Some(province) = &self.province {
            if !province.is_empty() && station.province != *province {
                return false;
            }
        }
        if let Some(min) = self.min_rainfall {
            if station.rain_value < min {
                return false;
            }
        }
        if let Some(max) = self.max_rainfall {
            if station.rain_value > max {
                return false;
            }
        }
        if self.only_rainy && !station.has_rain() {
            return false;
        }
        true
    }

    /// Applies the filter, returning the matching stations in their
    /// original order. Pure: the input is never mutated.
    pub fn apply(&self, stations: &[Station]) -> Vec<Station> {
        stations
            .iter()
            .filter(|station| self.matches(station))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: &str, name: &str, province: &str, rain: f64) -> Station {
        Station {
            id: id.to_string(),
            code: format!("ST{id}"),
            name: name.to_string(),
            latitude: 21.0,
            longitude: 105.8,
            rain_value: rain,
            observed_at: None,
            province: province.to_string(),
        }
    }

    fn sample() -> Vec<Station> {
        vec![
            station("1", "Láng", "Hà Nội", 0.0),
            station("2", "Tân Sơn Hòa", "TP. Hồ Chí Minh", 12.5),
            station("3", "Đà Nẵng", "Đà Nẵng", 42.0),
            station("4", "Hà Đông", "Hà Nội", 3.0),
        ]
    }

    #[test]
    fn default_filter_keeps_everything() {
        let stations = sample();
        assert_eq!(StationFilter::default().apply(&stations), stations);
    }

    #[test]
    fn search_is_case_insensitive_across_code_name_and_id() {
        let stations = sample();

        let by_name = StationFilter {
            search_text: Some("hà".to_string()),
            ..StationFilter::default()
        };
        let matched = by_name.apply(&stations);
        let names: Vec<&str> = matched.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Hà Đông"]);

        let by_code = StationFilter {
            search_text: Some("st2".to_string()),
            ..StationFilter::default()
        };
        assert_eq!(by_code.apply(&stations).len(), 1);

        let by_id = StationFilter {
            search_text: Some("3".to_string()),
            ..StationFilter::default()
        };
        assert!(by_id.apply(&stations).iter().any(|s| s.id == "3"));
    }

    #[test]
    fn province_match_is_exact() {
        let filter = StationFilter {
            province: Some("Hà Nội".to_string()),
            ..StationFilter::default()
        };
        let matched = filter.apply(&sample());
        assert_eq!(matched.len(), 2);
        assert!(matched.iter().all(|s| s.province == "Hà Nội"));
    }

    #[test]
    fn rainfall_bounds_are_inclusive() {
        let stations = sample();
        let min = StationFilter {
            min_rainfall: Some(12.5),
            ..StationFilter::default()
        };
        assert_eq!(min.apply(&stations).len(), 2);

        let max = StationFilter {
            max_rainfall: Some(12.5),
            ..StationFilter::default()
        };
        assert_eq!(max.apply(&stations).len(), 3);
    }

    #[test]
    fn only_rainy_drops_dry_stations() {
        let filter = StationFilter {
            only_rainy: true,
            ..StationFilter::default()
        };
        let matched = filter.apply(&sample());
        assert_eq!(matched.len(), 3);
        assert!(matched.iter().all(|s| s.has_rain()));
    }

    #[test]
    fn criteria_combine_with_and_semantics() {
        let filter = StationFilter {
            province: Some("Hà Nội".to_string()),
            only_rainy: true,
            ..StationFilter::default()
        };
        let matched = filter.apply(&sample());
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "Hà Đông");
    }

    #[test]
    fn empty_strings_are_no_ops() {
        let filter = StationFilter {
            search_text: Some("   ".to_string()),
            province: Some(String::new()),
            ..StationFilter::default()
        };
        assert_eq!(filter.apply(&sample()).len(), 4);
    }

    #[test]
    fn filtering_is_idempotent() {
        let filter = StationFilter {
            search_text: Some("h".to_string()),
            min_rainfall: Some(1.0),
            ..StationFilter::default()
        };
        let once = filter.apply(&sample());
        let twice = filter.apply(&once);
        assert_eq!(once, twice);
    }
}
