//! The rainfall-intensity scale: an ordered table of labeled, colored
//! buckets partitioning `[0, ∞)`, used for marker coloring, the map
//! legend, and per-bucket statistics.
//!
//! The table is an immutable configuration value: build it once (or use
//! [`RainfallScale::default`]) and share it by reference. Buckets are
//! half-open `[min, next_min)`, so a value sitting exactly on an edge
//! belongs to the *upper* bucket; the last bucket is unbounded above.

use crate::error::RainmapError;

/// One labeled sub-range of rainfall intensity.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    /// Inclusive lower edge in millimeters. The upper edge is the next
    /// bucket's `min` (exclusive), or infinity for the last bucket.
    pub min: f64,
    /// Legend label, e.g. `"5-15 mm"`.
    pub label: String,
    /// Display color as a hex string, e.g. `"#FFFF00"`.
    pub color: String,
}

/// Default legend: lower edge, label, color.
const DEFAULT_BUCKETS: [(f64, &str, &str); 9] = [
    (0.0, "0 mm", "#FFFFFF"),
    (0.1, "0.1-5 mm", "#90EE90"),
    (5.0, "5-15 mm", "#FFFF00"),
    (15.0, "15-25 mm", "#FFA500"),
    (25.0, "25-40 mm", "#FF6347"),
    (40.0, "40-60 mm", "#FF1493"),
    (60.0, "60-80 mm", "#8B008B"),
    (80.0, "80-100 mm", "#4B0082"),
    (100.0, "100+ mm", "#8B0000"),
];

const DEFAULT_MIN_RADIUS: f64 = 4.0;
const DEFAULT_MAX_RADIUS: f64 = 12.0;

/// An ordered, gap-free partition of `[0, ∞)` into rainfall buckets.
///
/// # Examples
///
/// ```
/// use rainmap::RainfallScale;
///
/// let scale = RainfallScale::default();
/// // Edge values belong to the upper bucket.
/// assert_eq!(scale.classify(5.0).label, "5-15 mm");
/// assert_eq!(scale.classify(4.9).label, "0.1-5 mm");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RainfallScale {
    buckets: Vec<Bucket>,
    min_radius: f64,
    max_radius: f64,
}

impl Default for RainfallScale {
    fn default() -> Self {
        let buckets = DEFAULT_BUCKETS
            .iter()
            .map(|&(min, label, color)| Bucket {
                min,
                label: label.to_string(),
                color: color.to_string(),
            })
            .collect();
        // The table above is ascending with a 0.0 first edge, so this
        // cannot fail validation.
        Self {
            buckets,
            min_radius: DEFAULT_MIN_RADIUS,
            max_radius: DEFAULT_MAX_RADIUS,
        }
    }
}

impl RainfallScale {
    /// Builds a custom scale from a bucket table.
    ///
    /// The table must be non-empty, start at a lower edge of exactly
    /// `0.0`, and have strictly ascending finite edges; anything else is
    /// rejected so that every non-negative value maps to exactly one
    /// bucket.
    ///
    /// # Errors
    ///
    /// Returns [`RainmapError::InvalidScale`] describing the violated
    /// rule.
    pub fn new(buckets: Vec<Bucket>) -> Result<Self, RainmapError> {
        if buckets.is_empty() {
            return Err(RainmapError::InvalidScale {
                reason: "bucket table is empty".to_string(),
            });
        }
        if buckets[0].min != 0.0 {
            return Err(RainmapError::InvalidScale {
                reason: format!(
                    "first bucket must start at 0.0, got {}",
                    buckets[0].min
                ),
            });
        }
        for pair in buckets.windows(2) {
            if !pair[1].min.is_finite() || pair[1].min <= pair[0].min {
                return Err(RainmapError::InvalidScale {
                    reason: format!(
                        "bucket edges must ascend strictly: {} then {}",
                        pair[0].min, pair[1].min
                    ),
                });
            }
        }
        Ok(Self {
            buckets,
            min_radius: DEFAULT_MIN_RADIUS,
            max_radius: DEFAULT_MAX_RADIUS,
        })
    }

    /// Replaces the marker radius range used by [`marker_radius`].
    ///
    /// [`marker_radius`]: RainfallScale::marker_radius
    ///
    /// # Errors
    ///
    /// Returns [`RainmapError::InvalidScale`] when the range is empty,
    /// non-positive, or non-finite.
    pub fn with_marker_radii(
        mut self,
        min_radius: f64,
        max_radius: f64,
    ) -> Result<Self, RainmapError> {
        if !(min_radius.is_finite() && max_radius.is_finite())
            || min_radius <= 0.0
            || max_radius < min_radius
        {
            return Err(RainmapError::InvalidScale {
                reason: format!(
                    "invalid marker radius range [{min_radius}, {max_radius}]"
                ),
            });
        }
        self.min_radius = min_radius;
        self.max_radius = max_radius;
        Ok(self)
    }

    /// The bucket table, ascending by lower edge.
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Index of the bucket containing `value`.
    ///
    /// Values `<= 0` (including sensor sign noise and non-finite junk)
    /// land in the first bucket.
    pub fn bucket_index(&self, value: f64) -> usize {
        let v = if value.is_finite() && value > 0.0 {
            value
        } else {
            0.0
        };
        // Last bucket whose lower edge is <= v. The first edge is 0.0,
        // so the search cannot miss for v >= 0.
        self.buckets.iter().rposition(|b| v >= b.min).unwrap_or(0)
    }

    /// The bucket containing `value`; see [`bucket_index`] for the edge
    /// rules.
    ///
    /// [`bucket_index`]: RainfallScale::bucket_index
    pub fn classify(&self, value: f64) -> &Bucket {
        &self.buckets[self.bucket_index(value)]
    }

    /// Map-marker radius for a rainfall value: grows linearly with the
    /// value and clamps to the configured radius range. Monotone,
    /// deterministic, presentation-only.
    pub fn marker_radius(&self, value: f64) -> f64 {
        let v = if value.is_finite() { value.max(0.0) } else { 0.0 };
        (v * 0.2 + self.min_radius).clamp(self.min_radius, self.max_radius)
    }
}
