/// Checks whether a latitude/longitude pair can be plotted.
///
/// Rejects non-finite values, values outside the geographic ranges
/// `[-90, 90]` / `[-180, 180]`, and the exact pair `(0, 0)` — the upstream
/// feed reports `(0, 0)` for stations without a position fix, so it is
/// treated as "unset" rather than a point in the Gulf of Guinea.
///
/// # Examples
///
/// ```
/// use rainmap::is_valid_coordinate;
///
/// assert!(is_valid_coordinate(21.0285, 105.8542)); // Hanoi
/// assert!(!is_valid_coordinate(0.0, 0.0)); // "no fix" sentinel
/// assert!(!is_valid_coordinate(91.0, 105.0));
/// ```
pub fn is_valid_coordinate(lat: f64, lon: f64) -> bool {
    lat.is_finite()
        && lon.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lon)
        && !(lat == 0.0 && lon == 0.0)
}
