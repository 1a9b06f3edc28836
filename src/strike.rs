//! At-the-money strike calculation.

/// Rounds `spot` to the nearest multiple of `step`.
///
/// Returns `None` for non-finite or non-positive prices and non-positive
/// steps, so callers can degrade to an empty analysis.
#[must_use]
pub fn atm_strike(spot: f64, step: i64) -> Option<i64> {
    if !spot.is_finite() || spot <= 0.0 || step <= 0 {
        return None;
    }
    let step_points = step as f64;
    Some(((spot / step_points).round() * step_points) as i64)
}
