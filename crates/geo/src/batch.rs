//! Batch distance calculations with optional parallelism.
//!
//! The radius-search refinement step computes one haversine distance per
//! candidate place; this module fans that out over all candidates, in
//! parallel when the `parallel` feature is enabled.

use crate::{haversine_distance_meters, Coordinate};

/// Calculates distances in meters from a center to every point.
///
/// Output order matches input order.
///
/// # Example
/// ```
/// use oddiya_geo::{batch, Coordinate};
///
/// let center = Coordinate::new(37.5665, 126.9780);
/// let points = vec![
///     Coordinate::new(37.5700, 126.9800),
///     Coordinate::new(37.5600, 126.9700),
/// ];
///
/// let distances = batch::distances(&center, &points);
/// assert_eq!(distances.len(), 2);
/// assert!(distances.iter().all(|d| *d < 1_500.0));
/// ```
pub fn distances(center: &Coordinate, points: &[Coordinate]) -> Vec<f64> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        points
            .par_iter()
            .map(|p| haversine_distance_meters(center, p))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        points
            .iter()
            .map(|p| haversine_distance_meters(center, p))
            .collect()
    }
}

/// Calculates distances and keeps only the indices within `radius_meters`.
///
/// Returns `(index, distance_meters)` pairs in input order; the caller owns
/// any further sorting.
pub fn within_radius(
    center: &Coordinate,
    points: &[Coordinate],
    radius_meters: f64,
) -> Vec<(usize, f64)> {
    distances(center, points)
        .into_iter()
        .enumerate()
        .filter(|(_, d)| *d <= radius_meters)
        .collect()
}
