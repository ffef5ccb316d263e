//! Haversine distance and bearing calculations.
//!
//! The Haversine formula calculates the great-circle distance between two
//! points on a sphere given their longitudes and latitudes. All distances
//! are in meters.

use crate::Coordinate;

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculates the great-circle distance between two coordinates in meters.
///
/// Uses the Haversine formula for accurate distance calculation on a sphere.
///
/// # Arguments
/// * `from` - Starting coordinate
/// * `to` - Ending coordinate
///
/// # Returns
/// Distance in meters
///
/// # Example
/// ```
/// use oddiya_geo::{haversine_distance_meters, Coordinate};
///
/// let seoul = Coordinate::new(37.5665, 126.9780);
/// let busan = Coordinate::new(35.1796, 129.0756);
///
/// let distance = haversine_distance_meters(&seoul, &busan);
/// assert!((distance - 325_000.0).abs() < 5_000.0);
/// ```
#[inline]
pub fn haversine_distance_meters(from: &Coordinate, to: &Coordinate) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Returns true when `point` lies within `radius_meters` of `center`.
#[inline]
pub fn is_within_radius(center: &Coordinate, point: &Coordinate, radius_meters: f64) -> bool {
    haversine_distance_meters(center, point) <= radius_meters
}

/// Calculates the initial great-circle bearing from `from` to `to`.
///
/// # Returns
/// Bearing in degrees, normalized to [0, 360). North is 0, east is 90.
#[inline]
pub fn bearing_degrees(from: &Coordinate, to: &Coordinate) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();
    let d_lon = lon2 - lon1;

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    y.atan2(x).to_degrees().rem_euclid(360.0)
}

/// Distance in meters from `point` to the great-circle segment `start`..`end`.
///
/// Points whose along-track projection falls before `start` or beyond `end`
/// are measured against the nearer endpoint instead of the infinite
/// great circle.
pub fn cross_track_distance_meters(
    point: &Coordinate,
    start: &Coordinate,
    end: &Coordinate,
) -> f64 {
    let d13 = haversine_distance_meters(start, point);
    if d13 == 0.0 {
        return 0.0;
    }

    let d12 = haversine_distance_meters(start, end);
    if d12 < 1e-9 {
        // Degenerate segment, fall back to point distance
        return d13;
    }

    let b13 = bearing_degrees(start, point).to_radians();
    let b12 = bearing_degrees(start, end).to_radians();

    let delta13 = d13 / EARTH_RADIUS_M;
    let cross = (delta13.sin() * (b13 - b12).sin()).asin();

    // Projection behind the start point
    if (b13 - b12).cos() < 0.0 {
        return d13;
    }

    // Projection beyond the end point
    let along = (delta13.cos() / cross.cos()).clamp(-1.0, 1.0).acos() * EARTH_RADIUS_M;
    if along > d12 {
        return haversine_distance_meters(end, point);
    }

    (cross * EARTH_RADIUS_M).abs()
}
