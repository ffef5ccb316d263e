//! Bounding boxes derived from a center point and radius.
//!
//! A bounding box is the coarse prefilter used before exact haversine
//! refinement: any point within `radius_meters` of the center is guaranteed
//! to fall inside `BoundingBox::around(center, radius_meters)`.

use crate::Coordinate;

/// Meters per degree of latitude (and of longitude at the equator).
const METERS_PER_DEGREE: f64 = 111_320.0;

/// An axis-aligned latitude/longitude bounding box.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// The South Korea service region, used by the optional
    /// regional-validity check.
    pub const KOREA: BoundingBox = BoundingBox {
        min_lat: 33.0,
        max_lat: 38.6,
        min_lng: 125.0,
        max_lng: 131.9,
    };

    /// Builds the smallest box guaranteed to contain the circle of
    /// `radius_meters` around `center`.
    ///
    /// The longitude delta widens with latitude; near the poles the box
    /// degenerates to the full longitude range. Latitude bounds are clamped
    /// to [-90, 90].
    pub fn around(center: &Coordinate, radius_meters: f64) -> Self {
        let lat_delta = radius_meters / METERS_PER_DEGREE;

        // Longitude degrees shrink with cos(latitude); the worst case over
        // the box is the latitude edge farthest from the equator.
        let edge_lat = if center.latitude >= 0.0 {
            (center.latitude + lat_delta).min(90.0)
        } else {
            (center.latitude - lat_delta).max(-90.0)
        };
        let cos_lat = edge_lat.to_radians().cos();
        let lng_delta = if cos_lat < 1e-6 {
            360.0
        } else {
            radius_meters / (METERS_PER_DEGREE * cos_lat)
        };

        Self {
            min_lat: (center.latitude - lat_delta).max(-90.0),
            max_lat: (center.latitude + lat_delta).min(90.0),
            min_lng: (center.longitude - lng_delta).max(-180.0),
            max_lng: (center.longitude + lng_delta).min(180.0),
        }
    }

    /// Returns true when the coordinate lies inside the box (inclusive).
    #[inline]
    pub fn contains(&self, coord: &Coordinate) -> bool {
        coord.latitude >= self.min_lat
            && coord.latitude <= self.max_lat
            && coord.longitude >= self.min_lng
            && coord.longitude <= self.max_lng
    }

    /// The center point of the box.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::haversine_distance_meters;

    const SEOUL: Coordinate = Coordinate { latitude: 37.5665, longitude: 126.9780 };

    #[test]
    fn test_around_contains_center() {
        let bbox = BoundingBox::around(&SEOUL, 5_000.0);
        assert!(bbox.contains(&SEOUL));
    }

    #[test]
    fn test_around_contains_circle() {
        let bbox = BoundingBox::around(&SEOUL, 5_000.0);
        // Walk the circle rim at 30-degree steps; every rim point must be
        // inside the prefilter box.
        for step in 0..12 {
            let theta = f64::from(step) * 30.0_f64.to_radians();
            let lat = SEOUL.latitude + (5_000.0 / 111_320.0) * theta.cos();
            let lng = SEOUL.longitude
                + (5_000.0 / (111_320.0 * SEOUL.latitude.to_radians().cos())) * theta.sin();
            let rim = Coordinate::new(lat, lng);
            assert!(bbox.contains(&rim), "rim point {:?} escaped the box", rim);
            assert!(haversine_distance_meters(&SEOUL, &rim) <= 5_100.0);
        }
    }

    #[test]
    fn test_contains_excludes_outside() {
        let bbox = BoundingBox::around(&SEOUL, 1_000.0);
        assert!(!bbox.contains(&Coordinate::new(35.1796, 129.0756))); // Busan
    }

    #[test]
    fn test_clamps_at_poles() {
        let near_pole = Coordinate::new(89.99, 0.0);
        let bbox = BoundingBox::around(&near_pole, 50_000.0);
        assert!(bbox.max_lat <= 90.0);
        assert_eq!(bbox.min_lng, -180.0);
        assert_eq!(bbox.max_lng, 180.0);
    }

    #[test]
    fn test_korea_bounds() {
        assert!(BoundingBox::KOREA.contains(&SEOUL));
        assert!(!BoundingBox::KOREA.contains(&Coordinate::new(35.6762, 139.6503))); // Tokyo
    }

    #[test]
    fn test_center() {
        let bbox = BoundingBox::around(&SEOUL, 2_000.0);
        let center = bbox.center();
        assert!((center.latitude - SEOUL.latitude).abs() < 1e-9);
        assert!((center.longitude - SEOUL.longitude).abs() < 1e-9);
    }
}
