//! Geographic primitives for Oddiya.
//!
//! This crate provides:
//! - Haversine distance and initial-bearing calculations
//! - Coordinate validation
//! - Bounding boxes derived from a search radius
//! - Batch distance processing with optional parallelism
//!
//! # Example
//!
//! ```
//! use oddiya_geo::{haversine_distance_meters, Coordinate};
//!
//! let city_hall = Coordinate::new(37.5665, 126.9780); // Seoul
//! let gangnam = Coordinate::new(37.4979, 127.0276);
//!
//! let distance = haversine_distance_meters(&city_hall, &gangnam);
//! assert!((distance - 8_800.0).abs() < 500.0); // ~8.8 km
//! ```

mod haversine;
mod bbox;
pub mod batch;
mod error;

pub use haversine::{
    bearing_degrees, cross_track_distance_meters, haversine_distance_meters, is_within_radius,
    EARTH_RADIUS_M,
};
pub use bbox::BoundingBox;
pub use batch::distances;
pub use error::{GeoError, Result};

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns true if the coordinate has valid, finite values.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }

    /// Validates the coordinate, rejecting out-of-range or non-finite values.
    pub fn validate(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(GeoError::InvalidCoordinate(format!(
                "({}, {})",
                self.latitude, self.longitude
            )))
        }
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(&self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}
