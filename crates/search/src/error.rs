//! Error types for the search crate.

use oddiya_geo::GeoError;
use oddiya_places::StoreError;
use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during a radius search.
///
/// Validation variants are raised before any store access; store failures
/// pass through unmodified.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Invalid center coordinate
    #[error(transparent)]
    InvalidCoordinate(#[from] GeoError),

    /// Radius must be positive and finite
    #[error("invalid radius: {0}m")]
    InvalidRadius(f64),

    /// Page size must be at least 1
    #[error("invalid page size: {0}")]
    InvalidPageSize(usize),

    /// Center falls outside the configured service region
    #[error("coordinate ({latitude}, {longitude}) is outside the service region")]
    OutsideRegion { latitude: f64, longitude: f64 },

    /// Backing store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}
