//! Error types for the routing crate.

use oddiya_geo::GeoError;
use oddiya_places::StoreError;
use oddiya_search::SearchError;
use thiserror::Error;

/// Result type alias for routing operations.
pub type Result<T> = std::result::Result<T, RouteError>;

/// Errors that can occur during route and meeting-point calculations.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A route needs at least one place ID
    #[error("route requires at least one place")]
    EmptyRoute,

    /// A meeting point needs at least one location
    #[error("meeting point requires at least one location")]
    NoLocations,

    /// Invalid input coordinate
    #[error(transparent)]
    InvalidCoordinate(#[from] GeoError),

    /// A referenced place could not be resolved
    #[error("place not found: {id}")]
    PlaceNotFound { id: String },

    /// Nearby-place lookup failed
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Backing store failure while resolving places
    #[error(transparent)]
    Store(#[from] StoreError),
}
