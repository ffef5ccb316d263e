//! Error types for the recommend crate.

use oddiya_places::StoreError;
use oddiya_search::SearchError;
use thiserror::Error;

/// Result type alias for recommendation operations.
pub type Result<T> = std::result::Result<T, RecommendError>;

/// Errors that can occur while computing recommendations.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// Candidate gathering failed (validation or store failure inside the
    /// per-anchor radius search)
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Backing store failure while resolving the existing places
    #[error(transparent)]
    Store(#[from] StoreError),
}
