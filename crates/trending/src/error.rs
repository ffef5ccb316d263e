//! Error types for the trending crate.

use oddiya_places::StoreError;
use thiserror::Error;

/// Result type alias for trending operations.
pub type Result<T> = std::result::Result<T, TrendingError>;

/// Errors that can occur during score aggregation and ranked listings.
#[derive(Debug, Error)]
pub enum TrendingError {
    /// Page size must be at least 1
    #[error("invalid page size: {0}")]
    InvalidPageSize(usize),

    /// Backing store failure. During aggregation this is only raised when
    /// listing the places; per-place failures are absorbed into the report.
    #[error(transparent)]
    Store(#[from] StoreError),
}
