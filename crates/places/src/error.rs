//! Error types for the places crate.

use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by `PlaceStore` implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Referenced place ID does not exist (or is soft-deleted)
    #[error("place not found: {id}")]
    NotFound { id: String },

    /// Backing store failure, passed through with context
    #[error("store backend error ({context}): {source}")]
    Backend {
        /// What the store was doing when the backend failed
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl StoreError {
    /// Create a not-found error naming the offending ID.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Wrap a backend failure with context.
    pub fn backend(
        context: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Backend {
            context: context.into(),
            source: source.into(),
        }
    }
}
