//! Recommendation scoring for Oddiya.
//!
//! Given the places already in a travel plan, rank nearby candidates by a
//! composite of proximity decay, normalized rating and category novelty.
//! Candidates are gathered with a radius search around every existing
//! place, deduplicated by their minimum distance to the plan, and never
//! include places the plan already contains.
//!
//! # Example
//!
//! ```
//! use oddiya_geo::Coordinate;
//! use oddiya_places::{MemoryPlaceStore, Place, PlaceCategory};
//! use oddiya_recommend::{recommend, RecommendationContext, ScoreWeights};
//!
//! let store = MemoryPlaceStore::new();
//! store.upsert(Place::new(
//!     "anchor",
//!     "City Hall Deli",
//!     PlaceCategory::Restaurant,
//!     Coordinate::new(37.5665, 126.9780),
//! ));
//! store.upsert(Place::new(
//!     "candidate",
//!     "Mugyo Coffee",
//!     PlaceCategory::Cafe,
//!     Coordinate::new(37.5670, 126.9785),
//! ));
//!
//! let ctx = RecommendationContext::new(vec!["anchor".to_string()]);
//! let ranked = recommend(&store, &ctx, &ScoreWeights::default()).unwrap();
//! assert_eq!(ranked[0].place.id, "candidate");
//! ```

mod error;
mod scorer;
mod weights;

pub use error::{RecommendError, Result};
pub use scorer::{recommend, ScoredPlace};
pub use weights::ScoreWeights;

use oddiya_places::PlaceCategory;
use serde::{Deserialize, Serialize};

/// Default candidate search radius in meters.
pub const DEFAULT_RADIUS_METERS: f64 = 2_000.0;

/// Default number of recommendations returned.
pub const DEFAULT_LIMIT: usize = 20;

/// The plan context recommendations are computed against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationContext {
    /// Places already in the plan.
    pub existing_place_ids: Vec<String>,
    /// Candidate search radius around each existing place.
    pub radius_meters: f64,
    /// Categories the caller does not want suggested.
    pub exclude_categories: Vec<PlaceCategory>,
    pub limit: usize,
}

impl RecommendationContext {
    /// Creates a context with the default radius and limit.
    pub fn new(existing_place_ids: Vec<String>) -> Self {
        Self {
            existing_place_ids,
            radius_meters: DEFAULT_RADIUS_METERS,
            exclude_categories: Vec::new(),
            limit: DEFAULT_LIMIT,
        }
    }

    /// Creates a context whose radius comes from
    /// `ODDIYA_RECOMMENDATION_RADIUS_METERS` when set and parsable.
    pub fn from_env(existing_place_ids: Vec<String>) -> Self {
        let radius_meters = std::env::var("ODDIYA_RECOMMENDATION_RADIUS_METERS")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|r: &f64| r.is_finite() && *r > 0.0)
            .unwrap_or(DEFAULT_RADIUS_METERS);

        Self {
            radius_meters,
            ..Self::new(existing_place_ids)
        }
    }

    /// Builder-style method to set the candidate radius.
    #[must_use]
    pub fn with_radius_meters(mut self, radius_meters: f64) -> Self {
        self.radius_meters = radius_meters;
        self
    }

    /// Builder-style method to exclude categories from the results.
    #[must_use]
    pub fn with_excluded_categories(mut self, categories: Vec<PlaceCategory>) -> Self {
        self.exclude_categories = categories;
        self
    }

    /// Builder-style method to cap the result count.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}
