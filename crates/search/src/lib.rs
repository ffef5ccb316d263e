//! Proximity search over the Oddiya place store.
//!
//! The pipeline: coarse bounding-box prefilter through the store, exact
//! haversine refinement, category/rating filters, deterministic ordering,
//! pagination. The store may answer the prefilter from a spatial index or
//! a full scan; results are identical either way because every candidate
//! is re-checked against the exact distance.
//!
//! # Example
//!
//! ```
//! use oddiya_geo::Coordinate;
//! use oddiya_places::{MemoryPlaceStore, Place, PlaceCategory};
//! use oddiya_search::{search_within_radius, SearchConfig, SearchFilter};
//!
//! let store = MemoryPlaceStore::new();
//! store.upsert(Place::new(
//!     "deli",
//!     "City Hall Deli",
//!     PlaceCategory::Restaurant,
//!     Coordinate::new(37.5700, 126.9800),
//! ));
//!
//! let filter = SearchFilter::new(Coordinate::new(37.5665, 126.9780));
//! let page = search_within_radius(&store, &filter, &SearchConfig::default()).unwrap();
//! assert_eq!(page.items.len(), 1);
//! ```

mod config;
mod error;
mod search;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use search::{area_statistics, places_within_radius, search_within_radius, AreaStatistics};

use oddiya_geo::Coordinate;
use oddiya_places::{Place, PlaceCategory};
pub use oddiya_places::Page;
use serde::{Deserialize, Serialize};

/// Default search radius in meters.
pub const DEFAULT_RADIUS_METERS: f64 = 5_000.0;

/// Default page size.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// A radius query against the place collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub center: Coordinate,
    /// Search radius in meters. Must be positive; the default is applied by
    /// [`SearchFilter::new`], never inside the search pipeline.
    pub radius_meters: f64,
    pub category: Option<PlaceCategory>,
    pub min_rating: Option<f64>,
    /// Zero-based page index.
    pub page: usize,
    pub page_size: usize,
}

impl SearchFilter {
    /// Creates a filter with the default radius and pagination.
    pub fn new(center: Coordinate) -> Self {
        Self {
            center,
            radius_meters: DEFAULT_RADIUS_METERS,
            category: None,
            min_rating: None,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Builder-style method to set the radius in meters.
    #[must_use]
    pub fn with_radius_meters(mut self, radius_meters: f64) -> Self {
        self.radius_meters = radius_meters;
        self
    }

    /// Builder-style method to restrict results to one category.
    #[must_use]
    pub fn with_category(mut self, category: PlaceCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Builder-style method to require a minimum rating.
    #[must_use]
    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = Some(min_rating);
        self
    }

    /// Builder-style method to select a page.
    #[must_use]
    pub fn with_page(mut self, page: usize, page_size: usize) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }
}

/// A place together with its exact distance from the query center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceWithDistance {
    pub place: Place,
    pub distance_meters: f64,
}
