//! Place model and store interface for Oddiya.
//!
//! This crate provides:
//! - The `Place` record and its fixed category taxonomy
//! - The `PlaceStore` trait that search, recommendation, routing and the
//!   popularity aggregator read from
//! - An in-memory reference store with an optional R-tree spatial index
//!
//! Search and recommendation only ever operate on searchable places:
//! verified and not soft-deleted. Store implementations uphold that
//! invariant at the query boundary so no caller has to re-check it.

mod error;
mod memory;
mod store;

pub use error::{Result, StoreError};
pub use memory::MemoryPlaceStore;
pub use store::{DailyEngagement, PlaceStore};

use oddiya_geo::Coordinate;
use serde::{Deserialize, Serialize};

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Zero-based page index this page was cut from.
    pub page: usize,
    pub page_size: usize,
    /// Total matches across all pages.
    pub total: usize,
}

impl<T> Page<T> {
    /// Cuts one page out of a fully sorted result list.
    pub fn from_sorted(all: Vec<T>, page: usize, page_size: usize) -> Self {
        let total = all.len();
        let items = all.into_iter().skip(page * page_size).take(page_size).collect();
        Self {
            items,
            page,
            page_size,
            total,
        }
    }

    /// Number of pages needed for `total` items.
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size.max(1))
    }

    /// True when this page carries no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Fixed category taxonomy for places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaceCategory {
    Restaurant,
    Cafe,
    Hotel,
    TouristAttraction,
    Shopping,
    Nature,
    Entertainment,
    Culture,
    Other,
}

impl PlaceCategory {
    /// Stable kebab-case name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Restaurant => "restaurant",
            Self::Cafe => "cafe",
            Self::Hotel => "hotel",
            Self::TouristAttraction => "tourist-attraction",
            Self::Shopping => "shopping",
            Self::Nature => "nature",
            Self::Entertainment => "entertainment",
            Self::Culture => "culture",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point of interest.
///
/// Engagement counters and the derived scores are written back by the
/// popularity aggregator; everything else is owned by the (out-of-scope)
/// CRUD layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub category: PlaceCategory,
    pub address: String,
    pub coordinate: Coordinate,
    /// Average rating in [0.0, 5.0], absent when the place has no reviews.
    pub rating: Option<f64>,
    pub review_count: u64,
    pub bookmark_count: u64,
    pub view_count: u64,
    /// Derived, recomputed by the aggregator. Always >= 0.
    pub popularity_score: f64,
    /// Derived, recency-weighted. Always >= 0.
    pub trend_score: f64,
    pub verified: bool,
    pub deleted: bool,
}

impl Place {
    /// Creates a verified place with zeroed counters.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: PlaceCategory,
        coordinate: Coordinate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            address: String::new(),
            coordinate,
            rating: None,
            review_count: 0,
            bookmark_count: 0,
            view_count: 0,
            popularity_score: 0.0,
            trend_score: 0.0,
            verified: true,
            deleted: false,
        }
    }

    /// Builder-style method to set the rating.
    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Builder-style method to set engagement counters.
    #[must_use]
    pub fn with_counts(mut self, reviews: u64, bookmarks: u64, views: u64) -> Self {
        self.review_count = reviews;
        self.bookmark_count = bookmarks;
        self.view_count = views;
        self
    }

    /// Builder-style method to set the address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Builder-style method to clear the verified flag.
    #[must_use]
    pub fn unverified(mut self) -> Self {
        self.verified = false;
        self
    }

    /// Builder-style method to mark the place soft-deleted.
    #[must_use]
    pub fn soft_deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    /// True when the place may appear in search and recommendation results.
    #[inline]
    pub fn is_searchable(&self) -> bool {
        self.verified && !self.deleted
    }
}
