//! The store interface consumed by search, recommendation, routing and the
//! popularity aggregator.
//!
//! The backing store owns its own consistency model; this trait only
//! describes the reads and score write-backs the spatial core needs. A
//! production implementation may answer `find_in_bounding_box` from an
//! R-tree, a grid index, or a full scan — results feed an exact haversine
//! refinement either way, so the choice affects performance only.

use crate::{Place, Result};
use oddiya_geo::BoundingBox;
use serde::{Deserialize, Serialize};

/// View/bookmark counts for one day inside the recent-activity window.
///
/// `days_ago` is 0 for today, and always less than the requested window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEngagement {
    pub days_ago: u32,
    pub views: u64,
    pub bookmarks: u64,
}

/// Read/write interface over the place collection.
///
/// All query methods return only searchable places (verified, not
/// soft-deleted); see [`Place::is_searchable`].
pub trait PlaceStore: Send + Sync {
    /// Coarse candidate fetch: every searchable place inside the box.
    ///
    /// This is the prefilter; callers always re-check exact distances, so
    /// returning a superset within the box is fine, missing a place inside
    /// it is not.
    fn find_in_bounding_box(&self, bbox: &BoundingBox) -> Result<Vec<Place>>;

    /// Every searchable place. Used where no spatial narrowing applies
    /// (trending and popularity listings, batch recompute).
    fn find_all_searchable(&self) -> Result<Vec<Place>>;

    /// Resolves IDs to places. Missing or soft-deleted IDs are simply
    /// absent from the result; the caller decides whether that is an error.
    fn get_by_ids(&self, ids: &[String]) -> Result<Vec<Place>>;

    /// Writes back a recomputed popularity score.
    fn update_popularity_score(&self, id: &str, score: f64) -> Result<()>;

    /// Writes back a recomputed trend score.
    fn update_trend_score(&self, id: &str, score: f64) -> Result<()>;

    /// Day-bucketed view/bookmark counts within the last `window_days`
    /// days. Days with no activity may be omitted.
    fn recent_engagement(&self, id: &str, window_days: u32) -> Result<Vec<DailyEngagement>>;

    /// Total view/bookmark counts within the window.
    fn recent_interaction_counts(&self, id: &str, window_days: u32) -> Result<(u64, u64)> {
        let buckets = self.recent_engagement(id, window_days)?;
        let views = buckets.iter().map(|b| b.views).sum();
        let bookmarks = buckets.iter().map(|b| b.bookmarks).sum();
        Ok((views, bookmarks))
    }
}
