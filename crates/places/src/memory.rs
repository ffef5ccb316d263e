//! In-memory reference implementation of [`PlaceStore`].
//!
//! Used by tests across the workspace and as the template for real
//! backends. The bounding-box prefilter can run against an R-tree
//! (`with_spatial_index`) or a linear scan; both paths return identical
//! candidate sets.

use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};
use oddiya_geo::BoundingBox;
use rstar::{RTree, RTreeObject, AABB};

use crate::{DailyEngagement, Place, PlaceStore, Result, StoreError};

/// R-tree entry: a place ID pinned to its position.
#[derive(Debug, Clone, PartialEq)]
struct PlacePosition {
    id: String,
    /// `[longitude, latitude]`, matching the envelope axis order.
    position: [f64; 2],
}

impl PlacePosition {
    fn for_place(place: &Place) -> Self {
        Self {
            id: place.id.clone(),
            position: [place.coordinate.longitude, place.coordinate.latitude],
        }
    }
}

impl RTreeObject for PlacePosition {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

#[derive(Debug, Clone, Copy)]
enum Interaction {
    View,
    Bookmark,
}

#[derive(Debug, Clone)]
struct Event {
    kind: Interaction,
    at: DateTime<Utc>,
}

/// Thread-safe in-memory place store.
#[derive(Default)]
pub struct MemoryPlaceStore {
    places: RwLock<HashMap<String, Place>>,
    index: Option<RwLock<RTree<PlacePosition>>>,
    events: RwLock<HashMap<String, Vec<Event>>>,
}

impl MemoryPlaceStore {
    /// Creates a store whose bounding-box queries run as linear scans.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose bounding-box queries run against an R-tree.
    pub fn with_spatial_index() -> Self {
        Self {
            places: RwLock::new(HashMap::new()),
            index: Some(RwLock::new(RTree::new())),
            events: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts or replaces a place.
    pub fn upsert(&self, place: Place) {
        let mut places = self.places.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(index) = &self.index {
            let mut tree = index.write().unwrap_or_else(PoisonError::into_inner);
            if let Some(old) = places.get(&place.id) {
                tree.remove(&PlacePosition::for_place(old));
            }
            tree.insert(PlacePosition::for_place(&place));
        }
        places.insert(place.id.clone(), place);
    }

    /// Number of stored places, including unverified and soft-deleted ones.
    pub fn len(&self) -> usize {
        self.places
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True when the store holds no places at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records a view event at the current time.
    pub fn record_view(&self, id: &str) {
        self.record(id, Interaction::View, Utc::now());
    }

    /// Records a bookmark event at the current time.
    pub fn record_bookmark(&self, id: &str) {
        self.record(id, Interaction::Bookmark, Utc::now());
    }

    /// Records a view event at an explicit time (for deterministic tests).
    pub fn record_view_at(&self, id: &str, at: DateTime<Utc>) {
        self.record(id, Interaction::View, at);
    }

    /// Records a bookmark event at an explicit time.
    pub fn record_bookmark_at(&self, id: &str, at: DateTime<Utc>) {
        self.record(id, Interaction::Bookmark, at);
    }

    fn record(&self, id: &str, kind: Interaction, at: DateTime<Utc>) {
        let mut events = self.events.write().unwrap_or_else(PoisonError::into_inner);
        events
            .entry(id.to_string())
            .or_default()
            .push(Event { kind, at });
    }

    fn with_places<T>(&self, f: impl FnOnce(&HashMap<String, Place>) -> T) -> T {
        // A poisoned lock still holds valid data for reads.
        let places = self.places.read().unwrap_or_else(PoisonError::into_inner);
        f(&places)
    }
}

impl PlaceStore for MemoryPlaceStore {
    fn find_in_bounding_box(&self, bbox: &BoundingBox) -> Result<Vec<Place>> {
        if let Some(index) = &self.index {
            let envelope = AABB::from_corners(
                [bbox.min_lng, bbox.min_lat],
                [bbox.max_lng, bbox.max_lat],
            );
            let tree = index.read().unwrap_or_else(PoisonError::into_inner);
            let ids: Vec<String> = tree
                .locate_in_envelope(&envelope)
                .map(|p| p.id.clone())
                .collect();
            drop(tree);

            return Ok(self.with_places(|places| {
                ids.iter()
                    .filter_map(|id| places.get(id))
                    .filter(|p| p.is_searchable())
                    .cloned()
                    .collect()
            }));
        }

        Ok(self.with_places(|places| {
            places
                .values()
                .filter(|p| p.is_searchable() && bbox.contains(&p.coordinate))
                .cloned()
                .collect()
        }))
    }

    fn find_all_searchable(&self) -> Result<Vec<Place>> {
        Ok(self.with_places(|places| {
            places
                .values()
                .filter(|p| p.is_searchable())
                .cloned()
                .collect()
        }))
    }

    fn get_by_ids(&self, ids: &[String]) -> Result<Vec<Place>> {
        Ok(self.with_places(|places| {
            ids.iter()
                .filter_map(|id| places.get(id))
                .filter(|p| !p.deleted)
                .cloned()
                .collect()
        }))
    }

    fn update_popularity_score(&self, id: &str, score: f64) -> Result<()> {
        let mut places = self.places.write().unwrap_or_else(PoisonError::into_inner);
        let place = places.get_mut(id).ok_or_else(|| StoreError::not_found(id))?;
        place.popularity_score = score;
        Ok(())
    }

    fn update_trend_score(&self, id: &str, score: f64) -> Result<()> {
        let mut places = self.places.write().unwrap_or_else(PoisonError::into_inner);
        let place = places.get_mut(id).ok_or_else(|| StoreError::not_found(id))?;
        place.trend_score = score;
        Ok(())
    }

    fn recent_engagement(&self, id: &str, window_days: u32) -> Result<Vec<DailyEngagement>> {
        if self.with_places(|places| !places.contains_key(id)) {
            return Err(StoreError::not_found(id));
        }

        let now = Utc::now();
        let window = Duration::days(i64::from(window_days));
        let events = self.events.read().unwrap_or_else(PoisonError::into_inner);

        let mut buckets: BTreeMap<u32, (u64, u64)> = BTreeMap::new();
        for event in events.get(id).into_iter().flatten() {
            let age = now - event.at;
            if age < Duration::zero() || age >= window {
                continue;
            }
            let days_ago = u32::try_from(age.num_days()).unwrap_or(u32::MAX);
            let bucket = buckets.entry(days_ago).or_insert((0, 0));
            match event.kind {
                Interaction::View => bucket.0 += 1,
                Interaction::Bookmark => bucket.1 += 1,
            }
        }

        Ok(buckets
            .into_iter()
            .map(|(days_ago, (views, bookmarks))| DailyEngagement {
                days_ago,
                views,
                bookmarks,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlaceCategory;
    use oddiya_geo::Coordinate;

    fn seed(store: &MemoryPlaceStore) {
        store.upsert(Place::new(
            "downtown",
            "Downtown Grill",
            PlaceCategory::Restaurant,
            Coordinate::new(37.5665, 126.9780),
        ));
        store.upsert(Place::new(
            "north",
            "North Cafe",
            PlaceCategory::Cafe,
            Coordinate::new(37.5765, 126.9780),
        ));
        store.upsert(
            Place::new(
                "hidden",
                "Unverified Bar",
                PlaceCategory::Entertainment,
                Coordinate::new(37.5670, 126.9790),
            )
            .unverified(),
        );
        store.upsert(Place::new(
            "busan",
            "Harbor View",
            PlaceCategory::Hotel,
            Coordinate::new(35.1796, 129.0756),
        ));
    }

    fn sorted_ids(places: Vec<Place>) -> Vec<String> {
        let mut ids: Vec<String> = places.into_iter().map(|p| p.id).collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_bounding_box_excludes_unsearchable() {
        let store = MemoryPlaceStore::new();
        seed(&store);

        let bbox = BoundingBox::around(&Coordinate::new(37.5665, 126.9780), 5_000.0);
        let found = store.find_in_bounding_box(&bbox).unwrap();

        assert_eq!(sorted_ids(found), vec!["downtown", "north"]);
    }

    #[test]
    fn test_indexed_and_scan_paths_agree() {
        let scan = MemoryPlaceStore::new();
        let indexed = MemoryPlaceStore::with_spatial_index();
        seed(&scan);
        seed(&indexed);

        let bbox = BoundingBox::around(&Coordinate::new(37.5665, 126.9780), 5_000.0);
        assert_eq!(
            sorted_ids(scan.find_in_bounding_box(&bbox).unwrap()),
            sorted_ids(indexed.find_in_bounding_box(&bbox).unwrap()),
        );

        let wide = BoundingBox::around(&Coordinate::new(36.5, 128.0), 400_000.0);
        assert_eq!(
            sorted_ids(scan.find_in_bounding_box(&wide).unwrap()),
            sorted_ids(indexed.find_in_bounding_box(&wide).unwrap()),
        );
    }

    #[test]
    fn test_upsert_moves_indexed_position() {
        let store = MemoryPlaceStore::with_spatial_index();
        seed(&store);

        // Move the Busan hotel to Seoul; it must show up in Seoul queries.
        let moved = Place::new(
            "busan",
            "Harbor View",
            PlaceCategory::Hotel,
            Coordinate::new(37.5660, 126.9775),
        );
        store.upsert(moved);

        let bbox = BoundingBox::around(&Coordinate::new(37.5665, 126.9780), 2_000.0);
        let ids = sorted_ids(store.find_in_bounding_box(&bbox).unwrap());
        assert!(ids.contains(&"busan".to_string()));

        let old_bbox = BoundingBox::around(&Coordinate::new(35.1796, 129.0756), 2_000.0);
        assert!(store.find_in_bounding_box(&old_bbox).unwrap().is_empty());
    }

    #[test]
    fn test_get_by_ids_skips_missing_and_deleted() {
        let store = MemoryPlaceStore::new();
        seed(&store);
        store.upsert(
            Place::new(
                "gone",
                "Closed Diner",
                PlaceCategory::Restaurant,
                Coordinate::new(37.5600, 126.9700),
            )
            .soft_deleted(),
        );

        let found = store
            .get_by_ids(&[
                "downtown".to_string(),
                "gone".to_string(),
                "nope".to_string(),
            ])
            .unwrap();
        assert_eq!(sorted_ids(found), vec!["downtown"]);
    }

    #[test]
    fn test_score_updates() {
        let store = MemoryPlaceStore::new();
        seed(&store);

        store.update_popularity_score("downtown", 42.5).unwrap();
        store.update_trend_score("downtown", 7.0).unwrap();

        let place = store
            .get_by_ids(&["downtown".to_string()])
            .unwrap()
            .pop()
            .unwrap();
        assert_eq!(place.popularity_score, 42.5);
        assert_eq!(place.trend_score, 7.0);

        assert!(matches!(
            store.update_popularity_score("nope", 1.0),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_recent_engagement_buckets_by_day() {
        let store = MemoryPlaceStore::new();
        seed(&store);

        let now = Utc::now();
        store.record_view_at("downtown", now - Duration::hours(1));
        store.record_view_at("downtown", now - Duration::hours(2));
        store.record_bookmark_at("downtown", now - Duration::days(2));
        store.record_view_at("downtown", now - Duration::days(10)); // outside window

        let buckets = store.recent_engagement("downtown", 7).unwrap();
        assert_eq!(
            buckets,
            vec![
                DailyEngagement { days_ago: 0, views: 2, bookmarks: 0 },
                DailyEngagement { days_ago: 2, views: 0, bookmarks: 1 },
            ]
        );

        let (views, bookmarks) = store.recent_interaction_counts("downtown", 7).unwrap();
        assert_eq!((views, bookmarks), (2, 1));
    }

    #[test]
    fn test_recent_engagement_unknown_place() {
        let store = MemoryPlaceStore::new();
        assert!(matches!(
            store.recent_engagement("nope", 7),
            Err(StoreError::NotFound { .. })
        ));
    }
}
