//! Route segment calculation and along-route place discovery.

use std::collections::HashMap;

use oddiya_geo::{
    bearing_degrees, cross_track_distance_meters, haversine_distance_meters, Coordinate,
};
use oddiya_places::{Place, PlaceCategory, PlaceStore};
use oddiya_search::{places_within_radius, SearchConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Result, RouteError, RouteResult, RouteSegment};

/// Computes distance and bearing for each consecutive pair of places.
///
/// A single-place route is a no-op result rather than an error; an empty
/// input is rejected. Any ID that does not resolve (including soft-deleted
/// places) fails with [`RouteError::PlaceNotFound`] naming the first
/// missing ID.
pub fn calculate_route(store: &dyn PlaceStore, place_ids: &[String]) -> Result<RouteResult> {
    if place_ids.is_empty() {
        return Err(RouteError::EmptyRoute);
    }

    let resolved = store.get_by_ids(place_ids)?;
    let by_id: HashMap<&str, &Place> = resolved.iter().map(|p| (p.id.as_str(), p)).collect();

    let stops: Vec<&Place> = place_ids
        .iter()
        .map(|id| {
            by_id
                .get(id.as_str())
                .copied()
                .ok_or_else(|| RouteError::PlaceNotFound { id: id.clone() })
        })
        .collect::<Result<_>>()?;

    if stops.len() < 2 {
        return Ok(RouteResult::empty());
    }

    let segments: Vec<RouteSegment> = stops
        .windows(2)
        .map(|pair| RouteSegment {
            from_id: pair[0].id.clone(),
            to_id: pair[1].id.clone(),
            distance_meters: haversine_distance_meters(&pair[0].coordinate, &pair[1].coordinate),
            bearing_degrees: bearing_degrees(&pair[0].coordinate, &pair[1].coordinate),
        })
        .collect();

    let total_distance_meters = segments.iter().map(|s| s.distance_meters).sum();

    debug!(
        stops = stops.len(),
        total_m = total_distance_meters,
        "route calculated"
    );

    Ok(RouteResult {
        total_distance_meters,
        segments,
    })
}

/// Configuration for along-route place discovery.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteSearchConfig {
    /// How far off the route a place may lie and still be suggested.
    pub max_detour_meters: f64,
}

impl Default for RouteSearchConfig {
    fn default() -> Self {
        Self {
            max_detour_meters: 1_000.0,
        }
    }
}

/// A place near a route, with its detour distance off the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlongRoutePlace {
    pub place: Place,
    /// Cross-track distance from the route segment, in meters.
    pub detour_meters: f64,
}

/// Finds places along the straight-line route from `start` to `end`.
///
/// Candidates come from a radius search around the route midpoint wide
/// enough to cover the whole segment plus the detour budget; each is kept
/// when its cross-track distance to the segment is within the budget.
/// Results are ordered by detour distance, ties by ID.
pub fn places_along_route(
    store: &dyn PlaceStore,
    start: &Coordinate,
    end: &Coordinate,
    category: Option<PlaceCategory>,
    config: &RouteSearchConfig,
) -> Result<Vec<AlongRoutePlace>> {
    start.validate()?;
    end.validate()?;

    let midpoint = Coordinate::new(
        (start.latitude + end.latitude) / 2.0,
        (start.longitude + end.longitude) / 2.0,
    );
    let route_distance = haversine_distance_meters(start, end);
    let search_radius = route_distance / 2.0 + config.max_detour_meters;

    let candidates = places_within_radius(store, &midpoint, search_radius, &SearchConfig::default())?;

    let mut along: Vec<AlongRoutePlace> = candidates
        .into_iter()
        .filter(|hit| category.is_none_or(|c| hit.place.category == c))
        .filter_map(|hit| {
            let detour = cross_track_distance_meters(&hit.place.coordinate, start, end);
            (detour <= config.max_detour_meters).then_some(AlongRoutePlace {
                place: hit.place,
                detour_meters: detour,
            })
        })
        .collect();

    along.sort_by(|a, b| {
        a.detour_meters
            .total_cmp(&b.detour_meters)
            .then_with(|| a.place.id.cmp(&b.place.id))
    });

    Ok(along)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oddiya_places::MemoryPlaceStore;

    const CITY_HALL: Coordinate = Coordinate { latitude: 37.5665, longitude: 126.9780 };

    fn north_of(center: &Coordinate, meters: f64) -> Coordinate {
        Coordinate::new(center.latitude + meters / 111_320.0, center.longitude)
    }

    fn seeded_store() -> MemoryPlaceStore {
        let store = MemoryPlaceStore::new();
        store.upsert(Place::new(
            "a",
            "Stop A",
            PlaceCategory::TouristAttraction,
            CITY_HALL,
        ));
        store.upsert(Place::new(
            "b",
            "Stop B",
            PlaceCategory::Restaurant,
            north_of(&CITY_HALL, 1_000.0),
        ));
        store.upsert(Place::new(
            "c",
            "Stop C",
            PlaceCategory::Cafe,
            north_of(&CITY_HALL, 2_500.0),
        ));
        store
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_route_is_rejected() {
        let store = seeded_store();
        assert!(matches!(
            calculate_route(&store, &[]),
            Err(RouteError::EmptyRoute)
        ));
    }

    #[test]
    fn test_single_place_route_is_noop() {
        let store = seeded_store();
        let route = calculate_route(&store, &ids(&["a"])).unwrap();
        assert_eq!(route.segments.len(), 0);
        assert_eq!(route.total_distance_meters, 0.0);
    }

    #[test]
    fn test_two_place_route() {
        let store = seeded_store();
        let route = calculate_route(&store, &ids(&["a", "b"])).unwrap();

        assert_eq!(route.segments.len(), 1);
        let segment = &route.segments[0];
        assert_eq!(segment.from_id, "a");
        assert_eq!(segment.to_id, "b");
        assert!((segment.distance_meters - 1_000.0).abs() < 10.0);
        // Due north
        assert!(segment.bearing_degrees < 0.5 || segment.bearing_degrees > 359.5);
        assert_eq!(route.total_distance_meters, segment.distance_meters);
    }

    #[test]
    fn test_total_is_sum_of_segments() {
        let store = seeded_store();
        let route = calculate_route(&store, &ids(&["a", "b", "c"])).unwrap();

        assert_eq!(route.segments.len(), 2);
        let sum: f64 = route.segments.iter().map(|s| s.distance_meters).sum();
        assert!((route.total_distance_meters - sum).abs() < 1e-9);
        assert!((route.total_distance_meters - 2_500.0).abs() < 20.0);
    }

    #[test]
    fn test_missing_place_is_named() {
        let store = seeded_store();
        let err = calculate_route(&store, &ids(&["a", "ghost", "b"])).unwrap_err();
        match err {
            RouteError::PlaceNotFound { id } => assert_eq!(id, "ghost"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_soft_deleted_place_counts_as_missing() {
        let store = seeded_store();
        store.upsert(
            Place::new(
                "closed",
                "Closed Spot",
                PlaceCategory::Cafe,
                north_of(&CITY_HALL, 500.0),
            )
            .soft_deleted(),
        );

        assert!(matches!(
            calculate_route(&store, &ids(&["a", "closed"])),
            Err(RouteError::PlaceNotFound { .. })
        ));
    }

    #[test]
    fn test_revisiting_a_stop_is_allowed() {
        let store = seeded_store();
        let route = calculate_route(&store, &ids(&["a", "b", "a"])).unwrap();
        assert_eq!(route.segments.len(), 2);
        assert!((route.segments[0].distance_meters - route.segments[1].distance_meters).abs() < 1e-9);
    }

    #[test]
    fn test_places_along_route_respects_detour() {
        let store = seeded_store();
        let end = north_of(&CITY_HALL, 3_000.0);
        // ~450m east of the route line at its midpoint
        store.upsert(Place::new(
            "close-detour",
            "Roadside Cafe",
            PlaceCategory::Cafe,
            Coordinate::new(
                north_of(&CITY_HALL, 1_500.0).latitude,
                CITY_HALL.longitude + 450.0 / (111_320.0 * CITY_HALL.latitude.to_radians().cos()),
            ),
        ));
        // ~2km east, beyond the budget
        store.upsert(Place::new(
            "far-detour",
            "Remote Diner",
            PlaceCategory::Restaurant,
            Coordinate::new(
                north_of(&CITY_HALL, 1_500.0).latitude,
                CITY_HALL.longitude + 2_000.0 / (111_320.0 * CITY_HALL.latitude.to_radians().cos()),
            ),
        ));

        let found = places_along_route(
            &store,
            &CITY_HALL,
            &end,
            None,
            &RouteSearchConfig::default(),
        )
        .unwrap();

        let found_ids: Vec<&str> = found.iter().map(|p| p.place.id.as_str()).collect();
        assert!(found_ids.contains(&"close-detour"));
        assert!(found_ids.contains(&"b")); // directly on the line
        assert!(!found_ids.contains(&"far-detour"));
        assert!(found.iter().all(|p| p.detour_meters <= 1_000.0));
    }

    #[test]
    fn test_places_along_route_category_filter() {
        let store = seeded_store();
        let end = north_of(&CITY_HALL, 3_000.0);

        let found = places_along_route(
            &store,
            &CITY_HALL,
            &end,
            Some(PlaceCategory::Cafe),
            &RouteSearchConfig::default(),
        )
        .unwrap();

        assert!(found.iter().all(|p| p.place.category == PlaceCategory::Cafe));
        assert!(found.iter().any(|p| p.place.id == "c"));
    }
}
