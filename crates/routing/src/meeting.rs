//! Optimal meeting-point calculation.
//!
//! The meeting point is the weighted geometric median of the input
//! locations: the coordinate minimizing the total distance everyone has to
//! travel. Weiszfeld's iteration starts at the arithmetic mean and
//! reweights by inverse distance until the estimate settles.

use oddiya_geo::{haversine_distance_meters, Coordinate};
use oddiya_places::PlaceStore;
use oddiya_search::{places_within_radius, PlaceWithDistance, SearchConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Result, RouteError};

/// Distances below this are clamped before inverse weighting, keeping the
/// iteration defined when the estimate lands on an input point.
const MIN_WEIGHT_DISTANCE_M: f64 = 1e-3;

/// Termination settings for the Weiszfeld iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeetingPointConfig {
    /// Stop once the estimate moves less than this between iterations.
    pub epsilon_meters: f64,
    /// Hard iteration cap guaranteeing termination.
    pub max_iterations: u32,
    /// Radius of the nearby-place search around the result.
    pub nearby_radius_meters: f64,
}

impl Default for MeetingPointConfig {
    fn default() -> Self {
        Self {
            epsilon_meters: 1.0,
            max_iterations: 50,
            nearby_radius_meters: 1_000.0,
        }
    }
}

/// A computed meeting point and the places around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingPointResult {
    pub point: Coordinate,
    /// False when the iteration cap was hit first; the point is then the
    /// best available estimate rather than a converged median.
    pub converged: bool,
    pub iterations: u32,
    pub nearby_places: Vec<PlaceWithDistance>,
}

/// Computes the geometric median of the locations.
///
/// Pure function: no store access. Returns the point plus convergence
/// data. A single location is returned unchanged; two locations converge
/// to their midpoint.
pub fn geometric_median(
    locations: &[Coordinate],
    config: &MeetingPointConfig,
) -> Result<(Coordinate, bool, u32)> {
    if locations.is_empty() {
        return Err(RouteError::NoLocations);
    }
    for location in locations {
        location.validate()?;
    }
    if locations.len() == 1 {
        return Ok((locations[0], true, 0));
    }

    let mut estimate = arithmetic_mean(locations);
    let mut converged = false;
    let mut iterations = 0;

    while iterations < config.max_iterations {
        iterations += 1;

        let mut weight_sum = 0.0;
        let mut lat_sum = 0.0;
        let mut lng_sum = 0.0;
        for location in locations {
            let distance =
                haversine_distance_meters(&estimate, location).max(MIN_WEIGHT_DISTANCE_M);
            let weight = 1.0 / distance;
            weight_sum += weight;
            lat_sum += weight * location.latitude;
            lng_sum += weight * location.longitude;
        }

        let next = Coordinate::new(lat_sum / weight_sum, lng_sum / weight_sum);
        let moved = haversine_distance_meters(&estimate, &next);
        estimate = next;

        if moved < config.epsilon_meters {
            converged = true;
            break;
        }
    }

    Ok((estimate, converged, iterations))
}

/// Finds the optimal meeting point and the places around it.
///
/// When the iteration cap is reached before convergence the best estimate
/// is still returned, flagged via `converged = false` — an approximate
/// meeting point is more useful than a hard failure.
pub fn find_meeting_point(
    store: &dyn PlaceStore,
    locations: &[Coordinate],
    config: &MeetingPointConfig,
) -> Result<MeetingPointResult> {
    let (point, converged, iterations) = geometric_median(locations, config)?;

    if converged {
        debug!(iterations, "meeting point converged");
    } else {
        warn!(
            iterations,
            "meeting point hit the iteration cap, returning best estimate"
        );
    }

    let nearby_places = places_within_radius(
        store,
        &point,
        config.nearby_radius_meters,
        &SearchConfig::default(),
    )?;

    Ok(MeetingPointResult {
        point,
        converged,
        iterations,
        nearby_places,
    })
}

fn arithmetic_mean(locations: &[Coordinate]) -> Coordinate {
    let n = locations.len() as f64;
    let lat: f64 = locations.iter().map(|c| c.latitude).sum();
    let lng: f64 = locations.iter().map(|c| c.longitude).sum();
    Coordinate::new(lat / n, lng / n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oddiya_places::{MemoryPlaceStore, Place, PlaceCategory};

    fn total_distance(point: &Coordinate, locations: &[Coordinate]) -> f64 {
        locations
            .iter()
            .map(|l| haversine_distance_meters(point, l))
            .sum()
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let result = geometric_median(&[], &MeetingPointConfig::default());
        assert!(matches!(result, Err(RouteError::NoLocations)));
    }

    #[test]
    fn test_invalid_coordinate_is_rejected() {
        let result = geometric_median(
            &[Coordinate::new(95.0, 0.0)],
            &MeetingPointConfig::default(),
        );
        assert!(matches!(result, Err(RouteError::InvalidCoordinate(_))));
    }

    #[test]
    fn test_single_location_is_returned_unchanged() {
        let here = Coordinate::new(37.5665, 126.9780);
        let (point, converged, iterations) =
            geometric_median(&[here], &MeetingPointConfig::default()).unwrap();
        assert_eq!(point, here);
        assert!(converged);
        assert_eq!(iterations, 0);
    }

    #[test]
    fn test_two_identical_locations() {
        let here = Coordinate::new(37.5665, 126.9780);
        let (point, converged, _) =
            geometric_median(&[here, here], &MeetingPointConfig::default()).unwrap();
        assert!(haversine_distance_meters(&point, &here) < 1.0);
        assert!(converged);
    }

    #[test]
    fn test_two_locations_converge_to_midpoint() {
        let a = Coordinate::new(37.5000, 127.0000);
        let b = Coordinate::new(37.5100, 127.0000);
        let midpoint = Coordinate::new(37.5050, 127.0000);

        let (point, converged, _) =
            geometric_median(&[a, b], &MeetingPointConfig::default()).unwrap();

        assert!(converged);
        assert!(haversine_distance_meters(&point, &midpoint) < 2.0);
    }

    #[test]
    fn test_colinear_points_converge_to_middle() {
        let locations = [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 2.0),
            Coordinate::new(0.0, 4.0),
        ];

        let (point, converged, _) =
            geometric_median(&locations, &MeetingPointConfig::default()).unwrap();

        assert!(converged);
        assert!(haversine_distance_meters(&point, &Coordinate::new(0.0, 2.0)) < 2.0);
    }

    #[test]
    fn test_median_beats_mean_on_skewed_input() {
        // Three clustered points and one outlier: the median sits near the
        // cluster, giving a lower total distance than the mean.
        let locations = [
            Coordinate::new(37.5660, 126.9780),
            Coordinate::new(37.5665, 126.9785),
            Coordinate::new(37.5670, 126.9775),
            Coordinate::new(37.6600, 127.0800),
        ];

        let (point, converged, _) =
            geometric_median(&locations, &MeetingPointConfig::default()).unwrap();
        let mean = arithmetic_mean(&locations);

        assert!(converged);
        assert!(total_distance(&point, &locations) < total_distance(&mean, &locations));
    }

    #[test]
    fn test_iteration_cap_returns_best_estimate() {
        let locations = [
            Coordinate::new(37.5000, 127.0000),
            Coordinate::new(37.6000, 127.1000),
            Coordinate::new(37.4000, 127.2000),
        ];
        let config = MeetingPointConfig {
            max_iterations: 1,
            epsilon_meters: 1e-9,
            ..MeetingPointConfig::default()
        };

        let (point, converged, iterations) = geometric_median(&locations, &config).unwrap();

        assert!(!converged);
        assert_eq!(iterations, 1);
        assert!(point.is_valid());
    }

    #[test]
    fn test_find_meeting_point_surfaces_nearby_places() {
        let store = MemoryPlaceStore::new();
        store.upsert(Place::new(
            "central",
            "Central Cafe",
            PlaceCategory::Cafe,
            Coordinate::new(37.5050, 127.0001),
        ));
        store.upsert(Place::new(
            "remote",
            "Remote Hotel",
            PlaceCategory::Hotel,
            Coordinate::new(37.9000, 127.5000),
        ));

        let locations = [
            Coordinate::new(37.5000, 127.0000),
            Coordinate::new(37.5100, 127.0000),
        ];
        let result =
            find_meeting_point(&store, &locations, &MeetingPointConfig::default()).unwrap();

        assert!(result.converged);
        let ids: Vec<&str> = result
            .nearby_places
            .iter()
            .map(|p| p.place.id.as_str())
            .collect();
        assert_eq!(ids, vec!["central"]);
    }
}
