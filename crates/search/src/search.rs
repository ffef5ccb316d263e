//! The radius-search pipeline and area statistics.

use std::cmp::Ordering;
use std::collections::HashMap;

use oddiya_geo::{batch, BoundingBox, Coordinate};
use oddiya_places::{PlaceCategory, PlaceStore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Page, PlaceWithDistance, Result, SearchConfig, SearchError, SearchFilter};

/// Searches for places within the filter's radius.
///
/// Results are sorted ascending by distance; ties are broken by descending
/// rating, then ascending place ID, so paging is stable across calls.
///
/// # Errors
/// - [`SearchError::InvalidCoordinate`] / [`SearchError::InvalidRadius`] /
///   [`SearchError::InvalidPageSize`] before any store access
/// - [`SearchError::OutsideRegion`] when a service region is configured and
///   the center falls outside it
/// - [`SearchError::Store`] passed through from the backing store
pub fn search_within_radius(
    store: &dyn PlaceStore,
    filter: &SearchFilter,
    config: &SearchConfig,
) -> Result<Page<PlaceWithDistance>> {
    if filter.page_size == 0 {
        return Err(SearchError::InvalidPageSize(0));
    }

    let mut matches = places_within_radius(store, &filter.center, filter.radius_meters, config)?;

    if let Some(category) = filter.category {
        matches.retain(|m| m.place.category == category);
    }
    if let Some(min_rating) = filter.min_rating {
        matches.retain(|m| m.place.rating.is_some_and(|r| r >= min_rating));
    }

    let page = Page::from_sorted(matches, filter.page, filter.page_size);

    debug!(
        radius_m = filter.radius_meters,
        total = page.total,
        page = page.page,
        returned = page.items.len(),
        "radius search complete"
    );

    Ok(page)
}

/// Aggregate statistics for the places around a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaStatistics {
    pub total_places: usize,
    /// Mean rating over rated places, absent when none are rated.
    pub average_rating: Option<f64>,
    pub category_breakdown: HashMap<PlaceCategory, usize>,
    /// Up to five rated places, best rating first.
    pub top_rated: Vec<PlaceWithDistance>,
}

/// Computes area statistics over every searchable place within the radius.
pub fn area_statistics(
    store: &dyn PlaceStore,
    center: &Coordinate,
    radius_meters: f64,
    config: &SearchConfig,
) -> Result<AreaStatistics> {
    validate_center(center, config)?;
    if !radius_meters.is_finite() || radius_meters <= 0.0 {
        return Err(SearchError::InvalidRadius(radius_meters));
    }

    let matches = matches_within_radius(store, center, radius_meters)?;

    let mut category_breakdown: HashMap<PlaceCategory, usize> = HashMap::new();
    for m in &matches {
        *category_breakdown.entry(m.place.category).or_default() += 1;
    }

    let ratings: Vec<f64> = matches.iter().filter_map(|m| m.place.rating).collect();
    let average_rating = if ratings.is_empty() {
        None
    } else {
        Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
    };

    let mut rated: Vec<PlaceWithDistance> = matches
        .iter()
        .filter(|m| m.place.rating.is_some())
        .cloned()
        .collect();
    rated.sort_by(|a, b| {
        b.place
            .rating
            .unwrap_or(0.0)
            .total_cmp(&a.place.rating.unwrap_or(0.0))
            .then_with(|| a.place.id.cmp(&b.place.id))
    });
    rated.truncate(5);

    Ok(AreaStatistics {
        total_places: matches.len(),
        average_rating,
        category_breakdown,
        top_rated: rated,
    })
}

/// Every searchable place within the radius, sorted but unpaginated.
///
/// This is the building block recommendation and routing reuse: validation
/// and the prefilter/refine pipeline without category filters or paging.
pub fn places_within_radius(
    store: &dyn PlaceStore,
    center: &Coordinate,
    radius_meters: f64,
    config: &SearchConfig,
) -> Result<Vec<PlaceWithDistance>> {
    validate_center(center, config)?;
    if !radius_meters.is_finite() || radius_meters <= 0.0 {
        return Err(SearchError::InvalidRadius(radius_meters));
    }

    let mut matches = matches_within_radius(store, center, radius_meters)?;
    matches.sort_by(rank);
    Ok(matches)
}

/// Prefilter through the store's bounding box, then keep exact matches.
fn matches_within_radius(
    store: &dyn PlaceStore,
    center: &Coordinate,
    radius_meters: f64,
) -> Result<Vec<PlaceWithDistance>> {
    let bbox = BoundingBox::around(center, radius_meters);
    let candidates = store.find_in_bounding_box(&bbox)?;

    let coords: Vec<Coordinate> = candidates.iter().map(|p| p.coordinate).collect();
    let hits = batch::within_radius(center, &coords, radius_meters);

    Ok(hits
        .into_iter()
        .map(|(i, distance_meters)| PlaceWithDistance {
            place: candidates[i].clone(),
            distance_meters,
        })
        .collect())
}

fn validate_center(center: &Coordinate, config: &SearchConfig) -> Result<()> {
    center.validate()?;
    if let Some(bounds) = &config.regional_bounds {
        if !bounds.contains(center) {
            return Err(SearchError::OutsideRegion {
                latitude: center.latitude,
                longitude: center.longitude,
            });
        }
    }
    Ok(())
}

/// Total order: distance ascending, rating descending, ID ascending.
fn rank(a: &PlaceWithDistance, b: &PlaceWithDistance) -> Ordering {
    a.distance_meters
        .total_cmp(&b.distance_meters)
        .then_with(|| {
            b.place
                .rating
                .unwrap_or(0.0)
                .total_cmp(&a.place.rating.unwrap_or(0.0))
        })
        .then_with(|| a.place.id.cmp(&b.place.id))
}
