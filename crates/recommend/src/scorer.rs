//! Candidate gathering and composite scoring.

use std::collections::{HashMap, HashSet};

use oddiya_places::{Place, PlaceCategory, PlaceStore};
use oddiya_search::{places_within_radius, SearchConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{RecommendationContext, Result, ScoreWeights};

/// A ranked recommendation candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPlace {
    pub place: Place,
    pub score: f64,
    /// Distance to the nearest place already in the plan.
    pub min_distance_meters: f64,
}

/// Ranks places near the plan that the plan does not contain yet.
///
/// An empty existing set returns an empty list: there is nothing to
/// recommend relative to, and that is not an error. Anchors that no longer
/// resolve are skipped.
pub fn recommend(
    store: &dyn PlaceStore,
    ctx: &RecommendationContext,
    weights: &ScoreWeights,
) -> Result<Vec<ScoredPlace>> {
    if ctx.existing_place_ids.is_empty() {
        return Ok(Vec::new());
    }

    let anchors = store.get_by_ids(&ctx.existing_place_ids)?;
    if anchors.is_empty() {
        debug!("no recommendation anchors resolved");
        return Ok(Vec::new());
    }

    let existing_ids: HashSet<&str> = ctx
        .existing_place_ids
        .iter()
        .map(String::as_str)
        .collect();
    let existing_categories: HashSet<PlaceCategory> =
        anchors.iter().map(|p| p.category).collect();
    let excluded: HashSet<PlaceCategory> = ctx.exclude_categories.iter().copied().collect();

    // Candidates deduplicated by ID, keeping the minimum distance to any
    // anchor.
    let search_config = SearchConfig::default();
    let mut candidates: HashMap<String, (Place, f64)> = HashMap::new();
    for anchor in &anchors {
        let nearby =
            places_within_radius(store, &anchor.coordinate, ctx.radius_meters, &search_config)?;
        for hit in nearby {
            if existing_ids.contains(hit.place.id.as_str())
                || excluded.contains(&hit.place.category)
            {
                continue;
            }
            candidates
                .entry(hit.place.id.clone())
                .and_modify(|(_, d)| *d = d.min(hit.distance_meters))
                .or_insert((hit.place, hit.distance_meters));
        }
    }

    let mut ranked: Vec<ScoredPlace> = candidates
        .into_values()
        .map(|(place, min_distance_meters)| {
            let score = composite_score(&place, min_distance_meters, &existing_categories, weights);
            ScoredPlace {
                place,
                score,
                min_distance_meters,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.min_distance_meters.total_cmp(&b.min_distance_meters))
            .then_with(|| a.place.id.cmp(&b.place.id))
    });
    ranked.truncate(ctx.limit);

    debug!(
        anchors = anchors.len(),
        returned = ranked.len(),
        "recommendations ranked"
    );
    Ok(ranked)
}

/// Smooth decay with distance: 1 at the anchor, 0.5 at 1 km.
fn proximity_decay(distance_meters: f64) -> f64 {
    1.0 / (1.0 + distance_meters / 1_000.0)
}

fn composite_score(
    place: &Place,
    min_distance_meters: f64,
    existing_categories: &HashSet<PlaceCategory>,
    weights: &ScoreWeights,
) -> f64 {
    let normalized_rating = place.rating.unwrap_or(0.0) / 5.0;
    let novelty = if existing_categories.contains(&place.category) {
        0.0
    } else {
        weights.novelty_bonus
    };

    weights.proximity * proximity_decay(min_distance_meters)
        + weights.rating * normalized_rating
        + weights.diversity * novelty
}
