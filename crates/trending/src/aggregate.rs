//! The batch score-recompute job.

use oddiya_places::{DailyEngagement, Place, PlaceStore};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::{PopularityWeights, Result, TrendConfig};

/// Outcome of one aggregation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AggregationReport {
    /// Places whose scores were recomputed and written back.
    pub updated: usize,
    /// Places skipped because of a per-place store failure.
    pub failed: usize,
}

impl AggregationReport {
    /// Total places the run attempted.
    pub fn total(&self) -> usize {
        self.updated + self.failed
    }
}

/// Recomputes popularity and trend scores for every searchable place.
///
/// Idempotent: the scores are a pure function of the stored counters and
/// the engagement window, so re-running with unchanged data writes the
/// same values. A failure on one place is logged and counted without
/// aborting the rest of the batch; only a failure to list the places at
/// all aborts the run.
#[instrument(skip_all)]
pub fn run_popularity_update(
    store: &dyn PlaceStore,
    weights: &PopularityWeights,
    trend: &TrendConfig,
) -> Result<AggregationReport> {
    let places = store.find_all_searchable()?;
    let mut report = AggregationReport::default();

    for place in &places {
        match recompute_one(store, place, weights, trend) {
            Ok(()) => report.updated += 1,
            Err(error) => {
                warn!(place_id = %place.id, %error, "score recompute failed, continuing");
                report.failed += 1;
            }
        }
    }

    info!(
        updated = report.updated,
        failed = report.failed,
        "popularity update complete"
    );
    Ok(report)
}

fn recompute_one(
    store: &dyn PlaceStore,
    place: &Place,
    weights: &PopularityWeights,
    trend: &TrendConfig,
) -> oddiya_places::Result<()> {
    let popularity = popularity_score(place, weights);
    let engagement = store.recent_engagement(&place.id, trend.window_days)?;
    let trend_score = trend_score(&engagement, trend);

    store.update_popularity_score(&place.id, popularity)?;
    store.update_trend_score(&place.id, trend_score)?;
    Ok(())
}

/// Lifetime popularity: a linear combination of the engagement counters.
pub fn popularity_score(place: &Place, weights: &PopularityWeights) -> f64 {
    weights.reviews * place.review_count as f64
        + weights.bookmarks * place.bookmark_count as f64
        + weights.views * (place.view_count as f64 / weights.view_scale)
}

/// Recent-window trend score with exponential recency weighting.
pub fn trend_score(engagement: &[DailyEngagement], config: &TrendConfig) -> f64 {
    engagement
        .iter()
        .filter(|day| day.days_ago < config.window_days)
        .map(|day| {
            config.recency_weight(day.days_ago)
                * (config.view_weight * day.views as f64
                    + config.bookmark_weight * day.bookmarks as f64)
        })
        .sum()
}
