//! Popularity and trend scoring for Oddiya.
//!
//! A scheduled batch job recomputes two derived scores for every
//! searchable place:
//!
//! - `popularity_score` — a fixed linear combination of lifetime
//!   engagement counters
//! - `trend_score` — recent-window activity with exponential recency
//!   weighting, so yesterday's bookmarks count more than last week's
//!
//! The job is idempotent (a pure function of stored counters) and
//! tolerates per-place store failures: they are logged and counted, never
//! allowed to abort the batch. Scheduling and single-flight execution
//! belong to the embedding layer.

mod aggregate;
mod config;
mod error;
mod rank;

pub use aggregate::{popularity_score, run_popularity_update, trend_score, AggregationReport};
pub use config::{PopularityWeights, TrendConfig};
pub use error::{Result, TrendingError};
pub use rank::{popular_places_by_category, trending_places};
