//! Scoring configuration for the aggregator.
//!
//! Supports environment-based configuration with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;

/// Weights of the lifetime popularity score.
///
/// `popularity = reviews*w_r + bookmarks*w_b + (views/view_scale)*w_v`.
/// Views are scaled down first; a view is a far weaker signal than a
/// written review or a bookmark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopularityWeights {
    pub reviews: f64,
    pub bookmarks: f64,
    pub views: f64,
    /// Divisor applied to the raw view count before weighting.
    pub view_scale: f64,
}

impl Default for PopularityWeights {
    fn default() -> Self {
        Self {
            reviews: 0.4,
            bookmarks: 0.3,
            views: 0.1,
            view_scale: 100.0,
        }
    }
}

/// Recent-window trend scoring parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendConfig {
    /// Only interactions within this many days count.
    pub window_days: u32,
    /// Half-life of the recency decay, in days: activity `half_life_days`
    /// old weighs half as much as today's.
    pub half_life_days: f64,
    pub view_weight: f64,
    pub bookmark_weight: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            window_days: 7,
            half_life_days: 2.0,
            view_weight: 1.0,
            bookmark_weight: 3.0,
        }
    }
}

impl TrendConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads `ODDIYA_TREND_WINDOW_DAYS` and `ODDIYA_TREND_HALF_LIFE_DAYS`,
    /// falling back to the defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let window_days = env::var("ODDIYA_TREND_WINDOW_DAYS")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|d: &u32| *d > 0)
            .unwrap_or(defaults.window_days);

        let half_life_days = env::var("ODDIYA_TREND_HALF_LIFE_DAYS")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|h: &f64| h.is_finite() && *h > 0.0)
            .unwrap_or(defaults.half_life_days);

        Self {
            window_days,
            half_life_days,
            ..defaults
        }
    }

    /// Decay factor for activity `days_ago` old.
    #[inline]
    pub fn recency_weight(&self, days_ago: u32) -> f64 {
        0.5_f64.powf(f64::from(days_ago) / self.half_life_days)
    }
}
