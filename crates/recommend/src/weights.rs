//! Scoring weights.
//!
//! Supports environment-based configuration with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;

/// Weights of the composite recommendation score.
///
/// `score = proximity * decay(d) + rating * rating/5 + diversity * bonus`
/// where the bonus is `novelty_bonus` for candidates introducing a category
/// the plan does not have yet, and 0 otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub proximity: f64,
    pub rating: f64,
    pub diversity: f64,
    /// Bonus granted to category-novel candidates, before weighting.
    pub novelty_bonus: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            proximity: 0.5,
            rating: 0.3,
            diversity: 0.2,
            novelty_bonus: 0.1,
        }
    }
}

impl ScoreWeights {
    /// Create weights from environment variables.
    ///
    /// Reads the following environment variables, falling back to the
    /// defaults for anything unset or unparsable:
    /// - `ODDIYA_SCORE_WEIGHT_PROXIMITY`
    /// - `ODDIYA_SCORE_WEIGHT_RATING`
    /// - `ODDIYA_SCORE_WEIGHT_DIVERSITY`
    /// - `ODDIYA_SCORE_NOVELTY_BONUS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            proximity: env_weight("ODDIYA_SCORE_WEIGHT_PROXIMITY", defaults.proximity),
            rating: env_weight("ODDIYA_SCORE_WEIGHT_RATING", defaults.rating),
            diversity: env_weight("ODDIYA_SCORE_WEIGHT_DIVERSITY", defaults.diversity),
            novelty_bonus: env_weight("ODDIYA_SCORE_NOVELTY_BONUS", defaults.novelty_bonus),
        }
    }
}

fn env_weight(var: &str, default: f64) -> f64 {
    env::var(var)
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|w: &f64| w.is_finite() && *w >= 0.0)
        .unwrap_or(default)
}
