//! Search configuration.
//!
//! Supports environment-based configuration with sensible defaults.

use oddiya_geo::BoundingBox;
use serde::{Deserialize, Serialize};
use std::env;

use crate::DEFAULT_RADIUS_METERS;

/// Configuration for the search pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Radius substituted by callers that do not specify one.
    pub default_radius_meters: f64,
    /// When set, search centers outside this box are rejected. Off by
    /// default; `BoundingBox::KOREA` is the ready-made service region.
    pub regional_bounds: Option<BoundingBox>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_radius_meters: DEFAULT_RADIUS_METERS,
            regional_bounds: None,
        }
    }
}

impl SearchConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `ODDIYA_DEFAULT_RADIUS_METERS`: default search radius
    /// - `ODDIYA_REGIONAL_CHECK`: set to `korea` to enable the Korea
    ///   service-region check
    pub fn from_env() -> Self {
        let default_radius_meters = env::var("ODDIYA_DEFAULT_RADIUS_METERS")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|r: &f64| r.is_finite() && *r > 0.0)
            .unwrap_or(DEFAULT_RADIUS_METERS);

        let regional_bounds = match env::var("ODDIYA_REGIONAL_CHECK")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "korea" | "kr" => Some(BoundingBox::KOREA),
            _ => None,
        };

        Self {
            default_radius_meters,
            regional_bounds,
        }
    }

    /// Builder-style method to set the default radius.
    #[must_use]
    pub fn with_default_radius_meters(mut self, radius_meters: f64) -> Self {
        self.default_radius_meters = radius_meters;
        self
    }

    /// Builder-style method to enable a service-region check.
    #[must_use]
    pub fn with_regional_bounds(mut self, bounds: BoundingBox) -> Self {
        self.regional_bounds = Some(bounds);
        self
    }
}
