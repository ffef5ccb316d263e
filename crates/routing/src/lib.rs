//! Route geometry and meeting-point optimization for Oddiya.
//!
//! This crate provides:
//! - Segment-by-segment distance and bearing for an ordered place sequence
//! - The weighted geometric median (Weiszfeld iteration) as the optimal
//!   meeting point for a group of locations
//! - Along-route place discovery with a cross-track detour budget
//!
//! Route calculation reports distance and bearing only; travel-duration
//! estimates depend on the transport mode and belong to the caller.

mod error;
mod meeting;
mod route;

pub use error::{Result, RouteError};
pub use meeting::{find_meeting_point, geometric_median, MeetingPointConfig, MeetingPointResult};
pub use route::{calculate_route, places_along_route, AlongRoutePlace, RouteSearchConfig};

use serde::{Deserialize, Serialize};

/// One leg of a route between two consecutive places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub from_id: String,
    pub to_id: String,
    pub distance_meters: f64,
    /// Initial great-circle bearing, degrees in [0, 360).
    pub bearing_degrees: f64,
}

/// The computed geometry of an ordered place sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub total_distance_meters: f64,
    pub segments: Vec<RouteSegment>,
}

impl RouteResult {
    /// A degenerate single-place route: zero segments, zero distance.
    pub(crate) fn empty() -> Self {
        Self {
            total_distance_meters: 0.0,
            segments: Vec::new(),
        }
    }
}
