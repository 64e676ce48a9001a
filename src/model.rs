//! Domain data model for departure planning.
//!
//! All timestamps are unix seconds (i64). Entities are request-scoped:
//! nothing here survives past the response that produced it.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::scorer::RouteScore;

/// One trip to plan: where from, where to, and the hard arrival deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRequest {
    /// Opaque location identifier understood by the route provider.
    pub origin: String,
    /// Opaque location identifier understood by the route provider.
    pub destination: String,
    /// Latest acceptable arrival, unix seconds.
    pub deadline: i64,
}

/// Deadline text that did not parse as an RFC 3339 date-time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDeadline {
    pub input: String,
    pub message: String,
}

impl TripRequest {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>, deadline: i64) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            deadline,
        }
    }

    /// Builds a request from the inbound `arriveAt` field.
    ///
    /// Rejects a malformed deadline before any provider query is made.
    pub fn from_rfc3339(
        origin: impl Into<String>,
        destination: impl Into<String>,
        arrive_at: &str,
    ) -> Result<Self, InvalidDeadline> {
        let deadline = DateTime::parse_from_rfc3339(arrive_at)
            .map_err(|err| InvalidDeadline {
                input: arrive_at.to_string(),
                message: err.to_string(),
            })?
            .timestamp();

        Ok(Self::new(origin, destination, deadline))
    }
}

/// Maneuver category for one route step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManeuverKind {
    TurnLeft,
    TurnRight,
    UTurn,
    /// Entering or leaving a grade-separated road.
    Ramp,
    Merge,
    /// Lane keep at a fork.
    KeepLane,
    /// Anything that is not a turn, ramp, merge, or lane keep.
    Other,
}

impl ManeuverKind {
    /// Ramps, merges, and lane keeps are used as a proxy for
    /// freeway-grade driving.
    pub fn is_highway_hint(self) -> bool {
        matches!(self, Self::Ramp | Self::Merge | Self::KeepLane)
    }
}

/// One maneuver segment of a route. Order within the step sequence is
/// travel order along the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub kind: ManeuverKind,
    pub duration_secs: i64,
}

impl Step {
    pub fn new(kind: ManeuverKind, duration_secs: i64) -> Self {
        Self {
            kind,
            duration_secs,
        }
    }
}

/// One candidate path between origin and destination, as returned by the
/// route provider for a single departure time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteAlternative {
    pub steps: Vec<Step>,
    pub total_duration_secs: i64,
}

/// The planner's answer: a departure time and the route chosen for it.
///
/// `effective_score` is the raw score minus the earliness penalty; it is
/// what candidates are compared on during the search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    /// Departure, unix seconds.
    pub departure: i64,
    /// Predicted arrival (departure + route duration), unix seconds.
    pub arrival: i64,
    /// Chosen route's traversal duration in seconds.
    pub duration_secs: i64,
    /// Score breakdown for the chosen route.
    pub score: RouteScore,
    pub effective_score: f64,
}
