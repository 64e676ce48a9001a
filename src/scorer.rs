//! Relaxation-friendliness scoring for route alternatives.
//!
//! Maps a route's maneuver-step sequence to a scalar desirability score:
//! long uninterrupted driving stretches and freeway-grade segments score
//! up, turns and stop-and-go interruptions score down. Pure and
//! deterministic; all weighting lives in [`ScoreWeights`].

use serde::{Deserialize, Serialize};

use crate::model::{ManeuverKind, RouteAlternative};

/// A step shorter than this is counted as a stop/signal interruption.
pub const STOP_THRESHOLD_SECS: i64 = 25;

/// Only steps at least this long extend a continuous driving stretch;
/// anything shorter resets the stretch.
pub const STRETCH_MIN_STEP_SECS: i64 = 120;

/// Scoring policy. These are tuning knobs, not algorithm: inject a custom
/// set to change what "relaxing" means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Reward per minute of the longest uninterrupted stretch.
    pub stretch_per_minute: f64,
    /// Reward per minute of total traversal time.
    pub duration_per_minute: f64,
    /// Reward per ramp/merge/lane-keep maneuver.
    pub highway_hint: f64,
    /// Penalty per left turn.
    pub left_turn: f64,
    /// Penalty per right turn. Defaults higher than `left_turn`: under a
    /// drive-on-left convention, right turns cross oncoming traffic.
    pub right_turn: f64,
    /// Penalty per u-turn.
    pub u_turn: f64,
    /// Penalty per stop-length step.
    pub stop: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            stretch_per_minute: 2.0,
            duration_per_minute: 0.5,
            highway_hint: 1.0,
            left_turn: 1.0,
            right_turn: 2.0,
            u_turn: 4.0,
            stop: 1.5,
        }
    }
}

/// Structural features extracted from one step sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RouteMetrics {
    pub total_duration_secs: i64,
    pub longest_stretch_secs: i64,
    pub left_turns: u32,
    pub right_turns: u32,
    pub u_turns: u32,
    pub stops: u32,
    pub highway_hints: u32,
}

/// Scalar score plus the feature breakdown it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteScore {
    pub score: f64,
    pub metrics: RouteMetrics,
}

/// Scores one route alternative against the given weights.
///
/// Single left-to-right pass over the step sequence carrying a running
/// stretch accumulator; order of steps matters, nothing else does.
pub fn score_route(route: &RouteAlternative, weights: &ScoreWeights) -> RouteScore {
    let mut metrics = RouteMetrics {
        total_duration_secs: route.total_duration_secs,
        ..RouteMetrics::default()
    };
    let mut current_stretch = 0i64;

    for step in &route.steps {
        match step.kind {
            ManeuverKind::TurnLeft => metrics.left_turns += 1,
            ManeuverKind::TurnRight => metrics.right_turns += 1,
            ManeuverKind::UTurn => metrics.u_turns += 1,
            kind if kind.is_highway_hint() => metrics.highway_hints += 1,
            _ => {}
        }

        if step.duration_secs < STOP_THRESHOLD_SECS {
            metrics.stops += 1;
        }

        if step.duration_secs >= STRETCH_MIN_STEP_SECS {
            current_stretch += step.duration_secs;
            metrics.longest_stretch_secs = metrics.longest_stretch_secs.max(current_stretch);
        } else {
            current_stretch = 0;
        }
    }

    let score = weights.stretch_per_minute * (metrics.longest_stretch_secs as f64 / 60.0)
        + weights.duration_per_minute * (metrics.total_duration_secs as f64 / 60.0)
        + weights.highway_hint * metrics.highway_hints as f64
        - weights.left_turn * metrics.left_turns as f64
        - weights.right_turn * metrics.right_turns as f64
        - weights.u_turn * metrics.u_turns as f64
        - weights.stop * metrics.stops as f64;

    RouteScore { score, metrics }
}
