//! Departure-time window search.
//!
//! Bounded bisection over a departure interval: each probe queries the
//! route oracle once, scores every alternative that still makes the
//! deadline, and narrows the interval based on whether the fastest
//! alternative arrives on time. The best effective-score candidate seen
//! across all probes is the answer, not the final bisection point.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{ScoredCandidate, TripRequest};
use crate::scorer::{score_route, ScoreWeights};
use crate::traits::{OracleError, RouteOracle};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Departures before now + this are too soon to act on.
    pub min_lead_secs: i64,
    /// How far before the deadline the window may open.
    pub lookback_secs: i64,
    /// The window closes this long before the deadline.
    pub safety_margin_secs: i64,
    /// Minimum initial window span; keeps the interval non-degenerate.
    pub min_window_span_secs: i64,
    /// Oracle-call budget: one query per probe.
    pub max_probes: u32,
    /// Stop once the interval is narrower than this.
    pub convergence_secs: i64,
    /// Effective-score penalty per second of early arrival.
    pub earliness_penalty_per_sec: f64,
    /// Scoring policy passed through to the route scorer.
    pub weights: ScoreWeights,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_lead_secs: 300,
            lookback_secs: 6 * 3600,
            safety_margin_secs: 60,
            min_window_span_secs: 600,
            max_probes: 12,
            convergence_secs: 120,
            earliness_penalty_per_sec: 0.01,
            weights: ScoreWeights::default(),
        }
    }
}

/// Terminal state of a completed search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Best feasible candidate found across all probes.
    Planned(ScoredCandidate),
    /// Every probed departure either missed the deadline on all
    /// alternatives or the window collapsed first. Reflects the
    /// geography/deadline combination, not a system fault.
    NoFeasibleRoute,
}

/// Aborts a planning attempt. Infeasibility is not an error; see
/// [`SearchOutcome::NoFeasibleRoute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The oracle reported a failure at some probe. Not retried: the
    /// bracketing logic cannot proceed without a result at every probe.
    Oracle(OracleError),
    /// The oracle reported success but returned zero alternatives.
    EmptyProbe { departure: i64 },
}

impl From<OracleError> for SearchError {
    fn from(err: OracleError) -> Self {
        SearchError::Oracle(err)
    }
}

/// Searches the departure window for the feasible route with the highest
/// effective score.
///
/// `now` is unix seconds; passed in rather than read from a clock so the
/// window arithmetic is testable.
pub fn find_departure<O>(
    request: &TripRequest,
    oracle: &O,
    now: i64,
    options: &SearchOptions,
) -> Result<SearchOutcome, SearchError>
where
    O: RouteOracle,
{
    let lead_floor = now + options.min_lead_secs;
    let mut lower = lead_floor.max(request.deadline - options.lookback_secs);
    let mut upper = (lower + options.min_window_span_secs)
        .max(request.deadline - options.safety_margin_secs);

    let mut best: Option<ScoredCandidate> = None;

    for probe_index in 0..options.max_probes {
        if lower >= upper {
            debug!(probe_index, lower, upper, "window collapsed, stopping");
            break;
        }

        let probe = (lower + (upper - lower) / 2).max(lead_floor);
        let alternatives = oracle.routes_at(&request.origin, &request.destination, probe)?;
        if alternatives.is_empty() {
            return Err(SearchError::EmptyProbe { departure: probe });
        }

        let mut fastest_secs = i64::MAX;
        for alternative in &alternatives {
            fastest_secs = fastest_secs.min(alternative.total_duration_secs);

            let arrival = probe + alternative.total_duration_secs;
            if arrival > request.deadline {
                continue;
            }

            let score = score_route(alternative, &options.weights);
            let earliness = (request.deadline - arrival) as f64;
            let effective_score =
                score.score - options.earliness_penalty_per_sec * earliness;

            if best
                .as_ref()
                .is_none_or(|held| effective_score > held.effective_score)
            {
                best = Some(ScoredCandidate {
                    departure: probe,
                    arrival,
                    duration_secs: alternative.total_duration_secs,
                    score,
                    effective_score,
                });
            }
        }

        // Bracketing keys off the fastest alternative only: if even it is
        // late, every feasible departure lies earlier than this probe.
        let fastest_on_time = probe + fastest_secs <= request.deadline;
        if fastest_on_time {
            lower = probe + 1;
        } else {
            upper = probe - 1;
        }

        debug!(
            probe_index,
            probe,
            lower,
            upper,
            fastest_secs,
            fastest_on_time,
            alternatives = alternatives.len(),
            "probed departure"
        );

        if upper - lower < options.convergence_secs {
            debug!(probe_index, lower, upper, "window converged");
            break;
        }
    }

    match best {
        Some(candidate) => {
            debug!(
                departure = candidate.departure,
                arrival = candidate.arrival,
                effective_score = candidate.effective_score,
                "departure planned"
            );
            Ok(SearchOutcome::Planned(candidate))
        }
        None => Ok(SearchOutcome::NoFeasibleRoute),
    }
}

/// [`find_departure`] against the system clock.
pub fn plan<O>(
    request: &TripRequest,
    oracle: &O,
    options: &SearchOptions,
) -> Result<SearchOutcome, SearchError>
where
    O: RouteOracle,
{
    let now = std::time::SystemTime::now()
        .duration_since(std::time::SystemTime::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or(0);

    find_departure(request, oracle, now, options)
}
