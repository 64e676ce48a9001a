//! Route-oracle seam for the departure planner.
//!
//! The search loop only depends on this trait. Concrete providers (OSRM,
//! test mocks) implement it for their own transport.

use crate::model::RouteAlternative;

/// Failure reported by the route provider for one query.
///
/// The search loop never retries these; a failed probe aborts the whole
/// planning attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// The provider answered with a non-success status code.
    Status {
        code: String,
        message: Option<String>,
    },
    /// The request never produced a parseable answer (network, timeout,
    /// malformed body).
    Transport(String),
}

/// External routing data provider, queried by departure timestamp.
///
/// Implementations are expected to request all route alternatives for the
/// driving mode; which mode and how alternatives are requested is adapter
/// configuration, not a per-call concern.
pub trait RouteOracle {
    /// Returns the candidate routes for departing `departure` (unix seconds).
    ///
    /// A success with an empty list is possible at this level; the search
    /// loop treats it as a failed probe.
    fn routes_at(
        &self,
        origin: &str,
        destination: &str,
        departure: i64,
    ) -> Result<Vec<RouteAlternative>, OracleError>;
}
