//! OSRM HTTP adapter for the route oracle.
//!
//! Queries the route service with alternatives and per-step maneuvers
//! enabled, and maps OSRM maneuver type/modifier pairs onto the planner's
//! maneuver categories. Locations are passed through verbatim as
//! `lng,lat` identifier strings.

use serde::Deserialize;

use crate::model::{ManeuverKind, RouteAlternative, Step};
use crate::traits::{OracleError, RouteOracle};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
    /// Send the departure timestamp as a `depart` query parameter.
    ///
    /// Vanilla osrm-backend has a strict route-service option grammar and
    /// rejects unknown parameters, so this stays off unless the backend is
    /// a time-aware fork. With it off the backend is departure-time
    /// invariant and the probe timestamp only feeds arrival arithmetic.
    pub send_depart: bool,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
            send_depart: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl RouteOracle for OsrmClient {
    fn routes_at(
        &self,
        origin: &str,
        destination: &str,
        departure: i64,
    ) -> Result<Vec<RouteAlternative>, OracleError> {
        let url = route_url(&self.config, origin, destination, departure);

        let body = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.json::<OsrmRouteResponse>())
            .map_err(|err| OracleError::Transport(err.to_string()))?;

        if body.code != "Ok" {
            return Err(OracleError::Status {
                code: body.code,
                message: body.message,
            });
        }

        Ok(body
            .routes
            .unwrap_or_default()
            .into_iter()
            .map(RouteAlternative::from)
            .collect())
    }
}

fn route_url(config: &OsrmConfig, origin: &str, destination: &str, departure: i64) -> String {
    let mut url = format!(
        "{}/route/v1/{}/{};{}?alternatives=true&steps=true&overview=false",
        config.base_url, config.profile, origin, destination
    );
    if config.send_depart {
        url.push_str(&format!("&depart={}", departure));
    }
    url
}

/// Maps an OSRM maneuver onto a planner maneuver category.
///
/// Ramp/merge/fork types win over the turn modifier: an "on ramp" with a
/// "slight left" modifier is still freeway access, not a left turn.
fn maneuver_kind(kind: &str, modifier: Option<&str>) -> ManeuverKind {
    match kind {
        "on ramp" | "off ramp" => ManeuverKind::Ramp,
        "merge" => ManeuverKind::Merge,
        "fork" => ManeuverKind::KeepLane,
        _ => match modifier {
            Some("uturn") => ManeuverKind::UTurn,
            Some("left" | "sharp left" | "slight left") => ManeuverKind::TurnLeft,
            Some("right" | "sharp right" | "slight right") => ManeuverKind::TurnRight,
            _ => ManeuverKind::Other,
        },
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    message: Option<String>,
    routes: Option<Vec<OsrmRoute>>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    duration: f64,
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    steps: Vec<OsrmStep>,
}

#[derive(Debug, Deserialize)]
struct OsrmStep {
    duration: f64,
    maneuver: OsrmManeuver,
}

#[derive(Debug, Deserialize)]
struct OsrmManeuver {
    #[serde(rename = "type")]
    kind: String,
    modifier: Option<String>,
}

impl From<OsrmRoute> for RouteAlternative {
    fn from(route: OsrmRoute) -> Self {
        let steps = route
            .legs
            .into_iter()
            .flat_map(|leg| leg.steps)
            .map(|step| {
                Step::new(
                    maneuver_kind(&step.maneuver.kind, step.maneuver.modifier.as_deref()),
                    step.duration.round() as i64,
                )
            })
            .collect();

        Self {
            steps,
            total_duration_secs: route.duration.round() as i64,
        }
    }
}
