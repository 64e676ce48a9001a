//! departure-planner core
//!
//! Finds a departure time and route such that the traveler arrives no
//! later than a hard deadline while maximizing a relaxation-friendliness
//! score derived from route geometry. Routing itself is delegated to an
//! external provider behind the [`traits::RouteOracle`] seam.

pub mod model;
pub mod osrm;
pub mod scorer;
pub mod search;
pub mod traits;
