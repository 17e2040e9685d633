//! Routing gateway: point-to-point driving routes from an OSRM engine.
//!
//! The gateway issues exactly one `route/v1/driving` request per call and
//! returns the primary route only. Coordinates go out longitude first and the
//! returned geometry stays in the engine's `[lon, lat]` order.

mod error;
mod gateway;
pub mod osrm;

pub use error::RoutingError;
pub use gateway::RoutingGateway;

use serde::{Deserialize, Serialize};

/// Primary route between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    /// `[longitude, latitude]` pairs along the route.
    pub geometry: Vec<[f64; 2]>,
}
