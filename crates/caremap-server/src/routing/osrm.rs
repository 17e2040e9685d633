//! OSRM `route/v1` request building and response validation.

use serde_json::Value;

use super::{RouteResult, RoutingError};

/// Query string requesting the full route geometry as GeoJSON.
pub const ROUTE_QUERY: &str = "overview=full&geometries=geojson";

/// Renders a coordinate in plain decimal notation with at least one
/// fractional digit: `7.0` becomes `"7.0"`, never `"7"` or `"7e0"`.
pub fn format_coordinate(value: f64) -> String {
    let mut rendered = value.to_string();
    if value.is_finite() && !rendered.contains('.') {
        rendered.push_str(".0");
    }
    rendered
}

/// Path and query of a driving route request, longitude first.
pub fn route_path(from_lat: f64, from_lon: f64, to_lat: f64, to_lon: f64) -> String {
    format!(
        "/route/v1/driving/{},{};{},{}?{ROUTE_QUERY}",
        format_coordinate(from_lon),
        format_coordinate(from_lat),
        format_coordinate(to_lon),
        format_coordinate(to_lat),
    )
}

/// Extracts the primary route from a 2xx response body.
pub fn parse_route_response(body: &[u8]) -> Result<RouteResult, RoutingError> {
    let document: Value = match serde_json::from_slice(body) {
        Ok(value @ Value::Object(_)) => value,
        _ => return Err(RoutingError::EmptyUpstreamResponse),
    };

    let first = match document.get("routes") {
        None | Some(Value::Null) => return Err(RoutingError::NoRouteFound),
        Some(Value::Array(routes)) => routes.first().ok_or(RoutingError::NoRouteFound)?,
        Some(_) => return Err(RoutingError::malformed("routes is not an array")),
    };

    let distance_meters = number(first, "distance")?;
    let duration_seconds = number(first, "duration")?;

    let coordinates = first
        .get("geometry")
        .and_then(|g| g.get("coordinates"))
        .and_then(Value::as_array)
        .ok_or_else(|| RoutingError::malformed("geometry.coordinates is missing"))?;

    let geometry = coordinates
        .iter()
        .enumerate()
        .map(|(i, point)| position(point).ok_or_else(|| {
            RoutingError::malformed(format!("geometry.coordinates[{i}] is not a [lon, lat] pair"))
        }))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RouteResult {
        distance_meters,
        duration_seconds,
        geometry,
    })
}

/// OSRM error bodies carry `code` and `message`; used for diagnostics only.
pub fn error_summary(body: &[u8]) -> Option<String> {
    let document: Value = serde_json::from_slice(body).ok()?;
    let code = document.get("code").and_then(Value::as_str)?;
    match document.get("message").and_then(Value::as_str) {
        Some(message) => Some(format!("{code}: {message}")),
        None => Some(code.to_string()),
    }
}

fn number(route: &Value, field: &str) -> Result<f64, RoutingError> {
    route
        .get(field)
        .and_then(Value::as_f64)
        .ok_or_else(|| RoutingError::malformed(format!("{field} is missing or not a number")))
}

fn position(point: &Value) -> Option<[f64; 2]> {
    match point.as_array()?.as_slice() {
        [lon, lat] => Some([lon.as_f64()?, lat.as_f64()?]),
        _ => None,
    }
}
