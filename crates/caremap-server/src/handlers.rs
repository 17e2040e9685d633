use axum::{
    Json,
    extract::{Path, Query, State, rejection::PathRejection, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use caremap_api::ApiError;
use caremap_core::{DoctorId, FacilityId, FacilityType};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::directory::{DoctorListItem, FacilityFilter, FacilityView};
use crate::routing::RouteResult;
use crate::server::AppState;

#[derive(Serialize)]
pub struct HealthResponse<'a> {
    status: &'a str,
}

pub async fn root(State(state): State<AppState>) -> impl IntoResponse {
    let body = json!({
        "service": "CareMap",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "storage": state.directory.store().backend_name(),
    });
    (StatusCode::OK, Json(body))
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}

pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    match state.directory.store().ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse { status: "ready" })),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable",
                }),
            )
        }
    }
}

// ---- Directory ----

pub async fn list_doctors(
    State(state): State<AppState>,
) -> Result<Json<Vec<DoctorListItem>>, ApiError> {
    Ok(Json(state.directory.list_doctors().await?))
}

pub async fn get_doctor(
    State(state): State<AppState>,
    id: Result<Path<DoctorId>, PathRejection>,
) -> Result<Json<DoctorListItem>, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::bad_request(e.body_text()))?;
    Ok(Json(state.directory.get_doctor(id).await?))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityQuery {
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub facility_type: Option<String>,
    pub wheelchair_accessible: Option<bool>,
}

impl FacilityQuery {
    fn into_filter(self) -> Result<FacilityFilter, ApiError> {
        let facility_type = match self.facility_type.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                raw.parse::<FacilityType>()
                    .map_err(|e| ApiError::bad_request(e.to_string()))?,
            ),
        };
        Ok(FacilityFilter {
            q: self.q,
            facility_type,
            wheelchair_accessible: self.wheelchair_accessible,
        })
    }
}

pub async fn list_facilities(
    State(state): State<AppState>,
    query: Result<Query<FacilityQuery>, QueryRejection>,
) -> Result<Json<Vec<FacilityView>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let filter = query.into_filter()?;
    Ok(Json(state.directory.list_facilities_filtered(&filter).await?))
}

pub async fn get_facility(
    State(state): State<AppState>,
    id: Result<Path<FacilityId>, PathRejection>,
) -> Result<Json<FacilityView>, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::bad_request(e.body_text()))?;
    Ok(Json(state.directory.get_facility(id).await?))
}

// ---- Routing ----

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteQuery {
    pub from_lat: f64,
    pub from_lon: f64,
    pub to_lat: f64,
    pub to_lon: f64,
}

pub async fn route(
    State(state): State<AppState>,
    query: Result<Query<RouteQuery>, QueryRejection>,
) -> Result<Json<RouteResult>, ApiError> {
    let Query(q) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    if ![q.from_lat, q.from_lon, q.to_lat, q.to_lon]
        .iter()
        .all(|v| v.is_finite())
    {
        return Err(ApiError::bad_request("coordinates must be finite numbers"));
    }

    let result = state
        .routing
        .route(q.from_lat, q.from_lon, q.to_lat, q.to_lon)
        .await?;
    Ok(Json(result))
}
