use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

use super::{ApiError, AppState, ErrorResponse};

/// Geolocation data for a single IPv6 address.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GeoResponse {
    /// The queried address, echoed back.
    #[schema(example = "2001:4860:4860::8888")]
    pub ip: String,
    /// Name of the provider that supplied the data.
    #[schema(example = "ipapi")]
    pub provider: String,
    /// Provider response body, passed through unmodified.
    #[schema(value_type = Object)]
    pub data: Map<String, Value>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GeoQuery {
    /// IPv6 address to look up.
    pub ip: String,
}

/// IPv6 geolocation lookup by query parameter.
#[utoipa::path(
    get,
    path = "/geo",
    tag = "geo",
    params(GeoQuery),
    responses(
        (status = 200, description = "Geolocation data found", body = GeoResponse),
        (status = 400, description = "Not a valid IPv6 address", body = ErrorResponse),
        (status = 502, description = "No provider returned usable data", body = ErrorResponse),
    )
)]
pub(super) async fn geo_by_query(
    State(state): State<AppState>,
    Query(query): Query<GeoQuery>,
) -> Result<Json<GeoResponse>, ApiError> {
    lookup(&state, query.ip).await
}

/// IPv6 geolocation lookup by path parameter (legacy route).
#[utoipa::path(
    get,
    path = "/geo/{ip}",
    tag = "geo",
    params(("ip" = String, Path, description = "IPv6 address to look up")),
    responses(
        (status = 200, description = "Geolocation data found", body = GeoResponse),
        (status = 400, description = "Not a valid IPv6 address", body = ErrorResponse),
        (status = 502, description = "No provider returned usable data", body = ErrorResponse),
    )
)]
pub(super) async fn geo_by_path(
    State(state): State<AppState>,
    Path(ip): Path<String>,
) -> Result<Json<GeoResponse>, ApiError> {
    lookup(&state, ip).await
}

async fn lookup(state: &AppState, ip: String) -> Result<Json<GeoResponse>, ApiError> {
    let lookup = state.resolver.resolve(&ip).await?;
    Ok(Json(GeoResponse {
        ip,
        provider: lookup.provider.to_string(),
        data: lookup.data,
    }))
}
