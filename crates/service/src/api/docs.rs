use axum::Json;
use utoipa::OpenApi;

use super::{ErrorResponse, geo, health};

/// OpenAPI description of the service. Served at `/openapi.json` and written
/// to disk by the exporter binary.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Geo IPv6 API",
        version = "1.0.0",
        description = "Geolocation lookups for IPv6 addresses, backed by public providers."
    ),
    paths(health::health, geo::geo_by_query, geo::geo_by_path),
    components(schemas(geo::GeoResponse, ErrorResponse, health::Health)),
    tags(
        (name = "health", description = "Service health"),
        (name = "geo", description = "IPv6 geolocation lookups")
    )
)]
pub struct ApiDoc;

pub(super) async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
