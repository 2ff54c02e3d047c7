use std::sync::Arc;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use utoipa::ToSchema;

use crate::{Error, GeoResolver};

mod docs;
mod geo;
mod health;

pub use docs::ApiDoc;

/// State shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    resolver: Arc<GeoResolver>,
}

impl AppState {
    pub fn new(resolver: GeoResolver) -> AppState {
        AppState {
            resolver: Arc::new(resolver),
        }
    }
}

/// Builds the service router with all routes and request tracing attached.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/geo", get(geo::geo_by_query))
        .route("/geo/{ip}", get(geo::geo_by_path))
        .route("/openapi.json", get(docs::openapi_json))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Error reply body, always `{"detail": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human readable description of what went wrong.
    pub detail: String,
}

/// A handler failure with the HTTP status it maps to. Invalid addresses are
/// the client's fault, exhausted providers are an upstream failure.
pub(crate) struct ApiError {
    status: StatusCode,
    detail: String,
}

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        let status = match value {
            Error::InvalidAddress(_) => StatusCode::BAD_REQUEST,
            Error::Lookup(_) => StatusCode::BAD_GATEWAY,
        };
        ApiError {
            status,
            detail: value.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                detail: self.detail,
            }),
        )
            .into_response()
    }
}
