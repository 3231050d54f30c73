mod admin;
mod categories;
mod checkout;
mod products;
mod search;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use sawei_catalogue::{CatalogueError, CatalogueHandle, CatalogueStore};
use sawei_core::Locale;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, require_bearer_auth, AuthState, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub catalogue: CatalogueHandle,
    pub catalogue_path: Arc<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    catalogue: &'static str,
    products: usize,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(data: T, request_id: String) -> Json<Self> {
        Json(Self {
            data,
            meta: ResponseMeta::new(request_id),
        })
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "unavailable" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn normalize_limit(limit: Option<usize>, default: usize) -> usize {
    limit.unwrap_or(default).clamp(1, 100)
}

/// Parses an optional `locale` query value, defaulting to French.
pub(super) fn parse_locale(request_id: &str, raw: Option<&str>) -> Result<Locale, ApiError> {
    match raw {
        None => Ok(Locale::default()),
        Some(raw) => raw
            .parse()
            .map_err(|e| ApiError::new(request_id, "validation_error", format!("{e}"))),
    }
}

pub(super) fn map_catalogue_error(request_id: String, error: &CatalogueError) -> ApiError {
    match error {
        CatalogueError::NotLoaded => ApiError::new(request_id, "unavailable", "catalogue not loaded"),
        other => {
            tracing::error!(error = %other, "catalogue access failed");
            ApiError::new(request_id, "internal_error", "catalogue access failed")
        }
    }
}

/// The current catalogue snapshot, or a 503 before the first load.
pub(super) fn snapshot(
    state: &AppState,
    request_id: &str,
) -> Result<Arc<CatalogueStore>, ApiError> {
    state
        .catalogue
        .snapshot()
        .map_err(|e| map_catalogue_error(request_id.to_string(), &e))
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

fn admin_router(auth: AuthState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/admin/reload", post(admin::reload_catalogue))
        .layer(axum::middleware::from_fn_with_state(
            auth,
            require_bearer_auth,
        ))
}

pub fn build_app(state: AppState, auth: AuthState) -> Router {
    let public_routes = Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/products", get(products::list_products))
        .route("/api/v1/products/{slug}", get(products::get_product))
        .route(
            "/api/v1/products/{slug}/related",
            get(products::list_related),
        )
        .route("/api/v1/search", get(search::search_products))
        .route("/api/v1/search/suggestions", get(search::suggest))
        .route("/api/v1/categories", get(categories::list_categories))
        .route("/api/v1/checkout/quote", get(checkout::quote));

    Router::new()
        .merge(public_routes)
        .merge(admin_router(auth))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    match state.catalogue.snapshot() {
        Ok(store) => (
            StatusCode::OK,
            ApiResponse::new(
                HealthData {
                    status: "ok",
                    catalogue: "loaded",
                    products: store.len(),
                },
                req_id.0,
            ),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: catalogue unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiResponse::new(
                    HealthData {
                        status: "degraded",
                        catalogue: "unloaded",
                        products: 0,
                    },
                    req_id.0,
                ),
            )
        }
    }
}
