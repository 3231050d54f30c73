use axum::{
    extract::{Query, State},
    Extension, Json,
};
use sawei_core::Product;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{normalize_limit, parse_locale, snapshot, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub locale: Option<String>,
    pub limit: Option<usize>,
}

pub(super) async fn search_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<Product>>>, ApiError> {
    let locale = parse_locale(&req_id.0, query.locale.as_deref())?;
    let store = snapshot(&state, &req_id.0)?;
    let hits = store
        .search(&query.q, locale)
        .into_iter()
        .take(normalize_limit(query.limit, 20))
        .cloned()
        .collect();
    Ok(ApiResponse::new(hits, req_id.0))
}

pub(super) async fn suggest(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let locale = parse_locale(&req_id.0, query.locale.as_deref())?;
    let store = snapshot(&state, &req_id.0)?;
    let suggestions = store.suggest(&query.q, locale, normalize_limit(query.limit, 8));
    Ok(ApiResponse::new(suggestions, req_id.0))
}
