use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use rust_decimal::Decimal;
use sawei_catalogue::{ProductFilter, SortBy};
use sawei_core::Product;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{normalize_limit, parse_locale, snapshot, ApiError, ApiResponse, AppState};

const DEFAULT_PAGE_SIZE: usize = 24;
const DEFAULT_RELATED: usize = 4;

#[derive(Debug, Serialize)]
pub(super) struct ProductPage {
    items: Vec<Product>,
    total: usize,
    limit: usize,
    offset: usize,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProductQuery {
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub search: Option<String>,
    pub locale: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RelatedQuery {
    pub limit: Option<usize>,
}

fn parse_price(
    request_id: &str,
    field: &str,
    raw: Option<&str>,
) -> Result<Option<Decimal>, ApiError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    raw.parse::<Decimal>().map(Some).map_err(|_| {
        ApiError::new(
            request_id,
            "validation_error",
            format!("{field} must be a decimal number"),
        )
    })
}

fn not_found(request_id: &str, slug: &str) -> ApiError {
    ApiError::new(request_id, "not_found", format!("no product with slug {slug}"))
}

impl ProductQuery {
    fn to_filter(&self, request_id: &str) -> Result<ProductFilter, ApiError> {
        let sort_by = match self.sort.as_deref() {
            None => SortBy::default(),
            Some(raw) => raw
                .parse()
                .map_err(|e: String| ApiError::new(request_id, "validation_error", e))?,
        };
        Ok(ProductFilter {
            category: self.category.clone(),
            min_price: parse_price(request_id, "min_price", self.min_price.as_deref())?,
            max_price: parse_price(request_id, "max_price", self.max_price.as_deref())?,
            search_text: self.search.clone(),
            locale: parse_locale(request_id, self.locale.as_deref())?,
            sort_by,
        })
    }
}

pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<ApiResponse<ProductPage>>, ApiError> {
    let filter = query.to_filter(&req_id.0)?;
    let store = snapshot(&state, &req_id.0)?;

    let matched = store.filter(&filter);
    let limit = normalize_limit(query.limit, DEFAULT_PAGE_SIZE);
    let offset = query.offset.unwrap_or(0);
    let items = matched
        .iter()
        .skip(offset)
        .take(limit)
        .map(|p| (*p).clone())
        .collect();

    Ok(ApiResponse::new(
        ProductPage {
            items,
            total: matched.len(),
            limit,
            offset,
        },
        req_id.0,
    ))
}

pub(super) async fn get_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<Product>>, ApiError> {
    let store = snapshot(&state, &req_id.0)?;
    let product = store
        .get_by_slug(&slug)
        .cloned()
        .ok_or_else(|| not_found(&req_id.0, &slug))?;
    Ok(ApiResponse::new(product, req_id.0))
}

pub(super) async fn list_related(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(slug): Path<String>,
    Query(query): Query<RelatedQuery>,
) -> Result<Json<ApiResponse<Vec<Product>>>, ApiError> {
    let store = snapshot(&state, &req_id.0)?;
    let product = store
        .get_by_slug(&slug)
        .ok_or_else(|| not_found(&req_id.0, &slug))?;
    let related = store
        .related(product, normalize_limit(query.limit, DEFAULT_RELATED))
        .into_iter()
        .cloned()
        .collect();
    Ok(ApiResponse::new(related, req_id.0))
}
