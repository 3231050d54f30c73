use axum::{extract::State, Extension, Json};
use rust_decimal::Decimal;
use sawei_core::{Category, FxRates};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{snapshot, ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct CategoryListing {
    categories: Vec<Category>,
    total_products: usize,
    #[serde(with = "rust_decimal::serde::float_option")]
    min_price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    max_price: Option<Decimal>,
    fx_rates: Option<FxRates>,
}

pub(super) async fn list_categories(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<CategoryListing>>, ApiError> {
    let store = snapshot(&state, &req_id.0)?;
    let range = store.price_range();
    Ok(ApiResponse::new(
        CategoryListing {
            categories: store.categories().to_vec(),
            total_products: store.len(),
            min_price: range.map(|(lo, _)| lo),
            max_price: range.map(|(_, hi)| hi),
            fx_rates: store.metadata().fx_rates,
        },
        req_id.0,
    ))
}
