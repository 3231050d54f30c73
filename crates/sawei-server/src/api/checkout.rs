use axum::{
    extract::{Query, State},
    Extension, Json,
};
use sawei_catalogue::{quote_for_checkout, CheckoutQuote, QuoteError};
use sawei_core::Currency;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{snapshot, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct QuoteQuery {
    pub product_id: String,
    pub currency: Option<String>,
}

pub(super) async fn quote(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<ApiResponse<CheckoutQuote>>, ApiError> {
    let currency = match query.currency.as_deref() {
        None => Currency::default(),
        Some(raw) => raw
            .parse()
            .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", format!("{e}")))?,
    };
    let store = snapshot(&state, &req_id.0)?;

    let quote = quote_for_checkout(&store, &query.product_id, currency).map_err(|e| match e {
        QuoteError::ProductNotFound(_) => {
            ApiError::new(req_id.0.clone(), "not_found", e.to_string())
        }
        QuoteError::AmountOutOfRange { .. } => {
            tracing::error!(error = %e, product_id = %query.product_id, "checkout quote failed");
            ApiError::new(req_id.0.clone(), "internal_error", "price cannot be quoted")
        }
    })?;
    Ok(ApiResponse::new(quote, req_id.0))
}
