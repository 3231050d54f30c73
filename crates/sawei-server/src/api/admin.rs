use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_catalogue_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct ReloadSummary {
    products: usize,
    categories: usize,
    repaired: usize,
}

/// Re-reads the catalogue document and swaps it in. A failed reload leaves
/// the previous catalogue serving.
pub(super) async fn reload_catalogue(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<ReloadSummary>>, ApiError> {
    let handle = state.catalogue.clone();
    let path = state.catalogue_path.clone();
    let diagnostics = tokio::task::spawn_blocking(move || handle.reload(&path))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "reload task failed");
            ApiError::new(req_id.0.clone(), "internal_error", "reload task failed")
        })?
        .map_err(|e| {
            tracing::error!(path = %state.catalogue_path.display(), error = %e, "catalogue reload failed");
            map_catalogue_error(req_id.0.clone(), &e)
        })?;

    let store = state
        .catalogue
        .snapshot()
        .map_err(|e| map_catalogue_error(req_id.0.clone(), &e))?;
    Ok(ApiResponse::new(
        ReloadSummary {
            products: store.len(),
            categories: store.categories().len(),
            repaired: diagnostics.len(),
        },
        req_id.0,
    ))
}
