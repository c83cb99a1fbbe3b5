//! Handlers for the flash design catalog.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/flash-designs
///
/// List designs currently available for booking, cheapest first. Backed
/// by the catalog read side; a store failure surfaces as 502 rather than
/// an empty gallery.
pub async fn list_available(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let designs = state.catalog.list_available().await?;

    tracing::debug!(count = designs.len(), "Listed flash designs");

    Ok(Json(DataResponse { data: designs }))
}
