//! Route definitions for the flash design catalog.
//!
//! Mounted at `/flash-designs` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::flash_designs;
use crate::state::AppState;

/// Flash design catalog routes, mounted at `/flash-designs`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(flash_designs::list_available))
}
