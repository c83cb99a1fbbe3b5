//! Route definitions for the booking flow machine.
//!
//! Mounted at `/booking-flows` by `api_routes()`.
//!
//! ```text
//! POST   /                      open_flow
//! GET    /{id}                  get_flow
//! POST   /{id}/close            close_flow
//! POST   /{id}/select-option    select_option
//! POST   /{id}/select-design    select_design
//! PUT    /{id}/draft            update_draft
//! POST   /{id}/images           attach_image
//! DELETE /{id}/images/{index}   detach_image
//! POST   /{id}/next             next_step
//! POST   /{id}/previous         previous_step
//! POST   /{id}/submit           submit
//! ```

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::booking_flow;
use crate::state::AppState;

/// Booking flow routes, mounted at `/booking-flows`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(booking_flow::open_flow))
        .route("/{id}", get(booking_flow::get_flow))
        .route("/{id}/close", post(booking_flow::close_flow))
        .route("/{id}/select-option", post(booking_flow::select_option))
        .route("/{id}/select-design", post(booking_flow::select_design))
        .route("/{id}/draft", put(booking_flow::update_draft))
        .route("/{id}/images", post(booking_flow::attach_image))
        .route("/{id}/images/{index}", delete(booking_flow::detach_image))
        .route("/{id}/next", post(booking_flow::next_step))
        .route("/{id}/previous", post(booking_flow::previous_step))
        .route("/{id}/submit", post(booking_flow::submit))
}
