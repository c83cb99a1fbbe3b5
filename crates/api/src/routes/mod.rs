pub mod booking_flow;
pub mod flash_designs;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /booking-flows                       open flow (POST)
/// /booking-flows/{id}                  snapshot (GET)
/// /booking-flows/{id}/close            close, discard (POST)
/// /booking-flows/{id}/select-option    custom or flash (POST)
/// /booking-flows/{id}/select-design    enter wizard from gallery (POST)
/// /booking-flows/{id}/draft            write one draft field (PUT)
/// /booking-flows/{id}/images           attach reference image (POST, multipart)
/// /booking-flows/{id}/images/{index}   detach reference image (DELETE)
/// /booking-flows/{id}/next             advance one step (POST)
/// /booking-flows/{id}/previous         step back / leave wizard (POST)
/// /booking-flows/{id}/submit           upload images + create booking (POST)
///
/// /flash-designs                       available designs, cheapest first (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Booking flow machine (stages + wizard + submission).
        .nest("/booking-flows", booking_flow::router())
        // Flash design catalog for the gallery stage.
        .nest("/flash-designs", flash_designs::router())
}
