use std::sync::Arc;

use inkflow_core::store::BookingStore;
use inkflow_store::FlashCatalog;

use crate::config::ServerConfig;
use crate::flows::FlowRegistry;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Registry of live booking flows, keyed by flow id.
    pub flows: Arc<FlowRegistry>,
    /// Store used by the submission pipeline (uploads + booking create).
    pub store: Arc<dyn BookingStore>,
    /// Read side of the flash design catalog.
    pub catalog: Arc<dyn FlashCatalog>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
