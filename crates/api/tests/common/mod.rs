#![allow(dead_code)] // each test binary uses a different subset of helpers

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use inkflow_core::design::FlashDesign;
use inkflow_core::fields::BookingStatus;
use inkflow_core::image::ImageAttachment;
use inkflow_core::store::{
    BookingAck, BookingStore, NewBooking, NewFlashBooking, StoreError,
};
use inkflow_store::FlashCatalog;

use inkflow_api::config::ServerConfig;
use inkflow_api::flows::FlowRegistry;
use inkflow_api::routes;
use inkflow_api::state::AppState;

/// PNG byte header, enough for format sniffing.
pub const PNG: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// GIF byte header, a format the wizard rejects.
pub const GIF: [u8; 6] = [b'G', b'I', b'F', b'8', b'9', b'a'];

// ---------------------------------------------------------------------------
// Store double
// ---------------------------------------------------------------------------

/// In-memory store double with scriptable failures and recorded calls.
#[derive(Default)]
pub struct StubStore {
    /// Scripted upload outcomes, consumed front to back. An empty script
    /// means every upload succeeds with a predictable URL.
    pub upload_script: Mutex<VecDeque<Result<String, StoreError>>>,
    pub fail_create: AtomicBool,
    pub fail_catalog: AtomicBool,
    pub designs: Mutex<Vec<FlashDesign>>,
    pub bookings: Mutex<Vec<NewBooking>>,
    pub flash_bookings: Mutex<Vec<NewFlashBooking>>,
}

impl StubStore {
    pub fn script_uploads(&self, script: Vec<Result<String, StoreError>>) {
        *self.upload_script.lock().unwrap() = script.into();
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_catalog(&self, fail: bool) {
        self.fail_catalog.store(fail, Ordering::SeqCst);
    }

    pub fn seed_designs(&self, designs: Vec<FlashDesign>) {
        *self.designs.lock().unwrap() = designs;
    }

    fn ack() -> BookingAck {
        BookingAck {
            id: 77,
            status: BookingStatus::Pending,
            created_at: chrono::Utc::now(),
        }
    }
}

#[async_trait]
impl BookingStore for StubStore {
    async fn upload_image(&self, image: &ImageAttachment) -> Result<String, StoreError> {
        self.upload_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(format!("https://cdn.test/{}", image.file_name())))
    }

    async fn create_booking(&self, booking: &NewBooking) -> Result<BookingAck, StoreError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected {
                status: 500,
                reason: "insert failed".to_string(),
            });
        }
        self.bookings.lock().unwrap().push(booking.clone());
        Ok(Self::ack())
    }

    async fn create_flash_booking(
        &self,
        booking: &NewFlashBooking,
    ) -> Result<BookingAck, StoreError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected {
                status: 500,
                reason: "insert failed".to_string(),
            });
        }
        self.flash_bookings.lock().unwrap().push(booking.clone());
        Ok(Self::ack())
    }
}

#[async_trait]
impl FlashCatalog for StubStore {
    async fn list_available(&self) -> Result<Vec<FlashDesign>, StoreError> {
        if self.fail_catalog.load(Ordering::SeqCst) {
            return Err(StoreError::Transport("catalog offline".to_string()));
        }
        Ok(self.designs.lock().unwrap().clone())
    }
}

/// A catalog row for seeding [`StubStore`].
pub fn moth_design() -> FlashDesign {
    FlashDesign {
        id: 12,
        title: "Moth".to_string(),
        description: "Lunar moth, fine line".to_string(),
        image_url: "https://cdn.test/designs/moth.webp".to_string(),
        price: 140.0,
        category: "fine-line".to_string(),
        available: true,
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        flow_idle_ttl_secs: 1800,
        max_upload_bytes: 12 * 1024 * 1024,
    }
}

/// Build the full application router with all middleware layers, plus a
/// handle on the store double for scripting and assertions.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery, body cap) that production uses. Requests share one
/// router: clone it per call, the state inside is shared.
pub fn build_test_app() -> (Router, Arc<StubStore>) {
    let store = Arc::new(StubStore::default());
    let config = test_config();

    let state = AppState {
        flows: Arc::new(FlowRegistry::new()),
        store: store.clone(),
        catalog: store.clone(),
        config: Arc::new(config.clone()),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .layer(axum::extract::DefaultBodyLimit::max(config.max_upload_bytes))
        .with_state(state);

    (app, store)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::PUT)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// POST a `multipart/form-data` body holding one `image` part.
pub async fn post_image(app: Router, uri: &str, file_name: &str, bytes: &[u8]) -> Response {
    let boundary = "inkflow-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
