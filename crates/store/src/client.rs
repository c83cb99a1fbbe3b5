//! Supabase-compatible store client.
//!
//! Implements [`BookingStore`] over the PostgREST and storage HTTP APIs
//! using [`reqwest`]: bookings are rows inserted into `/rest/v1/bookings`,
//! reference images are objects uploaded under the configured bucket and
//! served from the public object URL.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use uuid::Uuid;

use inkflow_core::image::ImageAttachment;
use inkflow_core::store::{BookingAck, BookingStore, NewBooking, NewFlashBooking, StoreError};

use crate::config::StoreConfig;

/// Directory inside the bucket where reference images land.
const UPLOAD_DIR: &str = "bookings";

/// HTTP client for one Supabase-compatible store.
pub struct SupabaseStore {
    client: reqwest::Client,
    config: StoreConfig,
}

impl SupabaseStore {
    /// Create a new client for the given store.
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(transport)?;
        Ok(Self { client, config })
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful
    /// for connection pooling and for tests).
    pub fn with_client(client: reqwest::Client, config: StoreConfig) -> Self {
        Self { client, config }
    }

    // ---- URL building ----

    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.base_url, table)
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.config.base_url, self.config.bucket, path
        )
    }

    /// Public URL an uploaded object is served from.
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.base_url, self.config.bucket, path
        )
    }

    /// Bucket path for a new upload: a random name under the bookings
    /// directory, extension taken from the sniffed format.
    fn object_path(image: &ImageAttachment) -> String {
        format!("{UPLOAD_DIR}/{}.{}", Uuid::new_v4(), image.extension())
    }

    // ---- Requests ----

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }

    /// GET a JSON document from an authenticated endpoint.
    pub(crate) async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
    ) -> Result<T, StoreError> {
        let response = self
            .authed(self.client.get(url))
            .send()
            .await
            .map_err(transport)?;
        Self::parse_json(response).await
    }

    /// Insert one row into `bookings` and read back the created row.
    ///
    /// The PostgREST object `Accept` header makes the store return the
    /// single row directly instead of a one-element array.
    async fn insert_booking<T: serde::Serialize + ?Sized>(
        &self,
        row: &T,
    ) -> Result<BookingAck, StoreError> {
        let response = self
            .authed(self.client.post(self.rest_url("bookings")))
            .header("Prefer", "return=representation")
            .header(header::ACCEPT, "application/vnd.pgrst.object+json")
            .json(row)
            .send()
            .await
            .map_err(transport)?;
        let ack: BookingAck = Self::parse_json(response).await?;
        tracing::debug!(booking_id = ack.id, "Booking row inserted");
        Ok(ack)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`StoreError::Rejected`]
    /// carrying the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let reason = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                reason,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, StoreError> {
        let response = Self::ensure_success(response).await?;
        response.json::<T>().await.map_err(transport)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), StoreError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

/// Collapse a reqwest failure into the transport variant.
fn transport(error: reqwest::Error) -> StoreError {
    StoreError::Transport(error.to_string())
}

#[async_trait]
impl BookingStore for SupabaseStore {
    async fn upload_image(&self, image: &ImageAttachment) -> Result<String, StoreError> {
        let path = Self::object_path(image);
        tracing::debug!(
            path = %path,
            size_bytes = image.size_bytes(),
            "Uploading reference image"
        );

        let response = self
            .authed(self.client.post(self.object_url(&path)))
            .header(header::CONTENT_TYPE, image.content_type())
            .body(image.bytes().to_vec())
            .send()
            .await
            .map_err(transport)?;
        Self::check_status(response).await?;

        Ok(self.public_url(&path))
    }

    async fn create_booking(&self, booking: &NewBooking) -> Result<BookingAck, StoreError> {
        self.insert_booking(booking).await
    }

    async fn create_flash_booking(
        &self,
        booking: &NewFlashBooking,
    ) -> Result<BookingAck, StoreError> {
        self.insert_booking(booking).await
    }
}
