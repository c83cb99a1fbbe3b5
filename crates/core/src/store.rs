//! The external booking store, as the domain sees it.
//!
//! The submission pipeline talks to a [`BookingStore`] and nothing else;
//! transports, buckets and table names live behind this trait in the
//! store crate. Payload types here serialize to the exact column names of
//! the `bookings` table.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::fields::{BookingStatus, TattooPlacement, TattooSize, Weekday};
use crate::image::ImageAttachment;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures from the store boundary.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached at all.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The store answered with a non-success status.
    #[error("Store rejected the request ({status}): {reason}")]
    Rejected { status: u16, reason: String },
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Insert payload for a from-scratch booking.
///
/// `flash_design_id` is always present and null so the two booking
/// families share one table contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBooking {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub pronouns: String,
    pub age_confirmed: bool,
    pub tattoo_idea: String,
    pub tattoo_size: TattooSize,
    pub tattoo_placement: TattooPlacement,
    pub availability: Vec<Weekday>,
    pub allergies: String,
    pub reference_photos: Vec<String>,
    pub flash_design_id: Option<DbId>,
    pub status: BookingStatus,
}

/// Insert payload for a booking of a flash design.
///
/// The idea text travels as `special_requests` here; the design itself
/// answers what the tattoo is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewFlashBooking {
    pub flash_design_id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub pronouns: String,
    pub age_confirmed: bool,
    pub tattoo_size: TattooSize,
    pub tattoo_placement: TattooPlacement,
    pub preferred_date: Option<Timestamp>,
    pub availability: Vec<Weekday>,
    pub allergies: String,
    pub special_requests: Option<String>,
    pub reference_photos: Vec<String>,
    pub status: BookingStatus,
}

/// What the store reports back for a created booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingAck {
    pub id: DbId,
    pub status: BookingStatus,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Everything submission needs from the outside world.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Upload one reference image and return its public URL.
    async fn upload_image(&self, image: &ImageAttachment) -> Result<String, StoreError>;

    /// Insert a from-scratch booking row.
    async fn create_booking(&self, booking: &NewBooking) -> Result<BookingAck, StoreError>;

    /// Insert a flash-design booking row.
    async fn create_flash_booking(
        &self,
        booking: &NewFlashBooking,
    ) -> Result<BookingAck, StoreError>;
}
