//! Turning a finished draft into store calls.
//!
//! Uploads run in small concurrent waves and are best effort: a failed
//! image is logged, counted and dropped. The booking create happens
//! exactly once, strictly after every upload attempt has resolved, and
//! its failure is the only fatal outcome.

use futures::future;
use serde::Serialize;

use crate::draft::BookingDraft;
use crate::error::CoreError;
use crate::fields::{BookingStatus, TattooPlacement, TattooSize};
use crate::store::{BookingAck, BookingStore, NewBooking, NewFlashBooking, StoreError};
use crate::types::DbId;

/// Reference images uploaded concurrently per wave.
pub const UPLOAD_CHUNK_SIZE: usize = 3;

/// What one successful submission produced.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub booking: BookingAck,
    /// Public URLs of the uploads that succeeded.
    pub photo_urls: Vec<String>,
    /// Uploads that failed and were left out of the booking.
    pub failed_uploads: usize,
}

/// Run one submission attempt against the store.
///
/// The draft must have passed the wizard's submission sweep; this
/// function re-checks only what it structurally depends on (a selected
/// size and placement).
pub async fn submit(
    store: &dyn BookingStore,
    draft: &BookingDraft,
) -> Result<SubmissionReceipt, CoreError> {
    let (photo_urls, failed_uploads) = upload_reference_images(store, draft).await;

    let created = match draft.linked_design() {
        Some(design) => {
            let payload = build_flash_booking(draft, design.id, &photo_urls)?;
            store.create_flash_booking(&payload).await
        }
        None => {
            let payload = build_booking(draft, &photo_urls)?;
            store.create_booking(&payload).await
        }
    };

    let booking = created.map_err(|error| {
        tracing::error!(error = %error, "Booking creation failed");
        CoreError::Submission(error.to_string())
    })?;

    if failed_uploads > 0 {
        tracing::warn!(
            booking_id = booking.id,
            failed_uploads,
            "Booking created with some reference uploads missing"
        );
    }

    Ok(SubmissionReceipt {
        booking,
        photo_urls,
        failed_uploads,
    })
}

/// Upload every reference image, [`UPLOAD_CHUNK_SIZE`] at a time.
///
/// Every attempt resolves before this returns; per-image failures are
/// absorbed here and never abort the batch.
async fn upload_reference_images(
    store: &dyn BookingStore,
    draft: &BookingDraft,
) -> (Vec<String>, usize) {
    let mut photo_urls = Vec::new();
    let mut failed = 0usize;

    for wave in draft.reference_images().chunks(UPLOAD_CHUNK_SIZE) {
        let results = future::join_all(wave.iter().map(|image| store.upload_image(image))).await;
        for (image, result) in wave.iter().zip(results) {
            match result {
                Ok(url) => photo_urls.push(url),
                Err(error) => {
                    tracing::warn!(
                        file_name = image.file_name(),
                        error = %error,
                        "Reference image upload failed; the booking proceeds without it"
                    );
                    failed += 1;
                }
            }
        }
    }

    (photo_urls, failed)
}

fn require_size_and_placement(
    draft: &BookingDraft,
) -> Result<(TattooSize, TattooPlacement), CoreError> {
    let size = draft
        .size()
        .ok_or_else(|| CoreError::Validation("Please select a tattoo size".to_string()))?;
    let placement = draft
        .placement()
        .ok_or_else(|| CoreError::Validation("Please select a tattoo placement".to_string()))?;
    Ok((size, placement))
}

fn build_booking(draft: &BookingDraft, photo_urls: &[String]) -> Result<NewBooking, CoreError> {
    let (tattoo_size, tattoo_placement) = require_size_and_placement(draft)?;
    Ok(NewBooking {
        first_name: draft.first_name().to_string(),
        last_name: draft.last_name().to_string(),
        email: draft.email().to_string(),
        phone: draft.phone().to_string(),
        pronouns: draft.pronouns().to_string(),
        age_confirmed: draft.age_confirmed(),
        tattoo_idea: draft.idea().to_string(),
        tattoo_size,
        tattoo_placement,
        availability: draft.available_days().iter().copied().collect(),
        allergies: draft.allergies().to_string(),
        reference_photos: photo_urls.to_vec(),
        flash_design_id: None,
        status: BookingStatus::Pending,
    })
}

fn build_flash_booking(
    draft: &BookingDraft,
    design_id: DbId,
    photo_urls: &[String],
) -> Result<NewFlashBooking, CoreError> {
    let (tattoo_size, tattoo_placement) = require_size_and_placement(draft)?;
    let special_requests = if draft.idea().is_empty() {
        None
    } else {
        Some(draft.idea().to_string())
    };
    Ok(NewFlashBooking {
        flash_design_id: design_id,
        first_name: draft.first_name().to_string(),
        last_name: draft.last_name().to_string(),
        email: draft.email().to_string(),
        phone: draft.phone().to_string(),
        pronouns: draft.pronouns().to_string(),
        age_confirmed: draft.age_confirmed(),
        tattoo_size,
        tattoo_placement,
        preferred_date: None,
        availability: draft.available_days().iter().copied().collect(),
        allergies: draft.allergies().to_string(),
        special_requests,
        reference_photos: photo_urls.to_vec(),
        status: BookingStatus::Pending,
    })
}
