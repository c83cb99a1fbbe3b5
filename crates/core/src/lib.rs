//! Booking-flow domain for the studio booking service.
//!
//! This crate is pure domain logic with no I/O:
//!
//! - [`BookingFlow`] — stage machine for one client's visit (choosing,
//!   gallery, wizard).
//! - [`WizardSession`] — the nine-step wizard with per-step validation
//!   gating and a submission latch.
//! - [`EntryPolicy`] — how a session starts: from scratch or seeded from
//!   a flash design with the early steps skipped.
//! - [`submission`] — best-effort reference uploads followed by exactly
//!   one booking create, against the [`BookingStore`] trait.

pub mod design;
pub mod draft;
pub mod entry;
pub mod error;
pub mod fields;
pub mod flow;
pub mod image;
pub mod steps;
pub mod store;
pub mod submission;
pub mod types;
pub mod wizard;

pub use design::{FlashDesign, FlashDesignRef};
pub use draft::{BookingDraft, DraftUpdate};
pub use entry::EntryPolicy;
pub use error::CoreError;
pub use flow::{BackOutcome, BookingFlow, Stage};
pub use image::ImageAttachment;
pub use steps::WizardStep;
pub use store::BookingStore;
pub use submission::SubmissionReceipt;
pub use wizard::{PreviousOutcome, WizardSession};
