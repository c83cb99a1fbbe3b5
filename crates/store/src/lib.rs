//! Supabase-compatible store client for the booking service.
//!
//! Provides the HTTP implementation of the domain's
//! [`BookingStore`](inkflow_core::store::BookingStore) seam plus read
//! access to the flash design catalog:
//!
//! - [`SupabaseStore`] — reqwest client over the PostgREST and storage
//!   APIs.
//! - [`FlashCatalog`] — catalog listing trait, implemented by the same
//!   client.
//! - [`StoreConfig`] — environment-driven connection settings.

pub mod catalog;
pub mod client;
pub mod config;

pub use catalog::FlashCatalog;
pub use client::SupabaseStore;
pub use config::StoreConfig;
