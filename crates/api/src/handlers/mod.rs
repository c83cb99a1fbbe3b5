//! Request handlers, one submodule per resource.
//!
//! Handlers hold no booking logic of their own: they translate HTTP
//! requests into [`inkflow_core`] flow operations and map errors via
//! [`crate::error::AppError`].

pub mod booking_flow;
pub mod flash_designs;
