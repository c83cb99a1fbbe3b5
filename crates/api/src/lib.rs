//! Inkflow API server library.
//!
//! Exposes the core building blocks (config, state, error handling, flow
//! registry, routes) so integration tests and the binary entrypoint can
//! both access them.

pub mod background;
pub mod config;
pub mod error;
pub mod flows;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;
