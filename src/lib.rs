//! Plaza: terminal client for a classifieds marketplace.
//!
//! The binary in `main.rs` is the product; the library exists so
//! integration tests can drive the wizard and API types directly.

pub mod api;
pub mod app;
pub mod config;
pub mod logging;
pub mod services;
pub mod session;
pub mod types;
pub mod ui;
pub mod validation;
