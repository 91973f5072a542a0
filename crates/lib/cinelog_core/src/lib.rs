//! # cinelog_core
//!
//! Core domain logic for Cinelog: typed API client, persisted session store,
//! derived catalog/review state, and the review/admin workflows.

pub mod api;
pub mod catalog;
pub mod config;
pub mod models;
pub mod reviews;
pub mod service;
pub mod session;
pub mod workflow;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
