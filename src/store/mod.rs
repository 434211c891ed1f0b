//! Demo profile store.
//!
//! Stands in for a remote talent search API: searches a fixed catalog,
//! expands hits into full profiles and simulates network latency.

pub mod catalog;
pub mod demo;

pub use demo::{BatchOptions, DemoProfileStore, StoreOptions};

use thiserror::Error;

/// Errors returned by the profile store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("profile '{0}' not found")]
    NotFound(String),
}
