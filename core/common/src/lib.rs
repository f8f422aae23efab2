//! Common types shared across Cloakbox crates.
//!
//! This crate provides the error taxonomy used by every other module,
//! ensuring a single consistent `Result` type throughout the codebase.

pub mod error;

pub use error::{Error, Result};
