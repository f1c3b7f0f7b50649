//! Common utilities shared across the facility records crates.
//!
//! This crate provides:
//! - Unified error handling with HTTP status classification
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
