//! Common utilities shared by the portal crates.
//!
//! This crate provides:
//! - Unified error handling for validation and HTTP failures
//! - Client configuration

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult};
