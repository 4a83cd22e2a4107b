//! Error handling.
//!
//! This module provides:
//! - The validation error model ([`ValidationError`], [`StatusCode`], [`ErrorCause`])
//! - Process setup errors ([`InitializationError`], [`ConfigError`])
//!
//! Validation failures are categorized by status:
//! - **400**: a precondition failed before any DNS query was issued
//! - **404**: the record is missing or does not match the allow-list
//! - **409**: mutually exclusive records were published
//! - **500**: the resolver failed, or the CNAME chain was too long

mod types;

// Re-export public API
pub use types::{ConfigError, ErrorCause, InitializationError, StatusCode, ValidationError};
