//! Error type definitions.
//!
//! This module defines the validation error model and the errors raised while
//! setting up the process (logger, resolver, allow-list file).

use std::collections::BTreeMap;
use std::path::PathBuf;

use log::SetLoggerError;
use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::dns::{LookupError, RecordType};
use crate::validation::ChainEntry;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the DNS resolver.
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),
}

/// Error types for allow-list file loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read allow-list {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid allow-list document.
    #[error("Failed to parse allow-list {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// HTTP-like status attached to every validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum StatusCode {
    /// A precondition was not met before any query was issued (400)
    BadRequest,
    /// The record is missing or does not match the allow-list (404)
    NotFound,
    /// Mutually exclusive records were published (409)
    Conflict,
    /// Resolver failure or a generic validation failure (500)
    InternalServerError,
}

impl StatusCode {
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::Conflict => 409,
            StatusCode::InternalServerError => 500,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCode::BadRequest => "Bad Request (400)",
            StatusCode::NotFound => "Not Found (404)",
            StatusCode::Conflict => "Conflict (409)",
            StatusCode::InternalServerError => "Internal Server Error (500)",
        }
    }

    /// Status for a failed lookup: "no such record" is a 404, anything else a 500.
    pub fn for_lookup(error: &LookupError) -> Self {
        if error.kind.is_not_found() {
            StatusCode::NotFound
        } else {
            StatusCode::InternalServerError
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What ultimately caused a validation to fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorCause {
    /// The resolver could not answer a query.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The CNAME chain did not reach an allowed target within the hop limit.
    #[error("maximum CNAME depth of {limit} exceeded")]
    DepthExceeded { limit: usize },

    /// Records were found but violate the configured policy.
    #[error("{0}")]
    Policy(String),
}

/// A failed validation.
///
/// Serializes to the compact diagnostic view `{ message, hostname,
/// expectedValue, recordType }`; status, cause and the query chain are
/// available through accessors.
#[derive(Error, Debug, Clone, Serialize)]
#[error("{message}")]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    message: String,
    hostname: String,
    expected_value: BTreeMap<RecordType, String>,
    record_type: RecordType,
    #[serde(skip)]
    status: StatusCode,
    #[serde(skip)]
    #[source]
    cause: Option<ErrorCause>,
    #[serde(skip)]
    chain: Vec<ChainEntry>,
}

impl ValidationError {
    pub fn new(
        message: impl Into<String>,
        status: StatusCode,
        hostname: impl Into<String>,
        record_type: RecordType,
    ) -> Self {
        Self {
            message: message.into(),
            hostname: hostname.into(),
            expected_value: BTreeMap::new(),
            record_type,
            status,
            cause: None,
            chain: Vec::new(),
        }
    }

    /// Adds an expected value for `record_type`; `None` is skipped.
    pub fn expecting(mut self, record_type: RecordType, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.expected_value.insert(record_type, value.to_string());
        }
        self
    }

    pub fn with_cause(mut self, cause: impl Into<ErrorCause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn with_chain(mut self, chain: Vec<ChainEntry>) -> Self {
        self.chain = chain;
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    pub fn expected_value(&self) -> &BTreeMap<RecordType, String> {
        &self.expected_value
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn cause(&self) -> Option<&ErrorCause> {
        self.cause.as_ref()
    }

    /// Every query issued before the failure, in order.
    pub fn chain(&self) -> &[ChainEntry] {
        &self.chain
    }
}
