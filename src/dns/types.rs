//! Record and lookup-error types shared by the resolver adapter and the validators.

use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// DNS record types the validators query.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, EnumIterMacro,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    Cname,
    A,
    Aaaa,
    Mx,
    Txt,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Cname => "CNAME",
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Mx => "MX",
            RecordType::Txt => "TXT",
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a failed lookup, decided once by the resolver adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIterMacro)]
#[serde(rename_all = "kebab-case")]
pub enum LookupErrorKind {
    /// The name does not exist (NXDOMAIN)
    NotFound,
    /// The name exists but has no record of the queried type
    NoData,
    /// The upstream server reported SERVFAIL
    ServerFailure,
    /// The upstream server refused the query
    Refused,
    /// No answer within the resolver timeout
    Timeout,
    /// Anything else (I/O, protocol, malformed response)
    Other,
}

impl LookupErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupErrorKind::NotFound => "not found",
            LookupErrorKind::NoData => "no data",
            LookupErrorKind::ServerFailure => "server failure",
            LookupErrorKind::Refused => "refused",
            LookupErrorKind::Timeout => "timeout",
            LookupErrorKind::Other => "lookup failed",
        }
    }

    /// Whether the failure means "there is no such record", as opposed to a
    /// failure to find out.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupErrorKind::NotFound | LookupErrorKind::NoData)
    }
}

impl std::fmt::Display for LookupErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed DNS query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{record_type} lookup for {hostname} failed ({kind}): {detail}")]
pub struct LookupError {
    /// Classified failure
    pub kind: LookupErrorKind,
    /// Record type that was queried
    pub record_type: RecordType,
    /// Hostname that was queried
    pub hostname: String,
    /// Resolver-provided description
    pub detail: String,
}

impl LookupError {
    pub fn new(
        kind: LookupErrorKind,
        record_type: RecordType,
        hostname: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            record_type,
            hostname: hostname.into(),
            detail: detail.into(),
        }
    }
}

/// A mail exchanger record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MxRecord {
    /// Preference; lower values are tried first
    pub priority: u16,
    /// Exchange hostname, without the trailing root dot
    pub exchange: String,
}

impl MxRecord {
    pub fn new(priority: u16, exchange: impl Into<String>) -> Self {
        Self {
            priority,
            exchange: exchange.into(),
        }
    }
}

impl std::fmt::Display for MxRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.priority, self.exchange)
    }
}

/// A TXT record as published: one or more character-strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TxtRecord {
    segments: Vec<String>,
}

impl TxtRecord {
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The first character-string, or `""` for an empty record.
    pub fn first_segment(&self) -> &str {
        self.segments.first().map(String::as_str).unwrap_or("")
    }

    /// All character-strings concatenated without separator, as receivers
    /// reassemble long TXT values.
    pub fn joined(&self) -> String {
        self.segments.concat()
    }
}

impl From<&str> for TxtRecord {
    fn from(value: &str) -> Self {
        Self::new(vec![value.to_string()])
    }
}
