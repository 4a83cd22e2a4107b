//! Record validation engine.
//!
//! This module provides:
//! - The diagnostic chain recording every DNS query and its outcome
//! - The CNAME chain walker with AAAA/A fallback
//! - SPF, MX and DKIM validators
//! - [`DomainValidator`], the web and mail entry points
//!
//! Every validation owns its own chain; only the read-only allow-list snapshot
//! is shared between the concurrent mail checks.

mod chain;
mod cname;
mod dkim;
mod mx;
mod spf;
mod types;
mod validator;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export public API
pub use chain::{ChainEntry, ChainOutcome, ChainRecorder};
pub use dkim::dkim_hostname;
pub use types::{DkimKeys, MailReport, RecordMatch};
pub use validator::DomainValidator;
