//! DNS resolution and record querying.
//!
//! This module defines the resolver adapter the validators consume:
//! - The [`RecordResolver`] trait (A, AAAA, CNAME, MX and TXT queries)
//! - The [`LookupError`] classification every failed query is reduced to
//! - A production implementation using `hickory-resolver`
//! - SPF and MX extraction helpers
//!
//! All operations are async.

mod extract;
mod records;
mod resolver;
mod types;

// Re-export public API
pub use extract::{extract_spf_records, sort_mx_by_priority};
pub use records::HickoryRecordResolver;
pub use resolver::RecordResolver;
pub use types::{LookupError, LookupErrorKind, MxRecord, RecordType, TxtRecord};

#[cfg(test)]
mod tests;
