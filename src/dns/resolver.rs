//! Resolver adapter boundary.
//!
//! The validators never talk to a DNS library directly; they consume this trait.
//! Implementations must classify every failure into a [`LookupErrorKind`] before
//! returning it.

use async_trait::async_trait;

use super::types::{LookupError, MxRecord, TxtRecord};

/// The five raw queries the validators need.
///
/// Each method returns the record values in the order the resolver returned
/// them. Hostnames (CNAME targets, MX exchanges) carry no trailing root dot.
///
/// [`LookupErrorKind`]: super::LookupErrorKind
#[async_trait]
pub trait RecordResolver: Send + Sync {
    /// IPv4 addresses (A records) of `hostname`.
    async fn resolve_a(&self, hostname: &str) -> Result<Vec<String>, LookupError>;

    /// IPv6 addresses (AAAA records) of `hostname`.
    async fn resolve_aaaa(&self, hostname: &str) -> Result<Vec<String>, LookupError>;

    /// Alias targets (CNAME records) of `hostname`.
    async fn resolve_cname(&self, hostname: &str) -> Result<Vec<String>, LookupError>;

    /// Mail exchangers (MX records) of `hostname`.
    async fn resolve_mx(&self, hostname: &str) -> Result<Vec<MxRecord>, LookupError>;

    /// Text records (TXT) of `hostname`.
    async fn resolve_txt(&self, hostname: &str) -> Result<Vec<TxtRecord>, LookupError>;
}
