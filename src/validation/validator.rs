//! Validation entry points.
//!
//! [`DomainValidator`] owns an allow-list snapshot and a resolver and exposes
//! the web-ownership and mail-configuration checks.

use std::sync::Arc;

use log::{info, warn};

use crate::config::{global_config, AllowListConfig};
use crate::dns::{RecordResolver, RecordType};
use crate::error_handling::{ErrorCause, StatusCode, ValidationError};

use super::cname::{walk_cname_chain, ChainWalk};
use super::dkim::validate_dkim;
use super::mx::validate_mx;
use super::spf::validate_spf;
use super::types::{DkimKeys, MailReport, RecordMatch};

/// Validates domains against an allow-list snapshot.
///
/// The snapshot is captured at construction; later changes to the
/// process-wide allow-list do not affect an existing validator.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use domain_verify::{init_resolver, AllowListConfig, DomainValidator, HickoryRecordResolver};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let resolver = init_resolver(std::time::Duration::from_secs(3), false)?;
/// let allow_list = AllowListConfig {
///     valid_cnames: vec!["edge.example.net".into()],
///     ..Default::default()
/// };
/// let validator = DomainValidator::new(
///     Arc::new(HickoryRecordResolver::new(resolver)),
///     Some(allow_list),
/// );
/// let found = validator.validate_web("www.example.com").await?;
/// println!("{} -> {}", found.hostname, found.value);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DomainValidator {
    resolver: Arc<dyn RecordResolver>,
    allow_list: AllowListConfig,
}

impl DomainValidator {
    /// Creates a validator; without an explicit allow-list, the process-wide one
    /// is copied.
    pub fn new(resolver: Arc<dyn RecordResolver>, allow_list: Option<AllowListConfig>) -> Self {
        Self {
            resolver,
            allow_list: allow_list.unwrap_or_else(global_config),
        }
    }

    /// Replaces this validator's allow-list.
    pub fn set_config(&mut self, allow_list: AllowListConfig) {
        self.allow_list = allow_list;
    }

    pub fn config(&self) -> &AllowListConfig {
        &self.allow_list
    }

    /// Proves `hostname` points at an allowed target through its CNAME chain
    /// or, where the chain ends, its AAAA/A records.
    ///
    /// # Errors
    ///
    /// Any failure along the chain is reported as one `ValidationError` whose
    /// record type is that of the last query issued and whose expected values
    /// list the primary allowed CNAME, IPv4 and IPv6 values.
    pub async fn validate_web(&self, hostname: &str) -> Result<RecordMatch, ValidationError> {
        let ChainWalk { chain, outcome } =
            walk_cname_chain(self.resolver.as_ref(), &self.allow_list, hostname).await;

        match outcome {
            Ok(found) => {
                info!(
                    "{hostname} validated via {} {} ({} quer{})",
                    found.record_type,
                    found.value,
                    chain.len(),
                    if chain.len() == 1 { "y" } else { "ies" }
                );
                Ok(found)
            }
            Err(cause) => {
                let record_type = chain.last_record_type().unwrap_or(RecordType::Cname);
                let status = match &cause {
                    ErrorCause::Lookup(e) => StatusCode::for_lookup(e),
                    ErrorCause::DepthExceeded { .. } => StatusCode::InternalServerError,
                    ErrorCause::Policy(_) => StatusCode::NotFound,
                };
                let err = ValidationError::new(
                    format!("No valid CNAME, A or AAAA record found for {hostname}: {cause}"),
                    status,
                    hostname,
                    record_type,
                )
                .expecting(RecordType::Cname, first(&self.allow_list.valid_cnames))
                .expecting(RecordType::A, first(&self.allow_list.valid_ipv4))
                .expecting(RecordType::Aaaa, first(&self.allow_list.valid_ipv6))
                .with_cause(cause)
                .with_chain(chain.into_entries());
                warn!("{err}");
                Err(err)
            }
        }
    }

    /// Runs the SPF, MX and DKIM checks concurrently.
    ///
    /// Never fails as a whole: every check's outcome lands in its own slot and
    /// one failing check does not affect the others.
    pub async fn validate_mail(&self, hostname: &str, dkim: Option<&DkimKeys>) -> MailReport {
        let resolver = self.resolver.as_ref();
        let (spf, mx, dkim) = tokio::join!(
            validate_spf(resolver, &self.allow_list, hostname),
            validate_mx(resolver, &self.allow_list, hostname),
            validate_dkim(resolver, hostname, dkim)
        );

        for (check, slot) in [("SPF", &spf), ("MX", &mx), ("DKIM", &dkim)] {
            match slot {
                Ok(found) => info!("{check} validated for {hostname}: {}", found.value),
                Err(e) => warn!("{check} validation failed for {hostname}: {e}"),
            }
        }

        MailReport { spf, mx, dkim }
    }
}

fn first(values: &[String]) -> Option<&str> {
    values.first().map(String::as_str)
}
