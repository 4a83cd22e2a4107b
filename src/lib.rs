//! domain_verify library: DNS-based domain ownership validation
//!
//! This library proves that a domain is configured the way an operator expects
//! by checking its DNS records against an exact-match allow-list:
//! - Web ownership: the CNAME chain of a hostname reaches an allowed target,
//!   or its AAAA/A records resolve to an allowed address
//! - Mail configuration: SPF includes the expected sender, the preferred MX is
//!   allowed, and the DKIM key is published at its selector
//!
//! Every failure is reported as a [`ValidationError`] carrying the full chain of
//! queries that led to it.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use domain_verify::{
//!     init_resolver, merge_global_config, DkimKeys, DomainValidator, HickoryRecordResolver,
//!     PartialAllowList,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! merge_global_config(
//!     PartialAllowList {
//!         valid_mx: Some(vec!["mx1.mailer.example".into()]),
//!         valid_spf: Some("_spf.mailer.example".into()),
//!         ..Default::default()
//!     },
//!     true,
//! );
//!
//! let resolver = Arc::new(HickoryRecordResolver::new(init_resolver(
//!     Duration::from_secs(3),
//!     false,
//! )?));
//! // No explicit allow-list: the process-wide one is copied now
//! let validator = DomainValidator::new(resolver, None);
//!
//! let report = validator
//!     .validate_mail("example.com", Some(&DkimKeys::new("sel1", "v=DKIM1; p=MIIB...")))
//!     .await;
//! println!("mail configured: {}", report.is_valid());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime for the `hickory-resolver` backed
//! adapter. Validators themselves only need an executor for the futures they
//! return.

pub mod config;
pub mod dns;
pub mod error_handling;
pub mod initialization;
pub mod validation;

// Re-export public API
pub use config::{
    global_config, load_allow_list, merge_global_config, reset_global_config, AllowListConfig,
    Config, LogFormat, LogLevel, PartialAllowList,
};
pub use dns::{
    HickoryRecordResolver, LookupError, LookupErrorKind, MxRecord, RecordResolver, RecordType,
    TxtRecord,
};
pub use error_handling::{ErrorCause, StatusCode, ValidationError};
pub use initialization::{init_logger_with, init_resolver};
pub use validation::{
    ChainEntry, ChainOutcome, DkimKeys, DomainValidator, MailReport, RecordMatch,
};
