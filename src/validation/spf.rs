//! SPF validation.

use crate::config::AllowListConfig;
use crate::dns::{extract_spf_records, RecordResolver, RecordType};
use crate::error_handling::{ErrorCause, StatusCode, ValidationError};

use super::chain::ChainRecorder;
use super::types::RecordMatch;

/// Checks that `hostname` publishes exactly one SPF record and that it
/// contains `include:<configured value>`.
pub(crate) async fn validate_spf(
    resolver: &dyn RecordResolver,
    allow_list: &AllowListConfig,
    hostname: &str,
) -> Result<RecordMatch, ValidationError> {
    let mut chain = ChainRecorder::new();
    let expected = allow_list
        .valid_spf
        .as_deref()
        .filter(|include| !include.is_empty())
        .map(|include| format!("include:{include}"));
    let error = |message: String, status: StatusCode| {
        ValidationError::new(message, status, hostname, RecordType::Txt)
            .expecting(RecordType::Txt, expected.as_deref())
    };

    let records = match resolver.resolve_txt(hostname).await {
        Ok(records) => records,
        Err(e) => {
            chain.lookup_error(RecordType::Txt, hostname, e.kind);
            return Err(error(
                format!("Failed to look up SPF record for {hostname}: {}", e.kind),
                StatusCode::for_lookup(&e),
            )
            .with_cause(e)
            .with_chain(chain.into_entries()));
        }
    };

    let spf_records = extract_spf_records(&records);
    match spf_records.as_slice() {
        [] => {
            chain.invalid(
                RecordType::Txt,
                hostname,
                records.iter().map(|txt| txt.joined()).collect(),
            );
            let message = format!("No SPF record found for {hostname}");
            Err(error(message.clone(), StatusCode::NotFound)
                .with_cause(ErrorCause::Policy(message))
                .with_chain(chain.into_entries()))
        }
        [record] => {
            let spf = record.joined();
            match expected.as_deref() {
                Some(include) if spf.contains(include) => {
                    chain.valid(RecordType::Txt, hostname);
                    Ok(RecordMatch::new(hostname, RecordType::Txt, spf))
                }
                _ => {
                    let message = match expected.as_deref() {
                        Some(include) => {
                            format!("SPF record for {hostname} does not contain {include}")
                        }
                        None => format!("No SPF include is configured to validate {hostname} against"),
                    };
                    chain.invalid(RecordType::Txt, hostname, vec![spf]);
                    Err(error(message.clone(), StatusCode::NotFound)
                        .with_cause(ErrorCause::Policy(message))
                        .with_chain(chain.into_entries()))
                }
            }
        }
        multiple => {
            chain.invalid(
                RecordType::Txt,
                hostname,
                multiple.iter().map(|txt| txt.joined()).collect(),
            );
            let message = format!(
                "Conflicting SPF records found for {hostname}: {} records start with v=spf1",
                multiple.len()
            );
            Err(error(message.clone(), StatusCode::Conflict)
                .with_cause(ErrorCause::Policy(message))
                .with_chain(chain.into_entries()))
        }
    }
}
