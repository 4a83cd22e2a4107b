//! DKIM validation.

use crate::dns::{RecordResolver, RecordType};
use crate::error_handling::{ErrorCause, StatusCode, ValidationError};

use super::chain::ChainRecorder;
use super::types::{DkimKeys, RecordMatch};

/// Record name a DKIM key for `domain` is published at.
///
/// A selector that already names a `_domainkey` record is used as-is.
pub fn dkim_hostname(selector: &str, domain: &str) -> String {
    if selector.contains("._domainkey.") {
        selector.to_string()
    } else {
        format!("{selector}._domainkey.{domain}")
    }
}

/// Checks that a TXT record at the DKIM selector equals the public key exactly.
///
/// Missing keys fail with a bad-request error before any query is issued.
pub(crate) async fn validate_dkim(
    resolver: &dyn RecordResolver,
    hostname: &str,
    keys: Option<&DkimKeys>,
) -> Result<RecordMatch, ValidationError> {
    let Some((selector, public_key)) = keys.and_then(DkimKeys::pair) else {
        let message = format!("DKIM not configured for {hostname}: a selector and public key are required");
        return Err(
            ValidationError::new(message.clone(), StatusCode::BadRequest, hostname, RecordType::Txt)
                .with_cause(ErrorCause::Policy(message)),
        );
    };

    let record_host = dkim_hostname(selector, hostname);
    let mut chain = ChainRecorder::new();
    let error = |message: String, status: StatusCode| {
        ValidationError::new(message, status, record_host.as_str(), RecordType::Txt)
            .expecting(RecordType::Txt, Some(public_key))
    };

    let records = match resolver.resolve_txt(&record_host).await {
        Ok(records) => records,
        Err(e) => {
            chain.lookup_error(RecordType::Txt, &record_host, e.kind);
            let message = if e.kind.is_not_found() {
                format!("No DKIM record found at {record_host}")
            } else {
                format!("Failed to look up DKIM record at {record_host}: {}", e.kind)
            };
            return Err(error(message, StatusCode::for_lookup(&e))
                .with_cause(e)
                .with_chain(chain.into_entries()));
        }
    };

    if records.is_empty() {
        chain.invalid(RecordType::Txt, &record_host, Vec::new());
        let message = format!("No DKIM record found at {record_host}");
        return Err(error(message.clone(), StatusCode::NotFound)
            .with_cause(ErrorCause::Policy(message))
            .with_chain(chain.into_entries()));
    }

    let values: Vec<String> = records.iter().map(|txt| txt.joined()).collect();
    if let Some(found) = values.iter().find(|value| value.as_str() == public_key) {
        let found = RecordMatch::new(record_host.as_str(), RecordType::Txt, found);
        chain.valid(RecordType::Txt, &record_host);
        return Ok(found);
    }

    chain.invalid(RecordType::Txt, &record_host, values);
    let message = format!("DKIM record at {record_host} does not match the provided public key");
    Err(error(message.clone(), StatusCode::NotFound)
        .with_cause(ErrorCause::Policy(message))
        .with_chain(chain.into_entries()))
}
