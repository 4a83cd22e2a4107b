//! MX validation.

use crate::config::AllowListConfig;
use crate::dns::{sort_mx_by_priority, RecordResolver, RecordType};
use crate::error_handling::{ErrorCause, StatusCode, ValidationError};

use super::chain::ChainRecorder;
use super::types::RecordMatch;

/// Checks that the most preferred MX exchange of `hostname` is allow-listed.
///
/// Only membership is checked; the primary allow-listed exchange is what the
/// error suggests as the fix.
pub(crate) async fn validate_mx(
    resolver: &dyn RecordResolver,
    allow_list: &AllowListConfig,
    hostname: &str,
) -> Result<RecordMatch, ValidationError> {
    let mut chain = ChainRecorder::new();
    let expected = allow_list.primary_mx();
    let error = |message: String, status: StatusCode| {
        ValidationError::new(message, status, hostname, RecordType::Mx)
            .expecting(RecordType::Mx, expected)
    };

    let records = match resolver.resolve_mx(hostname).await {
        Ok(records) => sort_mx_by_priority(records),
        Err(e) => {
            chain.lookup_error(RecordType::Mx, hostname, e.kind);
            return Err(error(
                format!("Failed to look up MX records for {hostname}: {}", e.kind),
                StatusCode::for_lookup(&e),
            )
            .with_cause(e)
            .with_chain(chain.into_entries()));
        }
    };

    let Some(preferred) = records.first() else {
        chain.invalid(RecordType::Mx, hostname, Vec::new());
        let message = format!("No MX record found for {hostname}");
        return Err(error(message.clone(), StatusCode::NotFound)
            .with_cause(ErrorCause::Policy(message))
            .with_chain(chain.into_entries()));
    };

    if allow_list.valid_mx.contains(&preferred.exchange) {
        chain.valid(RecordType::Mx, hostname);
        return Ok(RecordMatch::new(
            hostname,
            RecordType::Mx,
            preferred.exchange.clone(),
        ));
    }

    let message = match expected {
        Some(primary) => format!(
            "Preferred MX record of {hostname} is {preferred}, expected {primary}"
        ),
        None => format!("Preferred MX record of {hostname} is {preferred}, no MX is allowed"),
    };
    chain.invalid(
        RecordType::Mx,
        hostname,
        records.iter().map(|mx| mx.to_string()).collect(),
    );
    Err(error(message.clone(), StatusCode::NotFound)
        .with_cause(ErrorCause::Policy(message))
        .with_chain(chain.into_entries()))
}
