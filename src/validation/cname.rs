//! CNAME chain walking with AAAA/A fallback.
//!
//! Starting from a hostname, CNAME records are followed one hop at a time
//! until a target is on the allow-list, the alias chain ends, or the hop limit
//! is reached. Where the chain ends, the last hostname must resolve directly to
//! an allowed address, IPv6 preferred.

use log::debug;

use crate::config::{AllowListConfig, MAX_CNAME_DEPTH};
use crate::dns::{LookupErrorKind, RecordResolver, RecordType};
use crate::error_handling::ErrorCause;

use super::chain::ChainRecorder;
use super::types::RecordMatch;

/// The queries a walk issued, and how it ended.
pub(crate) struct ChainWalk {
    pub chain: ChainRecorder,
    pub outcome: Result<RecordMatch, ErrorCause>,
}

/// Walks the CNAME chain of `hostname` with a fresh chain log.
pub(crate) async fn walk_cname_chain(
    resolver: &dyn RecordResolver,
    allow_list: &AllowListConfig,
    hostname: &str,
) -> ChainWalk {
    let mut chain = ChainRecorder::new();
    let outcome = follow_chain(resolver, allow_list, hostname, &mut chain).await;
    ChainWalk { chain, outcome }
}

async fn follow_chain(
    resolver: &dyn RecordResolver,
    allow_list: &AllowListConfig,
    hostname: &str,
    chain: &mut ChainRecorder,
) -> Result<RecordMatch, ErrorCause> {
    // Each hop depends on the previous answer, so this stays sequential
    let mut current = hostname.to_string();
    loop {
        let targets = match resolver.resolve_cname(&current).await {
            Ok(targets) => targets,
            Err(e) if e.kind == LookupErrorKind::NoData => {
                chain.lookup_error(RecordType::Cname, &current, e.kind);
                debug!("{current} has no CNAME, checking its addresses");
                return validate_addresses(resolver, allow_list, &current, chain).await;
            }
            Err(e) => {
                chain.lookup_error(RecordType::Cname, &current, e.kind);
                return Err(e.into());
            }
        };

        if let Some(matched) = allow_list.matches_cname(&targets) {
            chain.valid(RecordType::Cname, &current);
            return Ok(RecordMatch::new(&current, RecordType::Cname, matched));
        }

        let next = targets.first().cloned();
        chain.invalid(RecordType::Cname, &current, targets);

        let Some(next) = next else {
            // An empty answer ends the alias chain just like NODATA
            return validate_addresses(resolver, allow_list, &current, chain).await;
        };
        if chain.len() >= MAX_CNAME_DEPTH {
            return Err(ErrorCause::DepthExceeded {
                limit: MAX_CNAME_DEPTH,
            });
        }
        debug!("{current} aliases to {next}, following");
        current = next;
    }
}

/// Checks that `hostname` resolves to an allowed address.
///
/// AAAA is tried first; A is only queried when AAAA answers "no data" (or
/// with no records at all). Any other AAAA failure is returned as-is.
pub(crate) async fn validate_addresses(
    resolver: &dyn RecordResolver,
    allow_list: &AllowListConfig,
    hostname: &str,
    chain: &mut ChainRecorder,
) -> Result<RecordMatch, ErrorCause> {
    let (record_type, addresses) = match resolver.resolve_aaaa(hostname).await {
        Ok(addresses) if !addresses.is_empty() => (RecordType::Aaaa, addresses),
        Ok(_) => {
            // An empty answer is NODATA by another name
            chain.lookup_error(RecordType::Aaaa, hostname, LookupErrorKind::NoData);
            (RecordType::A, resolve_ipv4(resolver, hostname, chain).await?)
        }
        Err(e) if e.kind == LookupErrorKind::NoData => {
            chain.lookup_error(RecordType::Aaaa, hostname, e.kind);
            (RecordType::A, resolve_ipv4(resolver, hostname, chain).await?)
        }
        Err(e) => {
            chain.lookup_error(RecordType::Aaaa, hostname, e.kind);
            return Err(e.into());
        }
    };

    let matched = match record_type {
        RecordType::Aaaa => allow_list.matches_ipv6(&addresses),
        _ => allow_list.matches_ipv4(&addresses),
    };
    if let Some(address) = matched {
        let found = RecordMatch::new(hostname, record_type, address);
        chain.valid(record_type, hostname);
        return Ok(found);
    }

    chain.invalid(record_type, hostname, addresses);
    Err(ErrorCause::Policy(format!(
        "no valid address found for {hostname}"
    )))
}

async fn resolve_ipv4(
    resolver: &dyn RecordResolver,
    hostname: &str,
    chain: &mut ChainRecorder,
) -> Result<Vec<String>, ErrorCause> {
    debug!("{hostname} has no AAAA record, trying A");
    resolver.resolve_a(hostname).await.map_err(|e| {
        chain.lookup_error(RecordType::A, hostname, e.kind);
        ErrorCause::from(e)
    })
}
