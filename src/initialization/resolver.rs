//! DNS resolver initialization.
//!
//! This module provides functions to initialize the DNS resolver with proper
//! timeout configuration.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::config::DNS_ATTEMPTS;
use crate::error_handling::InitializationError;

/// Initializes the DNS resolver used by [`HickoryRecordResolver`].
///
/// By default the built-in upstream configuration (Google DNS) is used;
/// `use_system_conf` switches to the host's `/etc/resolv.conf` nameservers.
/// Either way the timeout and attempt count are overridden so slow upstreams
/// fail fast, and `ndots` is set to 0 so search domains are never appended to
/// the hostnames being validated.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if the system configuration
/// was requested but cannot be read.
///
/// [`HickoryRecordResolver`]: crate::dns::HickoryRecordResolver
pub fn init_resolver(
    timeout: Duration,
    use_system_conf: bool,
) -> Result<Arc<TokioAsyncResolver>, InitializationError> {
    let (config, mut opts) = if use_system_conf {
        hickory_resolver::system_conf::read_system_conf()
            .map_err(|e| InitializationError::DnsResolverError(e.to_string()))?
    } else {
        (ResolverConfig::default(), ResolverOpts::default())
    };

    opts.timeout = timeout;
    opts.attempts = DNS_ATTEMPTS;
    opts.ndots = 0;

    log::debug!(
        "DNS resolver configured with {} nameserver(s), timeout {:?}, {} attempt(s)",
        config.name_servers().len(),
        opts.timeout,
        opts.attempts
    );

    Ok(Arc::new(TokioAsyncResolver::tokio(config, opts)))
}
