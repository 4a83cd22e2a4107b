//! Configuration constants.
//!
//! This module defines the operational limits used by the validators and the
//! resolver setup.

/// Maximum number of CNAME hops followed before a chain is rejected.
///
/// Bounds alias loops (`a -> b -> a`) as well as absurdly long but finite chains.
pub const MAX_CNAME_DEPTH: usize = 16;

// Resolver defaults
/// DNS query timeout in seconds
/// Most DNS queries complete in <1s, 3s provides good buffer while failing fast
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// Attempts the underlying resolver makes per query (the validators never retry on top)
pub const DNS_ATTEMPTS: usize = 2;

/// TXT record prefix identifying an SPF policy.
pub const SPF_PREFIX: &str = "v=spf1";

/// Environment variable pointing at a JSON allow-list loaded by the CLI when
/// `--allow-list` is not given.
pub const ALLOW_LIST_ENV: &str = "DOMAIN_VERIFY_ALLOW_LIST";
