//! Allow-list store.
//!
//! Holds the exact-match sets of record values a domain may point at. A
//! process-wide instance starts out empty, which makes every validation fail
//! until values are merged in. Readers only ever receive a copy.

use std::path::Path;
use std::sync::{LazyLock, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::error_handling::ConfigError;

/// Acceptable record values, one set per record family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AllowListConfig {
    /// Accepted A record addresses
    pub valid_ipv4: Vec<String>,
    /// Accepted AAAA record addresses
    pub valid_ipv6: Vec<String>,
    /// Accepted CNAME targets
    pub valid_cnames: Vec<String>,
    /// Accepted MX exchanges; the first entry is the primary one suggested in errors
    pub valid_mx: Vec<String>,
    /// Value that must appear as `include:<value>` in the SPF record
    pub valid_spf: Option<String>,
}

/// A partial allow-list; fields left as `None` are not touched by a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialAllowList {
    /// Accepted A record addresses
    pub valid_ipv4: Option<Vec<String>>,
    /// Accepted AAAA record addresses
    pub valid_ipv6: Option<Vec<String>>,
    /// Accepted CNAME targets
    pub valid_cnames: Option<Vec<String>>,
    /// Accepted MX exchanges
    pub valid_mx: Option<Vec<String>>,
    /// SPF include value
    pub valid_spf: Option<String>,
}

impl PartialAllowList {
    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        self.valid_ipv4.is_none()
            && self.valid_ipv6.is_none()
            && self.valid_cnames.is_none()
            && self.valid_mx.is_none()
            && self.valid_spf.is_none()
    }
}

impl From<AllowListConfig> for PartialAllowList {
    fn from(config: AllowListConfig) -> Self {
        Self {
            valid_ipv4: Some(config.valid_ipv4),
            valid_ipv6: Some(config.valid_ipv6),
            valid_cnames: Some(config.valid_cnames),
            valid_mx: Some(config.valid_mx),
            valid_spf: config.valid_spf,
        }
    }
}

impl AllowListConfig {
    /// Merges `partial` into this allow-list.
    ///
    /// With `append`, list fields are extended with the incoming values; without it
    /// they are replaced. The SPF value is replaced whenever it is provided. Unset
    /// fields are left untouched either way.
    pub fn merge(&mut self, partial: PartialAllowList, append: bool) {
        merge_list(&mut self.valid_ipv4, partial.valid_ipv4, append);
        merge_list(&mut self.valid_ipv6, partial.valid_ipv6, append);
        merge_list(&mut self.valid_cnames, partial.valid_cnames, append);
        merge_list(&mut self.valid_mx, partial.valid_mx, append);
        if let Some(spf) = partial.valid_spf {
            self.valid_spf = Some(spf);
        }
    }

    /// Empties every field. An empty allow-list matches nothing.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The primary MX exchange, surfaced as the suggested fix in MX errors.
    pub fn primary_mx(&self) -> Option<&str> {
        self.valid_mx.first().map(String::as_str)
    }

    /// Returns the first of `values` present in the CNAME allow-list.
    pub fn matches_cname<'a>(&self, values: &'a [String]) -> Option<&'a String> {
        first_allowed(&self.valid_cnames, values)
    }

    /// Returns the first of `values` present in the IPv4 allow-list.
    pub fn matches_ipv4<'a>(&self, values: &'a [String]) -> Option<&'a String> {
        first_allowed(&self.valid_ipv4, values)
    }

    /// Returns the first of `values` present in the IPv6 allow-list.
    pub fn matches_ipv6<'a>(&self, values: &'a [String]) -> Option<&'a String> {
        first_allowed(&self.valid_ipv6, values)
    }
}

fn merge_list(target: &mut Vec<String>, incoming: Option<Vec<String>>, append: bool) {
    if let Some(values) = incoming {
        if append {
            target.extend(values);
        } else {
            *target = values;
        }
    }
}

fn first_allowed<'a>(allowed: &[String], values: &'a [String]) -> Option<&'a String> {
    values.iter().find(|value| allowed.contains(value))
}

/// Process-wide allow-list, empty until configured.
static GLOBAL_ALLOW_LIST: LazyLock<RwLock<AllowListConfig>> =
    LazyLock::new(|| RwLock::new(AllowListConfig::default()));

/// Merges `partial` into the process-wide allow-list.
///
/// See [`AllowListConfig::merge`] for the `append` semantics.
pub fn merge_global_config(partial: PartialAllowList, append: bool) {
    // A poisoned lock still holds a structurally valid allow-list
    let mut guard = GLOBAL_ALLOW_LIST
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    guard.merge(partial, append);
    log::debug!(
        "Allow-list updated: {} IPv4, {} IPv6, {} CNAME, {} MX, SPF {}",
        guard.valid_ipv4.len(),
        guard.valid_ipv6.len(),
        guard.valid_cnames.len(),
        guard.valid_mx.len(),
        if guard.valid_spf.is_some() { "set" } else { "unset" }
    );
}

/// Empties the process-wide allow-list; all subsequent validations fail.
pub fn reset_global_config() {
    GLOBAL_ALLOW_LIST
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .reset();
}

/// Returns a copy of the process-wide allow-list.
pub fn global_config() -> AllowListConfig {
    GLOBAL_ALLOW_LIST
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Reads a JSON allow-list file.
///
/// Keys use the camelCase names (`validIpv4`, `validCnames`, ...); missing keys
/// are left unset.
///
/// # Errors
///
/// Returns `ConfigError::Read` if the file cannot be read and
/// `ConfigError::Parse` if it is not a valid allow-list document.
pub fn load_allow_list(path: &Path) -> Result<PartialAllowList, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
