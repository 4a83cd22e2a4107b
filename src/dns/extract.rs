//! DNS record extraction utilities.
//!
//! This module provides functions to pick specific records out of TXT and MX
//! record collections.

use crate::config::SPF_PREFIX;

use super::types::{MxRecord, TxtRecord};

/// Extracts SPF records from TXT records.
///
/// A TXT record is an SPF policy when its first character-string starts with
/// `v=spf1`. All matches are returned; more than one is a misconfiguration the
/// caller has to report.
pub fn extract_spf_records(txt_records: &[TxtRecord]) -> Vec<&TxtRecord> {
    txt_records
        .iter()
        .filter(|txt| txt.first_segment().starts_with(SPF_PREFIX))
        .collect()
}

/// Sorts MX records by priority, keeping resolver order among equal priorities.
pub fn sort_mx_by_priority(mut records: Vec<MxRecord>) -> Vec<MxRecord> {
    // sort_by_key is stable
    records.sort_by_key(|mx| mx.priority);
    records
}
