//! Diagnostic query chain.
//!
//! Every DNS query a validation issues is appended here together with its
//! outcome, so a failure can show exactly which hop did not match.

use serde::Serialize;

use crate::dns::{LookupErrorKind, RecordType};

/// What a single query produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ChainOutcome {
    /// A returned value is on the allow-list
    Valid,
    /// Values were returned but none is on the allow-list
    InvalidWithValues { values: Vec<String> },
    /// The query itself failed
    LookupError { kind: LookupErrorKind },
}

/// One query attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainEntry {
    /// 0-based position in the chain
    pub sequence: usize,
    pub record_type: RecordType,
    pub hostname: String,
    pub outcome: ChainOutcome,
}

impl ChainEntry {
    pub fn is_valid(&self) -> bool {
        matches!(self.outcome, ChainOutcome::Valid)
    }
}

/// Append-only log of the queries issued by one validation.
///
/// Each validation owns its recorder exclusively; concurrent validations never
/// share one.
#[derive(Debug, Clone, Default)]
pub struct ChainRecorder {
    entries: Vec<ChainEntry>,
}

impl ChainRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry and returns its sequence number.
    pub fn record(
        &mut self,
        record_type: RecordType,
        hostname: &str,
        outcome: ChainOutcome,
    ) -> usize {
        let sequence = self.entries.len();
        self.entries.push(ChainEntry {
            sequence,
            record_type,
            hostname: hostname.to_string(),
            outcome,
        });
        sequence
    }

    pub fn valid(&mut self, record_type: RecordType, hostname: &str) -> usize {
        self.record(record_type, hostname, ChainOutcome::Valid)
    }

    pub fn invalid(&mut self, record_type: RecordType, hostname: &str, values: Vec<String>) -> usize {
        self.record(record_type, hostname, ChainOutcome::InvalidWithValues { values })
    }

    pub fn lookup_error(
        &mut self,
        record_type: RecordType,
        hostname: &str,
        kind: LookupErrorKind,
    ) -> usize {
        self.record(record_type, hostname, ChainOutcome::LookupError { kind })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ChainEntry] {
        &self.entries
    }

    /// Record type of the most recent query, if any.
    pub fn last_record_type(&self) -> Option<RecordType> {
        self.entries.last().map(|entry| entry.record_type)
    }

    pub fn into_entries(self) -> Vec<ChainEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_numbers_are_contiguous() {
        let mut chain = ChainRecorder::new();
        assert_eq!(chain.invalid(RecordType::Cname, "a.example", vec!["b.example".into()]), 0);
        assert_eq!(chain.lookup_error(RecordType::Cname, "b.example", LookupErrorKind::NoData), 1);
        assert_eq!(chain.valid(RecordType::Aaaa, "b.example"), 2);

        let entries = chain.into_entries();
        let sequences: Vec<usize> = entries.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![0, 1, 2]);
        assert!(entries[2].is_valid());
    }

    #[test]
    fn test_last_record_type() {
        let mut chain = ChainRecorder::new();
        assert!(chain.is_empty());
        assert_eq!(chain.last_record_type(), None);
        chain.lookup_error(RecordType::Aaaa, "a.example", LookupErrorKind::NoData);
        chain.invalid(RecordType::A, "a.example", vec!["192.0.2.9".into()]);
        assert_eq!(chain.last_record_type(), Some(RecordType::A));
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_entry_serialization() {
        let mut chain = ChainRecorder::new();
        chain.invalid(RecordType::Mx, "example.com", vec!["10 mx.other.example".into()]);
        chain.lookup_error(RecordType::Txt, "example.com", LookupErrorKind::ServerFailure);
        let json = serde_json::to_value(chain.entries()).expect("serializes");
        assert_eq!(
            json,
            serde_json::json!([
                {
                    "sequence": 0,
                    "recordType": "MX",
                    "hostname": "example.com",
                    "outcome": { "status": "invalid-with-values", "values": ["10 mx.other.example"] }
                },
                {
                    "sequence": 1,
                    "recordType": "TXT",
                    "hostname": "example.com",
                    "outcome": { "status": "lookup-error", "kind": "server-failure" }
                }
            ])
        );
    }
}
