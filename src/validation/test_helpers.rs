//! Scripted resolver for validator unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::dns::{LookupError, LookupErrorKind, MxRecord, RecordResolver, RecordType, TxtRecord};

enum Scripted {
    Values(Vec<String>),
    Mx(Vec<MxRecord>),
    Txt(Vec<TxtRecord>),
    Fail(LookupErrorKind),
}

/// Answers queries from a fixed script and records every query it receives.
///
/// Unscripted queries fail with `NoData`.
#[derive(Default)]
pub(crate) struct ScriptedResolver {
    answers: HashMap<(RecordType, String), Scripted>,
    queries: Mutex<Vec<(RecordType, String)>>,
}

impl ScriptedResolver {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn values(mut self, record_type: RecordType, host: &str, values: &[&str]) -> Self {
        self.answers.insert(
            (record_type, host.to_string()),
            Scripted::Values(values.iter().map(|v| v.to_string()).collect()),
        );
        self
    }

    pub(crate) fn cname(self, host: &str, targets: &[&str]) -> Self {
        self.values(RecordType::Cname, host, targets)
    }

    pub(crate) fn a(self, host: &str, addresses: &[&str]) -> Self {
        self.values(RecordType::A, host, addresses)
    }

    pub(crate) fn aaaa(self, host: &str, addresses: &[&str]) -> Self {
        self.values(RecordType::Aaaa, host, addresses)
    }

    pub(crate) fn mx(mut self, host: &str, records: &[(u16, &str)]) -> Self {
        self.answers.insert(
            (RecordType::Mx, host.to_string()),
            Scripted::Mx(records.iter().map(|(p, e)| MxRecord::new(*p, *e)).collect()),
        );
        self
    }

    pub(crate) fn txt(mut self, host: &str, records: &[&[&str]]) -> Self {
        self.answers.insert(
            (RecordType::Txt, host.to_string()),
            Scripted::Txt(
                records
                    .iter()
                    .map(|segments| TxtRecord::new(segments.iter().map(|s| s.to_string()).collect()))
                    .collect(),
            ),
        );
        self
    }

    pub(crate) fn fail(mut self, record_type: RecordType, host: &str, kind: LookupErrorKind) -> Self {
        self.answers
            .insert((record_type, host.to_string()), Scripted::Fail(kind));
        self
    }

    pub(crate) fn queries(&self) -> Vec<(RecordType, String)> {
        self.queries.lock().unwrap().clone()
    }

    pub(crate) fn queried(&self, record_type: RecordType, host: &str) -> bool {
        self.queries()
            .iter()
            .any(|(rt, h)| *rt == record_type && h == host)
    }

    fn answer(&self, record_type: RecordType, host: &str) -> Result<&Scripted, LookupError> {
        self.queries
            .lock()
            .unwrap()
            .push((record_type, host.to_string()));
        match self.answers.get(&(record_type, host.to_string())) {
            Some(Scripted::Fail(kind)) => {
                Err(LookupError::new(*kind, record_type, host, "scripted failure"))
            }
            Some(answer) => Ok(answer),
            None => Err(LookupError::new(
                LookupErrorKind::NoData,
                record_type,
                host,
                "not scripted",
            )),
        }
    }

    fn plain(&self, record_type: RecordType, host: &str) -> Result<Vec<String>, LookupError> {
        match self.answer(record_type, host)? {
            Scripted::Values(values) => Ok(values.clone()),
            _ => panic!("{record_type} script for {host} has the wrong shape"),
        }
    }
}

#[async_trait]
impl RecordResolver for ScriptedResolver {
    async fn resolve_a(&self, hostname: &str) -> Result<Vec<String>, LookupError> {
        self.plain(RecordType::A, hostname)
    }

    async fn resolve_aaaa(&self, hostname: &str) -> Result<Vec<String>, LookupError> {
        self.plain(RecordType::Aaaa, hostname)
    }

    async fn resolve_cname(&self, hostname: &str) -> Result<Vec<String>, LookupError> {
        self.plain(RecordType::Cname, hostname)
    }

    async fn resolve_mx(&self, hostname: &str) -> Result<Vec<MxRecord>, LookupError> {
        match self.answer(RecordType::Mx, hostname)? {
            Scripted::Mx(records) => Ok(records.clone()),
            _ => panic!("MX script for {hostname} has the wrong shape"),
        }
    }

    async fn resolve_txt(&self, hostname: &str) -> Result<Vec<TxtRecord>, LookupError> {
        match self.answer(RecordType::Txt, hostname)? {
            Scripted::Txt(records) => Ok(records.clone()),
            _ => panic!("TXT script for {hostname} has the wrong shape"),
        }
    }
}
