// Shared test helpers: an in-memory zone served through `RecordResolver`.
//
// Records are written one per line as `<name> <TYPE> <value>`:
//   www.example.com CNAME edge.example.net
//   example.com MX 10 mx1.example.net
//   example.com TXT v=spf1 include:_spf.example.net ~all
// Like an authoritative server, a name with records of other types answers
// NoData and a name missing from the zone answers NotFound.

use std::sync::Mutex;

use async_trait::async_trait;
use domain_verify::{LookupError, LookupErrorKind, MxRecord, RecordResolver, RecordType, TxtRecord};
use strum::IntoEnumIterator;

enum Data {
    Value(String),
    // Answer with zero records instead of NoData
    Empty,
    Fail(LookupErrorKind),
}

#[derive(Default)]
pub struct FakeResolver {
    zone: Vec<(String, RecordType, Data)>,
    queries: Mutex<Vec<(RecordType, String)>>,
}

#[allow(dead_code)] // Not every test file uses every helper
impl FakeResolver {
    pub fn from_zone(lines: &[&str]) -> Self {
        lines
            .iter()
            .fold(Self::default(), |resolver, line| resolver.record(line))
    }

    pub fn record(mut self, line: &str) -> Self {
        let mut fields = line.splitn(3, ' ');
        let (Some(name), Some(record_type), Some(value)) =
            (fields.next(), fields.next(), fields.next())
        else {
            panic!("malformed zone line: {line}");
        };
        let record_type = RecordType::iter()
            .find(|rt| rt.as_str() == record_type)
            .unwrap_or_else(|| panic!("unsupported record type in: {line}"));
        self.zone
            .push((name.to_string(), record_type, Data::Value(value.to_string())));
        self
    }

    pub fn empty(mut self, name: &str, record_type: RecordType) -> Self {
        self.zone.push((name.to_string(), record_type, Data::Empty));
        self
    }

    pub fn fail(mut self, name: &str, record_type: RecordType, kind: LookupErrorKind) -> Self {
        self.zone.push((name.to_string(), record_type, Data::Fail(kind)));
        self
    }

    /// `hop0.example -> hop1.example -> ... -> hop{hops}.example`
    pub fn alias_chain(self, hops: usize) -> Self {
        (0..hops).fold(self, |resolver, i| {
            resolver.record(&format!("hop{i}.example CNAME hop{}.example", i + 1))
        })
    }

    pub fn queries(&self) -> Vec<(RecordType, String)> {
        self.queries.lock().unwrap().clone()
    }

    pub fn queried(&self, record_type: RecordType) -> bool {
        self.queries().iter().any(|(rt, _)| *rt == record_type)
    }

    fn lookup(&self, record_type: RecordType, name: &str) -> Result<Vec<&str>, LookupError> {
        self.queries
            .lock()
            .unwrap()
            .push((record_type, name.to_string()));

        let mut name_exists = false;
        let mut values = Vec::new();
        for (owner, rt, data) in &self.zone {
            if owner != name {
                continue;
            }
            name_exists = true;
            if *rt != record_type {
                continue;
            }
            match data {
                Data::Value(value) => values.push(value.as_str()),
                Data::Empty => return Ok(Vec::new()),
                Data::Fail(kind) => {
                    return Err(LookupError::new(*kind, record_type, name, "zone failure"))
                }
            }
        }

        match (values.is_empty(), name_exists) {
            (false, _) => Ok(values),
            (true, true) => Err(LookupError::new(LookupErrorKind::NoData, record_type, name, "NOERROR")),
            (true, false) => Err(LookupError::new(LookupErrorKind::NotFound, record_type, name, "NXDOMAIN")),
        }
    }

    fn strings(&self, record_type: RecordType, name: &str) -> Result<Vec<String>, LookupError> {
        Ok(self
            .lookup(record_type, name)?
            .into_iter()
            .map(str::to_string)
            .collect())
    }
}

#[async_trait]
impl RecordResolver for FakeResolver {
    async fn resolve_a(&self, hostname: &str) -> Result<Vec<String>, LookupError> {
        self.strings(RecordType::A, hostname)
    }

    async fn resolve_aaaa(&self, hostname: &str) -> Result<Vec<String>, LookupError> {
        self.strings(RecordType::Aaaa, hostname)
    }

    async fn resolve_cname(&self, hostname: &str) -> Result<Vec<String>, LookupError> {
        self.strings(RecordType::Cname, hostname)
    }

    async fn resolve_mx(&self, hostname: &str) -> Result<Vec<MxRecord>, LookupError> {
        Ok(self
            .lookup(RecordType::Mx, hostname)?
            .into_iter()
            .map(|value| {
                let (priority, exchange) = value
                    .split_once(' ')
                    .unwrap_or_else(|| panic!("MX value needs a priority: {value}"));
                MxRecord::new(priority.parse().expect("numeric MX priority"), exchange)
            })
            .collect())
    }

    async fn resolve_txt(&self, hostname: &str) -> Result<Vec<TxtRecord>, LookupError> {
        Ok(self
            .lookup(RecordType::Txt, hostname)?
            .into_iter()
            .map(TxtRecord::from)
            .collect())
    }
}
