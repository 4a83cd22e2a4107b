//! Validation result types.

use serde::{Serialize, Serializer};

use crate::dns::RecordType;
use crate::error_handling::ValidationError;

/// A record that matched the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMatch {
    /// Hostname whose record matched (the last hop for CNAME chains)
    pub hostname: String,
    pub record_type: RecordType,
    /// The matching record value
    pub value: String,
    /// Always `true`; kept so the serialized form is self-describing
    pub valid: bool,
}

impl RecordMatch {
    pub fn new(hostname: impl Into<String>, record_type: RecordType, value: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            record_type,
            value: value.into(),
            valid: true,
        }
    }
}

/// DKIM selector and the public key expected to be published there.
///
/// Either half may be missing; the DKIM check then fails its precondition
/// without querying DNS.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DkimKeys {
    /// Selector label (`sel1`) or full record name (`sel1._domainkey.example.com`)
    pub selector: Option<String>,
    /// Exact TXT value expected at the selector
    pub public_key: Option<String>,
}

impl DkimKeys {
    pub fn new(selector: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            selector: Some(selector.into()),
            public_key: Some(public_key.into()),
        }
    }

    /// Returns the selector and key when both are present and non-empty.
    pub fn pair(&self) -> Option<(&str, &str)> {
        let selector = self.selector.as_deref().filter(|s| !s.is_empty())?;
        let key = self.public_key.as_deref().filter(|k| !k.is_empty())?;
        Some((selector, key))
    }
}

/// Outcome of the three independent mail checks.
#[derive(Debug, Clone)]
pub struct MailReport {
    pub spf: Result<RecordMatch, ValidationError>,
    pub mx: Result<RecordMatch, ValidationError>,
    pub dkim: Result<RecordMatch, ValidationError>,
}

impl MailReport {
    /// `true` when SPF, MX and DKIM all passed.
    pub fn is_valid(&self) -> bool {
        self.spf.is_ok() && self.mx.is_ok() && self.dkim.is_ok()
    }

    /// The failed checks, in SPF, MX, DKIM order.
    pub fn errors(&self) -> Vec<&ValidationError> {
        [&self.spf, &self.mx, &self.dkim]
            .into_iter()
            .filter_map(|slot| slot.as_ref().err())
            .collect()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum SlotView<'a> {
    Ok(&'a RecordMatch),
    Error(&'a ValidationError),
}

impl<'a> From<&'a Result<RecordMatch, ValidationError>> for SlotView<'a> {
    fn from(slot: &'a Result<RecordMatch, ValidationError>) -> Self {
        match slot {
            Ok(found) => SlotView::Ok(found),
            Err(e) => SlotView::Error(e),
        }
    }
}

#[derive(Serialize)]
struct MailReportView<'a> {
    spf: SlotView<'a>,
    mx: SlotView<'a>,
    dkim: SlotView<'a>,
}

impl Serialize for MailReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MailReportView {
            spf: (&self.spf).into(),
            mx: (&self.mx).into(),
            dkim: (&self.dkim).into(),
        }
        .serialize(serializer)
    }
}
