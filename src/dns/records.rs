//! `hickory-resolver` backed implementation of [`RecordResolver`].
//!
//! This is the only place resolver errors are inspected. Every failure leaves
//! here classified as a [`LookupErrorKind`].

use std::sync::Arc;

use async_trait::async_trait;
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::rr::{RData, RecordType as HickoryRecordType};
use hickory_resolver::TokioAsyncResolver;

use super::resolver::RecordResolver;
use super::types::{LookupError, LookupErrorKind, MxRecord, RecordType, TxtRecord};

/// Queries DNS through a shared `TokioAsyncResolver`.
#[derive(Clone)]
pub struct HickoryRecordResolver {
    resolver: Arc<TokioAsyncResolver>,
}

impl HickoryRecordResolver {
    pub fn new(resolver: Arc<TokioAsyncResolver>) -> Self {
        Self { resolver }
    }

    /// Runs one query and keeps the answers `extract` recognises.
    ///
    /// An answer set with no record of the requested type (e.g. only the CNAME
    /// hops hickory followed) is reported as `NoData`, the same as an empty
    /// NOERROR response.
    async fn query<T>(
        &self,
        hostname: &str,
        record_type: RecordType,
        extract: impl Fn(&RData) -> Option<T>,
    ) -> Result<Vec<T>, LookupError> {
        log::debug!("Querying {record_type} for {hostname}");
        let lookup = self
            .resolver
            .lookup(hostname, to_hickory(record_type))
            .await
            .map_err(|e| {
                let kind = classify_resolve_error(&e);
                log::debug!("{record_type} lookup for {hostname} failed ({kind}): {e}");
                LookupError::new(kind, record_type, hostname, e.to_string())
            })?;

        let values: Vec<T> = lookup.iter().filter_map(extract).collect();
        if values.is_empty() {
            return Err(LookupError::new(
                LookupErrorKind::NoData,
                record_type,
                hostname,
                "no records of the requested type in the answer",
            ));
        }
        Ok(values)
    }
}

#[async_trait]
impl RecordResolver for HickoryRecordResolver {
    async fn resolve_a(&self, hostname: &str) -> Result<Vec<String>, LookupError> {
        self.query(hostname, RecordType::A, |rdata| match rdata {
            RData::A(a) => Some(a.to_string()),
            _ => None,
        })
        .await
    }

    async fn resolve_aaaa(&self, hostname: &str) -> Result<Vec<String>, LookupError> {
        self.query(hostname, RecordType::Aaaa, |rdata| match rdata {
            RData::AAAA(aaaa) => Some(aaaa.to_string()),
            _ => None,
        })
        .await
    }

    async fn resolve_cname(&self, hostname: &str) -> Result<Vec<String>, LookupError> {
        self.query(hostname, RecordType::Cname, |rdata| match rdata {
            RData::CNAME(cname) => Some(strip_root(&cname.0.to_utf8())),
            _ => None,
        })
        .await
    }

    async fn resolve_mx(&self, hostname: &str) -> Result<Vec<MxRecord>, LookupError> {
        self.query(hostname, RecordType::Mx, |rdata| match rdata {
            RData::MX(mx) => Some(MxRecord::new(
                mx.preference(),
                strip_root(&mx.exchange().to_utf8()),
            )),
            _ => None,
        })
        .await
    }

    async fn resolve_txt(&self, hostname: &str) -> Result<Vec<TxtRecord>, LookupError> {
        self.query(hostname, RecordType::Txt, |rdata| match rdata {
            // TXT records can contain multiple strings - keep them apart
            RData::TXT(txt) => Some(TxtRecord::new(
                txt.iter()
                    .map(|bytes| String::from_utf8_lossy(bytes).to_string())
                    .collect(),
            )),
            _ => None,
        })
        .await
    }
}

fn to_hickory(record_type: RecordType) -> HickoryRecordType {
    match record_type {
        RecordType::Cname => HickoryRecordType::CNAME,
        RecordType::A => HickoryRecordType::A,
        RecordType::Aaaa => HickoryRecordType::AAAA,
        RecordType::Mx => HickoryRecordType::MX,
        RecordType::Txt => HickoryRecordType::TXT,
    }
}

fn strip_root(name: &str) -> String {
    name.trim_end_matches('.').to_string()
}

/// Maps a `ResolveError` onto the fixed lookup-error classification.
pub(crate) fn classify_resolve_error(error: &ResolveError) -> LookupErrorKind {
    match error.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => {
            classify_response_code(*response_code)
        }
        ResolveErrorKind::Timeout => LookupErrorKind::Timeout,
        _ => LookupErrorKind::Other,
    }
}

/// Classifies the response code of an answer that carried no usable records.
pub(crate) fn classify_response_code(code: ResponseCode) -> LookupErrorKind {
    match code {
        ResponseCode::NXDomain => LookupErrorKind::NotFound,
        ResponseCode::NoError => LookupErrorKind::NoData,
        ResponseCode::ServFail => LookupErrorKind::ServerFailure,
        ResponseCode::Refused => LookupErrorKind::Refused,
        _ => LookupErrorKind::Other,
    }
}
