//! DNS module tests.

use super::records::classify_response_code;
use super::*;
use hickory_resolver::proto::op::ResponseCode;
use strum::IntoEnumIterator;

fn txt(segments: &[&str]) -> TxtRecord {
    TxtRecord::new(segments.iter().map(|s| s.to_string()).collect())
}

#[test]
fn test_extract_spf_records_uses_first_segment() {
    let records = vec![
        txt(&["google-site-verification=abc"]),
        txt(&["v=spf1 include:_spf.example.net", " ~all"]),
        // "v=spf1" buried in a later segment is not an SPF record
        txt(&["something", "v=spf1 -all"]),
    ];
    let spf = extract_spf_records(&records);
    assert_eq!(spf.len(), 1);
    assert_eq!(spf[0].joined(), "v=spf1 include:_spf.example.net ~all");
}

#[test]
fn test_extract_spf_records_returns_all_matches() {
    let records = vec![txt(&["v=spf1 -all"]), txt(&["v=spf1 include:a.example ~all"])];
    assert_eq!(extract_spf_records(&records).len(), 2);
}

#[test]
fn test_extract_spf_records_empty() {
    assert!(extract_spf_records(&[]).is_empty());
    assert!(extract_spf_records(&[txt(&[])]).is_empty());
}

#[test]
fn test_sort_mx_by_priority_is_stable() {
    let sorted = sort_mx_by_priority(vec![
        MxRecord::new(10, "b.example"),
        MxRecord::new(5, "a.example"),
        MxRecord::new(10, "c.example"),
        MxRecord::new(5, "d.example"),
    ]);
    let exchanges: Vec<&str> = sorted.iter().map(|mx| mx.exchange.as_str()).collect();
    assert_eq!(exchanges, vec!["a.example", "d.example", "b.example", "c.example"]);
}

#[test]
fn test_txt_record_joined_without_separator() {
    let record = txt(&["v=DKIM1; k=rsa; ", "p=MIIB"]);
    assert_eq!(record.joined(), "v=DKIM1; k=rsa; p=MIIB");
    assert_eq!(record.first_segment(), "v=DKIM1; k=rsa; ");
}

#[test]
fn test_mx_record_display() {
    assert_eq!(MxRecord::new(10, "mx.example.net").to_string(), "10 mx.example.net");
}

#[test]
fn test_classify_response_code() {
    assert_eq!(
        classify_response_code(ResponseCode::NXDomain),
        LookupErrorKind::NotFound
    );
    assert_eq!(
        classify_response_code(ResponseCode::NoError),
        LookupErrorKind::NoData
    );
    assert_eq!(
        classify_response_code(ResponseCode::ServFail),
        LookupErrorKind::ServerFailure
    );
    assert_eq!(
        classify_response_code(ResponseCode::Refused),
        LookupErrorKind::Refused
    );
    assert_eq!(
        classify_response_code(ResponseCode::FormErr),
        LookupErrorKind::Other
    );
}

#[test]
fn test_lookup_error_kind_not_found_class() {
    for kind in LookupErrorKind::iter() {
        let expected = matches!(kind, LookupErrorKind::NotFound | LookupErrorKind::NoData);
        assert_eq!(kind.is_not_found(), expected, "{kind:?}");
    }
}

#[test]
fn test_all_record_types_have_string_representation() {
    for record_type in RecordType::iter() {
        assert!(!record_type.as_str().is_empty());
        assert_eq!(
            serde_json::to_value(record_type).expect("serializes"),
            serde_json::Value::String(record_type.as_str().to_string())
        );
    }
}

#[test]
fn test_lookup_error_display() {
    let err = LookupError::new(
        LookupErrorKind::Timeout,
        RecordType::Mx,
        "example.com",
        "request timed out",
    );
    assert_eq!(
        err.to_string(),
        "MX lookup for example.com failed (timeout): request timed out"
    );
}
