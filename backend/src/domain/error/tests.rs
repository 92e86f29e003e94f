//! Tests for domain error construction and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn trace_id() -> TraceId {
    TRACE_ID.parse().expect("fixture trace id is a UUID")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("no token"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("admins only"), ErrorCode::Forbidden)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::feature_disabled("payments off"), ErrorCode::FeatureDisabled)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(trace_id: TraceId) {
    let error = TraceId::scope(trace_id, async { Error::not_found("Book not found") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn serialises_camel_case_and_skips_absent_fields() {
    let value = serde_json::to_value(Error::not_found("Book not found")).expect("serialise");
    assert_eq!(value, json!({ "code": "not_found", "message": "Book not found" }));

    let value = serde_json::to_value(
        Error::invalid_request("bad")
            .with_trace_id(TRACE_ID)
            .with_details(json!({ "field": "title" })),
    )
    .expect("serialise");
    assert_eq!(
        value,
        json!({
            "code": "invalid_request",
            "message": "bad",
            "traceId": TRACE_ID,
            "details": { "field": "title" },
        })
    );
}

#[rstest]
fn feature_disabled_serialises_as_snake_case() {
    let value = serde_json::to_value(ErrorCode::FeatureDisabled).expect("serialise");
    assert_eq!(value, json!("feature_disabled"));
}
