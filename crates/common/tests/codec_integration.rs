//! Integration tests for the response codec
//!
//! Exercises the decoding chain the identity adapter applies to a user-info
//! body: tolerant JSON first, compact-token payload second.

use oidc_session_common::{decode_compact_token_payload, decode_lenient, CodecError};
use serde_json::{json, Value};

/// Mirrors the adapter's two-step decode.
fn decode_claims_body(body: &[u8]) -> Result<Value, CodecError> {
    match decode_lenient(body) {
        Ok(value) => Ok(value),
        Err(_) => decode_compact_token_payload(&String::from_utf8_lossy(body)),
    }
}

/// Validates the decoding chain for the compact token body scenario.
///
/// Assertions:
/// - Confirms the `sub` claim of `header.eyJzdWIiOiJhYmMifQ.sig` equals
///   `"abc"`.
#[test]
fn compact_token_body_falls_through_to_payload_decoding() {
    let value = decode_claims_body(b"header.eyJzdWIiOiJhYmMifQ.sig").unwrap();
    assert_eq!(value, json!({ "sub": "abc" }));
}

#[test]
fn json_body_wins_over_token_decoding() {
    let value = decode_claims_body(br#" {"sub":"u-1","groups":["crm"]} "#).unwrap();
    assert_eq!(value["groups"][0], "crm");
}

#[test]
fn empty_body_decodes_to_empty_object() {
    assert_eq!(decode_claims_body(b"").unwrap(), json!({}));
}

#[test]
fn unparseable_body_reports_token_error() {
    let err = decode_claims_body(b"<html>oops</html>").unwrap_err();
    assert!(matches!(err, CodecError::MalformedToken(_)));
}
