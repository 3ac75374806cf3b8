use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::Value;

use super::{CodecError, CodecResult};

/// Decode the payload of a compact `header.payload.signature` token.
///
/// The signature is not verified; the payload is only used to read identity
/// claims the provider already vouched for over TLS. Both the URL-safe and the
/// standard base64 alphabet are accepted, with or without padding.
///
/// # Errors
/// Returns [`CodecError::MalformedToken`] if the text does not have exactly
/// three dot-separated segments, [`CodecError::InvalidBase64`] if the payload
/// does not decode, [`CodecError::InvalidJson`] if it is not JSON, and
/// [`CodecError::PayloadNotObject`] if the JSON is not an object.
pub fn decode_compact_token_payload(token: &str) -> CodecResult<Value> {
    let token = token.trim();
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(CodecError::MalformedToken(format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    }

    let payload = segments[1];
    if payload.is_empty() {
        return Err(CodecError::MalformedToken("empty payload segment".to_string()));
    }

    let normalized: String = payload
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    let bytes =
        URL_SAFE_NO_PAD.decode(normalized).map_err(|e| CodecError::InvalidBase64(e.to_string()))?;

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(_) => Err(CodecError::PayloadNotObject),
        Err(e) => Err(CodecError::InvalidJson(e.to_string())),
    }
}
