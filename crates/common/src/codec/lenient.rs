use serde_json::{Map, Value};

use super::{CodecError, CodecResult};

/// Fallback message when an error response carries no usable text.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unbekannter Fehler";

/// Decode a response body as JSON, tolerating text bodies.
///
/// The bytes are first parsed directly as JSON. If that fails they are read
/// as UTF-8 text and parsed again after trimming; whitespace-only text
/// (including an empty body) yields an empty JSON object.
///
/// # Errors
/// Returns [`CodecError::InvalidUtf8`] if the fallback text read fails, or
/// [`CodecError::InvalidJson`] if the text is not a JSON document.
pub fn decode_lenient(body: &[u8]) -> CodecResult<Value> {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        return Ok(value);
    }

    let text = std::str::from_utf8(body).map_err(|e| CodecError::InvalidUtf8(e.to_string()))?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    serde_json::from_str(trimmed).map_err(|e| CodecError::InvalidJson(e.to_string()))
}

/// Extract the message of an OAuth-style error response.
///
/// Prefers a non-empty `error_description`, then a non-empty `error`, then
/// the raw body text. An empty body yields [`UNKNOWN_ERROR_MESSAGE`].
#[must_use]
pub fn extract_error_message(body: &[u8]) -> String {
    if let Ok(Value::Object(map)) = decode_lenient(body) {
        for key in ["error_description", "error"] {
            if let Some(Value::String(message)) = map.get(key) {
                if !message.trim().is_empty() {
                    return message.clone();
                }
            }
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        UNKNOWN_ERROR_MESSAGE.to_string()
    } else {
        text.to_string()
    }
}
