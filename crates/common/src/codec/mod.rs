//! Tolerant decoding of identity-provider responses
//!
//! Providers do not always honour their declared content type: an endpoint
//! may answer with an empty body, with JSON served as `text/plain`, or with a
//! compact signed token instead of a JSON document. The helpers here operate
//! on the raw body bytes, which are read exactly once by the caller.
//!
//! - [`decode_lenient`]: JSON, else trimmed text as JSON, blank → `{}`
//! - [`decode_compact_token_payload`]: JSON object carried in the middle
//!   segment of a `header.payload.signature` token
//! - [`extract_error_message`]: the human-readable part of an OAuth error
//!   response

mod compact;
mod lenient;

use thiserror::Error;

pub use compact::decode_compact_token_payload;
pub use lenient::{decode_lenient, extract_error_message, UNKNOWN_ERROR_MESSAGE};

/// Decoding failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Body is not valid UTF-8
    #[error("Body is not valid UTF-8: {0}")]
    InvalidUtf8(String),

    /// Body text is not a JSON document
    #[error("Could not parse response: {0}")]
    InvalidJson(String),

    /// Body does not have the `header.payload.signature` shape
    #[error("Not a compact token: {0}")]
    MalformedToken(String),

    /// Token payload segment is not valid base64
    #[error("Token payload is not valid base64: {0}")]
    InvalidBase64(String),

    /// Token payload decoded to something other than a JSON object
    #[error("Token payload is not a JSON object")]
    PayloadNotObject,
}

/// Result type alias for codec operations
pub type CodecResult<T> = Result<T, CodecError>;
