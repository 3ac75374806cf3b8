//! Session and identity-claim types
//!
//! A [`Session`] is only ever constructed complete: both tokens plus the
//! claims resolved from the provider. Claims keep the provider's wire names
//! (`sub`, `name`, `email`, `groups`) so the persisted blob is the provider's
//! own object shape.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{UNKNOWN_DISPLAY_NAME, UNKNOWN_SUBJECT};
use crate::errors::{Result, SessionError};

/// Identity claims returned by the provider's user-info endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Opaque stable user identifier
    #[serde(rename = "sub")]
    pub subject: String,

    #[serde(rename = "name", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,

    /// Any other claims, preserved untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Create claims carrying only a subject.
    #[must_use]
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            display_name: None,
            email: None,
            groups: Vec::new(),
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn with_groups(mut self, groups: Vec<String>) -> Self {
        self.groups = groups;
        self
    }

    /// Minimal identity used when the provider returns an empty object.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::new(UNKNOWN_SUBJECT).with_display_name(UNKNOWN_DISPLAY_NAME)
    }

    /// Build claims from a decoded JSON value.
    ///
    /// The value must be an object. An empty object yields
    /// [`Claims::placeholder`]. Well-known claims are read leniently: a
    /// numeric `sub` is stringified, a single-string `groups` becomes a
    /// one-element list, and a missing `sub` falls back to `"unknown"`.
    ///
    /// # Errors
    /// Returns [`SessionError::ClaimsDecodeFailed`] if the value is not an
    /// object.
    pub fn from_value(value: Value) -> Result<Self> {
        let mut map = match value {
            Value::Object(map) => map,
            other => {
                return Err(SessionError::ClaimsDecodeFailed(format!(
                    "expected a claims object, got {}",
                    value_kind(&other)
                )));
            }
        };

        if map.is_empty() {
            return Ok(Self::placeholder());
        }

        let subject = match map.remove("sub") {
            Some(Value::String(s)) if !s.is_empty() => s,
            Some(Value::Number(n)) => n.to_string(),
            _ => UNKNOWN_SUBJECT.to_string(),
        };
        let display_name = take_string(&mut map, "name");
        let email = take_string(&mut map, "email");
        let groups = match map.remove("groups") {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
            Some(Value::String(single)) => vec![single],
            _ => Vec::new(),
        };

        Ok(Self { subject, display_name, email, groups, extra: map })
    }

    /// Parse a serialized claims blob (the persisted `userInfo` entry).
    ///
    /// # Errors
    /// Returns [`SessionError::ClaimsDecodeFailed`] if the blob is not a JSON
    /// object.
    pub fn from_json_str(blob: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(blob)
            .map_err(|e| SessionError::ClaimsDecodeFailed(e.to_string()))?;
        Self::from_value(value)
    }

    /// Serialize to the persisted blob format.
    ///
    /// # Errors
    /// Returns [`SessionError::Storage`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| SessionError::Storage(e.to_string()))
    }

    /// Whether the user belongs to the given group.
    #[must_use]
    pub fn is_member_of(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }

    /// Avatar initials: up to two from the display name, else the first two
    /// characters of the subject, else `"U"`.
    #[must_use]
    pub fn initials(&self) -> String {
        if let Some(name) = self.display_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name
                .split_whitespace()
                .filter_map(|part| part.chars().next())
                .take(2)
                .flat_map(char::to_uppercase)
                .collect();
        }

        let from_subject: String = self.subject.chars().take(2).collect();
        if from_subject.is_empty() {
            "U".to_string()
        } else {
            from_subject.to_uppercase()
        }
    }
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    match map.remove(key) {
        Some(Value::String(s)) => Some(s),
        Some(other) if !other.is_null() => {
            // Keep non-string values instead of dropping them.
            map.insert(key.to_string(), other);
            None
        }
        _ => None,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Token pair returned by a successful code exchange
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub id_token: String,
}

impl TokenPair {
    #[must_use]
    pub fn new(access_token: impl Into<String>, id_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into(), id_token: id_token.into() }
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &Redacted(&self.access_token))
            .field("id_token", &Redacted(&self.id_token))
            .finish()
    }
}

/// The authenticated identity bound to this client
#[derive(Clone, PartialEq)]
pub struct Session {
    pub claims: Claims,
    pub access_token: String,
    pub id_token: String,
}

impl Session {
    #[must_use]
    pub fn new(tokens: TokenPair, claims: Claims) -> Self {
        Self { claims, access_token: tokens.access_token, id_token: tokens.id_token }
    }

    /// True once both tokens and the identity claims are resolved.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.access_token.is_empty() && !self.id_token.is_empty()
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.claims.subject
    }

    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.claims.display_name.as_deref()
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.claims.email.as_deref()
    }

    #[must_use]
    pub fn groups(&self) -> &[String] {
        &self.claims.groups
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("claims", &self.claims)
            .field("access_token", &Redacted(&self.access_token))
            .field("id_token", &Redacted(&self.id_token))
            .finish()
    }
}

struct Redacted<'a>(&'a str);

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<redacted {} chars>", self.0.len())
    }
}
