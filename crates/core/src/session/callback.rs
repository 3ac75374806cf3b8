//! Parameters carried by the provider's redirect back to the application

use oidc_session_domain::{Result, SessionError};
use serde::{Deserialize, Serialize};
use url::{form_urlencoded, Url};

/// Query parameters of the callback redirect
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl CallbackParams {
    /// Parameters carrying just an authorization code.
    #[must_use]
    pub fn with_code(code: impl Into<String>) -> Self {
        Self { code: Some(code.into()), ..Self::default() }
    }

    #[must_use]
    pub fn and_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Parse a query string, with or without the leading `?`.
    ///
    /// Unknown parameters are ignored; the first occurrence of a repeated
    /// parameter wins.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Self::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "code" => &mut params.code,
                "state" => &mut params.state,
                "error" => &mut params.error,
                "error_description" => &mut params.error_description,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        params
    }

    /// Parse a full redirect URL.
    ///
    /// # Errors
    /// Returns [`SessionError::Config`] if `url` is not an absolute URL.
    pub fn from_url(url: &str) -> Result<Self> {
        let parsed = Url::parse(url)
            .map_err(|e| SessionError::Config(format!("invalid redirect URL ({url}): {e}")))?;
        Ok(Self::from_query(parsed.query().unwrap_or_default()))
    }

    /// The authorization code, if present and not blank.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}
