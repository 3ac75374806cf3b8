//! HTTP adapter for the provider's token and user-info endpoints

use async_trait::async_trait;
use oidc_session_common::{decode_compact_token_payload, decode_lenient, extract_error_message};
use oidc_session_core::IdentityProvider;
use oidc_session_domain::{Claims, ProviderConfig, Result, SessionError, TokenPair};
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::http::{HttpClient, HttpResponse};

const USER_AGENT: &str = concat!("oidc-session/", env!("CARGO_PKG_VERSION"));

/// Identity provider reached over HTTP
///
/// The token request authenticates with HTTP Basic credentials and runs
/// under the longer token deadline; the user-info request uses the default
/// deadline.
pub struct HttpIdentityProvider {
    config: ProviderConfig,
    http: HttpClient,
}

impl HttpIdentityProvider {
    /// Create a provider client for `config`.
    ///
    /// # Errors
    /// Returns `SessionError::Transport` if the HTTP client cannot be built.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let http =
            HttpClient::builder().timeout(config.request_timeout()).user_agent(USER_AGENT).build()?;
        Ok(Self { config, http })
    }

    /// Create a provider client that reuses an existing HTTP client.
    #[must_use]
    pub fn with_client(config: ProviderConfig, http: HttpClient) -> Self {
        Self { config, http }
    }

    #[must_use]
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn token_pair_from(response: &HttpResponse) -> Result<TokenPair> {
        let payload = decode_lenient(&response.body).map_err(|err| {
            warn!(error = %err, "Token response is not JSON");
            SessionError::InvalidTokenResponse
        })?;

        let access_token = non_empty_str(&payload, "access_token");
        let id_token = non_empty_str(&payload, "id_token");

        match (access_token, id_token) {
            (Some(access), Some(id)) => Ok(TokenPair::new(access, id)),
            (access, id) => {
                warn!(
                    has_access_token = access.is_some(),
                    has_id_token = id.is_some(),
                    "Token response is missing tokens"
                );
                Err(SessionError::InvalidTokenResponse)
            }
        }
    }

    fn claims_payload_from(response: &HttpResponse) -> Result<Value> {
        match decode_lenient(&response.body) {
            Ok(value) => Ok(value),
            Err(json_err) => {
                debug!(error = %json_err, "User info is not JSON, trying compact token payload");
                decode_compact_token_payload(response.text().trim()).map_err(|token_err| {
                    error!(error = %token_err, "Could not decode user info");
                    SessionError::ClaimsDecodeFailed(token_err.to_string())
                })
            }
        }
    }
}

fn non_empty_str<'a>(payload: &'a Value, key: &str) -> Option<&'a str> {
    payload.get(key).and_then(Value::as_str).filter(|value| !value.is_empty())
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn exchange_code(&self, code: &str) -> Result<TokenPair> {
        let url = self.config.token_endpoint();
        debug!(url = %url, client_id = %self.config.client_id, "Exchanging authorization code");

        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];
        let request = self
            .http
            .request(Method::POST, &url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&form);

        let response = self.http.send_with_timeout(request, self.config.token_request_timeout()).await?;

        if !response.is_success() {
            let message = extract_error_message(&response.body);
            error!(status = %response.status, message = %message, "Token exchange rejected");
            return Err(SessionError::TokenExchangeFailed(message));
        }

        let tokens = Self::token_pair_from(&response)?;
        info!("Token exchange succeeded");
        Ok(tokens)
    }

    async fn fetch_claims(&self, access_token: &str) -> Result<Claims> {
        let url = self.config.userinfo_endpoint();
        debug!(url = %url, "Fetching user info");

        let request = self.http.request(Method::GET, &url).bearer_auth(access_token);
        let response = self.http.send_with_timeout(request, self.config.request_timeout()).await?;

        if !response.is_success() {
            let message = extract_error_message(&response.body);
            error!(status = %response.status, message = %message, "User info request rejected");
            return Err(SessionError::UserInfoFailed(message));
        }

        let claims = Claims::from_value(Self::claims_payload_from(&response)?)?;
        debug!(subject = %claims.subject, "User info resolved");
        Ok(claims)
    }
}
