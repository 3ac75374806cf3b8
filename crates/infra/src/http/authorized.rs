//! Requests on behalf of the signed-in user

use std::sync::Arc;

use oidc_session_core::SessionConsumer;
use oidc_session_domain::SessionError;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use tracing::{error, warn};

use crate::errors::InfraError;

/// Attaches the session's bearer token to outbound API calls.
///
/// Responses are returned whatever their status; 401 and 403 are only logged
/// so the caller can decide whether to log the user out.
#[derive(Clone)]
pub struct AuthorizedClient {
    client: reqwest::Client,
    session: Arc<dyn SessionConsumer>,
}

impl AuthorizedClient {
    pub fn new(client: reqwest::Client, session: Arc<dyn SessionConsumer>) -> Self {
        Self { client, session }
    }

    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Send `builder`, adding `Authorization: Bearer` when a token is available.
    ///
    /// # Errors
    /// Returns `SessionError::Transport` or `SessionError::RequestTimeout` if
    /// the request cannot be completed.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, SessionError> {
        let builder = match self.session.access_token().await {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder.send().await.map_err(|err| {
            error!(error = %err, "Authorized request failed");
            SessionError::from(InfraError::from(err))
        })?;

        if matches!(response.status(), StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            warn!(url = %response.url(), status = %response.status(), "Authorization problem on request");
        }

        Ok(response)
    }
}
