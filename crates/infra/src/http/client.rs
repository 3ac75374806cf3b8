use std::time::Duration;

use oidc_session_domain::constants::DEFAULT_REQUEST_TIMEOUT;
use oidc_session_domain::SessionError;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, StatusCode};
use tracing::debug;

use crate::errors::InfraError;

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub url: String,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// HTTP client that bounds every exchange by a deadline.
///
/// The deadline covers sending the request and reading the whole body. No
/// request is retried.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    default_timeout: Duration,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    ///
    /// # Errors
    /// Returns `SessionError::Transport` if the TLS backend cannot be set up.
    pub fn new() -> Result<Self, SessionError> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    #[must_use]
    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Execute the request with the client's default deadline.
    ///
    /// # Errors
    /// See [`Self::send_with_timeout`].
    pub async fn send(&self, builder: RequestBuilder) -> Result<HttpResponse, SessionError> {
        self.send_with_timeout(builder, self.default_timeout).await
    }

    /// Execute the request and read its body within `timeout`.
    ///
    /// # Errors
    /// Returns `SessionError::RequestTimeout` carrying the request URL when the
    /// deadline passes, or `SessionError::Transport` with the underlying
    /// message for any other failure.
    pub async fn send_with_timeout(
        &self,
        builder: RequestBuilder,
        timeout: Duration,
    ) -> Result<HttpResponse, SessionError> {
        let request = builder.build().map_err(|err| SessionError::from(InfraError::from(err)))?;
        let method = request.method().clone();
        let url = request.url().to_string();
        debug!(%method, %url, timeout_ms = timeout.as_millis(), "sending HTTP request");

        let exchange = async {
            let response = self.client.execute(request).await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        match tokio::time::timeout(timeout, exchange).await {
            Ok(Ok((status, body))) => {
                debug!(%method, %url, %status, body_len = body.len(), "received HTTP response");
                Ok(HttpResponse { status, url, body: body.to_vec() })
            }
            Ok(Err(err)) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
            Err(_) => {
                debug!(%method, %url, "HTTP request timed out");
                Err(SessionError::RequestTimeout { url })
            }
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: Option<reqwest::header::HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self { timeout: DEFAULT_REQUEST_TIMEOUT, user_agent: None, default_headers: None }
    }
}

impl HttpClientBuilder {
    /// Default deadline for [`HttpClient::send`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn default_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// # Errors
    /// Returns `SessionError::Transport` if the reqwest client cannot be built.
    pub fn build(self) -> Result<HttpClient, SessionError> {
        let mut builder = ReqwestClient::builder().no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(|err| SessionError::from(InfraError::from(err)))?;

        Ok(HttpClient { client, default_timeout: self.timeout })
    }
}
