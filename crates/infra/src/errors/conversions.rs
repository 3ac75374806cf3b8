//! Conversions from external infrastructure errors into session errors.

use keyring::Error as KeyringError;
use oidc_session_common::{CodecError, KeychainError};
use oidc_session_domain::SessionError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub SessionError);

impl From<InfraError> for SessionError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<SessionError> for InfraError {
    fn from(value: SessionError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoSessionError {
    fn into_session(self) -> SessionError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → SessionError */
/* -------------------------------------------------------------------------- */

impl IntoSessionError for HttpError {
    fn into_session(self) -> SessionError {
        if self.is_timeout() {
            let url = self.url().map(ToString::to_string).unwrap_or_default();
            return SessionError::RequestTimeout { url };
        }

        SessionError::Transport(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_session())
    }
}

/* -------------------------------------------------------------------------- */
/* keyring / keychain errors → SessionError */
/* -------------------------------------------------------------------------- */

impl IntoSessionError for KeyringError {
    fn into_session(self) -> SessionError {
        use KeyringError::{BadEncoding, NoEntry, NoStorageAccess, PlatformFailure};

        match self {
            NoEntry => SessionError::Storage("keychain entry not found".into()),
            BadEncoding(_) => {
                SessionError::Storage("credential in keychain is not valid UTF-8".into())
            }
            PlatformFailure(err) => SessionError::Storage(format!("keychain platform error: {err}")),
            NoStorageAccess(err) => {
                SessionError::Storage(format!("unable to access secure storage: {err}"))
            }
            other => SessionError::Storage(other.to_string()),
        }
    }
}

impl From<KeyringError> for InfraError {
    fn from(value: KeyringError) -> Self {
        InfraError(value.into_session())
    }
}

impl IntoSessionError for KeychainError {
    fn into_session(self) -> SessionError {
        match self {
            KeychainError::Keyring(err) => err.into_session(),
            other => SessionError::Storage(other.to_string()),
        }
    }
}

impl From<KeychainError> for InfraError {
    fn from(value: KeychainError) -> Self {
        InfraError(value.into_session())
    }
}

/* -------------------------------------------------------------------------- */
/* io / serde / codec errors → SessionError */
/* -------------------------------------------------------------------------- */

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(SessionError::Storage(format!("I/O error: {value}")))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(SessionError::Storage(format!("serialization error: {value}")))
    }
}

impl From<CodecError> for InfraError {
    fn from(value: CodecError) -> Self {
        InfraError(SessionError::ClaimsDecodeFailed(value.to_string()))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::Client;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn keyring_no_entry_maps_to_storage() {
        let mapped: SessionError = InfraError::from(KeyringError::NoEntry).into();
        match mapped {
            SessionError::Storage(msg) => assert!(msg.contains("keychain")),
            other => panic!("expected storage error, got {other:?}"),
        }
    }

    #[test]
    fn keychain_access_failure_maps_to_storage() {
        let err = KeychainError::AccessFailed("denied".into());
        let mapped: SessionError = InfraError::from(err).into();
        assert!(matches!(mapped, SessionError::Storage(msg) if msg.contains("denied")));
    }

    #[test]
    fn codec_error_maps_to_claims_decode() {
        let mapped: SessionError = InfraError::from(CodecError::PayloadNotObject).into();
        assert!(matches!(mapped, SessionError::ClaimsDecodeFailed(_)));
    }

    #[tokio::test]
    async fn http_timeout_maps_to_request_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client =
            Client::builder().no_proxy().timeout(Duration::from_millis(50)).build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap_err();

        let mapped: SessionError = InfraError::from(error).into();
        match mapped {
            SessionError::RequestTimeout { url } => assert!(url.starts_with(&server.uri())),
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
