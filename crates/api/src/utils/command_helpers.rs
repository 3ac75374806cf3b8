//! Command execution helpers
//!
//! Wraps command bodies with timing and structured outcome logging.

use std::future::Future;
use std::time::Instant;

use oidc_session_domain::Result as DomainResult;

use crate::utils::logging::log_command_execution;

/// Execute a command and log its outcome
///
/// # Example
///
/// ```rust,ignore
/// pub async fn status(ctx: &AppContext) -> DomainResult<SessionStatus> {
///     execute_logged("session::status", || async { Ok(SessionStatus::from(ctx)) }).await
/// }
/// ```
pub async fn execute_logged<F, Fut, T>(command_name: &str, command_fn: F) -> DomainResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = DomainResult<T>>,
{
    let start = Instant::now();

    let result = command_fn().await;

    let error_type = result.as_ref().err().map(|err| err.label());
    log_command_execution(command_name, start.elapsed(), error_type);

    result
}

#[cfg(test)]
mod tests {
    use oidc_session_domain::SessionError;

    use super::*;

    #[tokio::test]
    async fn passes_result_through() {
        let ok = execute_logged("test::ok", || async { Ok(7) }).await;
        assert_eq!(ok, Ok(7));

        let err: DomainResult<()> =
            execute_logged("test::err", || async { Err(SessionError::StateMismatch) }).await;
        assert_eq!(err, Err(SessionError::StateMismatch));
    }
}
