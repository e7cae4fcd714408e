//! Client Error Types

use thiserror::Error;

/// Client-specific result type alias
pub type ClientResult<T> = Result<T, ClientError>;

/// Client-side failure catalog
///
/// Messages match the wire-visible strings the browser counterpart of
/// this controller reports to callers.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Capability the bridge implementation does not provide
    #[error("not implemented")]
    NotImplemented,

    /// Wallet bridge is not available in this environment
    #[error("not installed")]
    NotInstalled,

    /// Wallet or geolocation capability raised
    #[error("failed due to exception")]
    FailedException,

    /// Caller passed parameters the operation cannot use
    #[error("invalid parameters")]
    InvalidParameters,

    /// Authorize-URL navigation could not be prepared
    #[error("failed to redirect")]
    RedirectFailed,

    /// Server rejected the proof submission
    #[error("sign-in failed")]
    SignInFailed,

    /// Transport failure talking to the auth endpoints
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Wallet bridge reported an error
    #[error("wallet bridge: {0}")]
    Bridge(String),
}

impl ClientError {
    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            ClientError::Http(e) => {
                tracing::warn!(error = %e, "Auth request failed");
            }
            ClientError::Bridge(msg) => {
                tracing::warn!(message = %msg, "Wallet bridge error");
            }
            _ => {
                tracing::debug!(error = %self, "Client auth error");
            }
        }
    }
}
