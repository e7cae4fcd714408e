//! Auth Error Types
//!
//! Error taxonomy for the session orchestration layer. Protocol errors
//! never create or retain a session; verification failures actively
//! delete any existing session. Nonce mismatch is not an `AuthError`:
//! its wire contract lives in `CompleteSiweOutcome`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Redirect callback arrived without an authorization code
    #[error("No code provided")]
    MissingCode,

    /// No usable session cookie on a call that requires one
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Augmentation payload is not a JSON object
    #[error("Augmentation data must be an object")]
    MalformedAugment,

    /// Token endpoint rejected the code exchange or returned garbage
    #[error("Code exchange failed: {0}")]
    ExchangeFailed(String),

    /// Identity token payload segment could not be decoded
    #[error("Identity token decode failed: {0}")]
    TokenDecode(String),

    /// External verifier transport error
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCode | AuthError::MalformedAugment => StatusCode::BAD_REQUEST,
            AuthError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            AuthError::ExchangeFailed(_) | AuthError::TokenDecode(_) | AuthError::Upstream(_) => {
                StatusCode::BAD_GATEWAY
            }
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Upstream(e) => {
                tracing::error!(error = %e, "Upstream request failed");
            }
            AuthError::ExchangeFailed(msg) => {
                tracing::warn!(message = %msg, "Code exchange failed");
            }
            AuthError::TokenDecode(msg) => {
                tracing::warn!(message = %msg, "Identity token decode failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();
        let body = json!({ "status": "error", "message": self.to_string() });
        (status, Json(body)).into_response()
    }
}
