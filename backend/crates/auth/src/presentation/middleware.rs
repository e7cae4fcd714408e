//! Auth Middleware
//!
//! Middleware for host applications to gate their own routes on the
//! session cookie.

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::session::Session;
use crate::error::AuthError;
use crate::presentation::handlers::read_session;

/// Middleware state
#[derive(Clone)]
pub struct SessionMiddlewareState {
    pub config: Arc<AuthConfig>,
}

/// Decoded session stored in request extensions by [`attach_session`]
#[derive(Clone)]
pub struct CurrentSession(pub Option<Session>);

/// Middleware that requires a present session
///
/// Registered with `axum::middleware::from_fn_with_state`.
pub async fn require_session(
    State(state): State<SessionMiddlewareState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let session = read_session(req.headers(), &state.config);

    if session.is_none() {
        let mut response = AuthError::NotAuthenticated.into_response();
        response
            .headers_mut()
            .insert("x-auth-required", HeaderValue::from_static("true"));
        return Err(response);
    }

    Ok(next.run(req).await)
}

/// Middleware that decodes the session but doesn't require it
///
/// Downstream handlers read it from the [`CurrentSession`] extension.
pub async fn attach_session(
    State(state): State<SessionMiddlewareState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let session = read_session(req.headers(), &state.config);
    req.extensions_mut().insert(CurrentSession(session));

    next.run(req).await
}
