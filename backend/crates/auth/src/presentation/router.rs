//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::events::AuthEvents;
use crate::domain::verifier::{CodeExchanger, SiweVerifier, VerificationLookup};
use crate::presentation::handlers::{self, AuthAppState};

/// Create the auth router for any capability implementations
///
/// The caller nests this under its auth prefix (e.g. `/api/miniauth`).
pub fn auth_router<V, L, X, E>(
    verifier: Arc<V>,
    lookup: Arc<L>,
    exchanger: Arc<X>,
    events: Arc<E>,
    config: AuthConfig,
) -> Router
where
    V: SiweVerifier + Send + Sync + 'static,
    L: VerificationLookup + Send + Sync + 'static,
    X: CodeExchanger + Send + Sync + 'static,
    E: AuthEvents + Send + Sync + 'static,
{
    let state = AuthAppState {
        verifier,
        lookup,
        exchanger,
        events,
        config: Arc::new(config),
    };

    Router::new()
        .route("/nonce", get(handlers::issue_nonce::<V, L, X, E>))
        .route("/complete-siwe", post(handlers::complete_siwe::<V, L, X, E>))
        .route("/session", get(handlers::session::<V, L, X, E>))
        .route("/logout", post(handlers::logout::<V, L, X, E>))
        .route("/augment", post(handlers::augment::<V, L, X, E>))
        .route("/callback", get(handlers::callback::<V, L, X, E>))
        .with_state(state)
}
