//! HTTP Handlers
//!
//! Each handler is single-shot: read the cookies, run the use case, write
//! the cookies. There is no in-process session state.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use platform::cookie;

use crate::application::config::AuthConfig;
use crate::application::events::AuthEvents;
use crate::application::{
    AugmentSessionUseCase, CompleteSiweInput, CompleteSiweOutcome, CompleteSiweUseCase,
    ExchangeCodeUseCase, IssueNonceUseCase, SignOutUseCase,
};
use crate::domain::entity::session::Session;
use crate::domain::verifier::{CodeExchanger, SiweVerifier, VerificationLookup};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AugmentRequest, CallbackQuery, CompleteSiweRequest, LogoutResponse, NonceResponse,
    SiweErrorResponse,
};

/// Shared state for auth handlers
pub struct AuthAppState<V, L, X, E>
where
    V: SiweVerifier + Send + Sync + 'static,
    L: VerificationLookup + Send + Sync + 'static,
    X: CodeExchanger + Send + Sync + 'static,
    E: AuthEvents + Send + Sync + 'static,
{
    pub verifier: Arc<V>,
    pub lookup: Arc<L>,
    pub exchanger: Arc<X>,
    pub events: Arc<E>,
    pub config: Arc<AuthConfig>,
}

impl<V, L, X, E> Clone for AuthAppState<V, L, X, E>
where
    V: SiweVerifier + Send + Sync + 'static,
    L: VerificationLookup + Send + Sync + 'static,
    X: CodeExchanger + Send + Sync + 'static,
    E: AuthEvents + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            verifier: self.verifier.clone(),
            lookup: self.lookup.clone(),
            exchanger: self.exchanger.clone(),
            events: self.events.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Nonce
// ============================================================================

/// GET /nonce
pub async fn issue_nonce<V, L, X, E>(
    State(state): State<AuthAppState<V, L, X, E>>,
) -> impl IntoResponse
where
    V: SiweVerifier + Send + Sync + 'static,
    L: VerificationLookup + Send + Sync + 'static,
    X: CodeExchanger + Send + Sync + 'static,
    E: AuthEvents + Send + Sync + 'static,
{
    let output = IssueNonceUseCase::new(state.config.clone()).execute();

    (
        [(header::SET_COOKIE, output.set_cookie)],
        Json(NonceResponse {
            nonce: output.nonce,
        }),
    )
}

// ============================================================================
// Complete SIWE
// ============================================================================

/// POST /complete-siwe
pub async fn complete_siwe<V, L, X, E>(
    State(state): State<AuthAppState<V, L, X, E>>,
    headers: HeaderMap,
    Json(req): Json<CompleteSiweRequest>,
) -> Response
where
    V: SiweVerifier + Send + Sync + 'static,
    L: VerificationLookup + Send + Sync + 'static,
    X: CodeExchanger + Send + Sync + 'static,
    E: AuthEvents + Send + Sync + 'static,
{
    let issued_nonce = read_nonce(&headers, &state.config);
    let prior = read_session(&headers, &state.config);

    let use_case = CompleteSiweUseCase::new(state.verifier.clone(), state.lookup.clone());

    let input = CompleteSiweInput {
        payload: req.payload,
        nonce: req.nonce,
        user: req.user,
    };

    match use_case
        .execute(input, issued_nonce.as_deref(), prior)
        .await
    {
        CompleteSiweOutcome::InvalidNonce => {
            // Failure must not leave a half-authenticated cookie behind
            let clear = state.config.session_cookie().build_delete_cookie();
            (
                [(header::SET_COOKIE, clear)],
                Json(SiweErrorResponse::invalid_nonce()),
            )
                .into_response()
        }
        CompleteSiweOutcome::Rejected => {
            let clear = state.config.session_cookie().build_delete_cookie();
            ([(header::SET_COOKIE, clear)], Json(serde_json::Value::Null)).into_response()
        }
        CompleteSiweOutcome::SignedIn(session) => {
            notify_sign_in(state.events.as_ref(), &session).await;
            let set = session_set_cookie(&state.config, &session);
            ([(header::SET_COOKIE, set)], Json(session)).into_response()
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// GET /session
pub async fn session<V, L, X, E>(
    State(state): State<AuthAppState<V, L, X, E>>,
    headers: HeaderMap,
) -> Response
where
    V: SiweVerifier + Send + Sync + 'static,
    L: VerificationLookup + Send + Sync + 'static,
    X: CodeExchanger + Send + Sync + 'static,
    E: AuthEvents + Send + Sync + 'static,
{
    match read_session(&headers, &state.config) {
        Some(session) => Json(session).into_response(),
        None => (StatusCode::UNAUTHORIZED, Json(serde_json::Value::Null)).into_response(),
    }
}

// ============================================================================
// Logout
// ============================================================================

/// POST /logout
pub async fn logout<V, L, X, E>(
    State(state): State<AuthAppState<V, L, X, E>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    V: SiweVerifier + Send + Sync + 'static,
    L: VerificationLookup + Send + Sync + 'static,
    X: CodeExchanger + Send + Sync + 'static,
    E: AuthEvents + Send + Sync + 'static,
{
    let prior = read_session(&headers, &state.config);
    let (clear, user) = SignOutUseCase::new(state.config.clone()).execute(prior);

    if let Some(user) = user {
        if let Err(e) = state.events.on_sign_out(&user).await {
            tracing::warn!(error = %e, "on_sign_out event failed");
        }
    }

    (
        [(header::SET_COOKIE, clear)],
        Json(LogoutResponse { success: true }),
    )
}

// ============================================================================
// Augmentation
// ============================================================================

/// POST /augment
pub async fn augment<V, L, X, E>(
    State(state): State<AuthAppState<V, L, X, E>>,
    headers: HeaderMap,
    Json(req): Json<AugmentRequest>,
) -> AuthResult<Response>
where
    V: SiweVerifier + Send + Sync + 'static,
    L: VerificationLookup + Send + Sync + 'static,
    X: CodeExchanger + Send + Sync + 'static,
    E: AuthEvents + Send + Sync + 'static,
{
    // Reject before touching the session; null data detaches the key
    if req.key.is_empty() || !(req.data.is_object() || req.data.is_null()) {
        return Err(AuthError::MalformedAugment);
    }

    let prior = read_session(&headers, &state.config);
    let data = (!req.data.is_null()).then_some(req.data);

    match AugmentSessionUseCase.execute(prior, &req.key, data) {
        Some(session) => {
            let set = session_set_cookie(&state.config, &session);
            Ok(([(header::SET_COOKIE, set)], Json(session)).into_response())
        }
        // No session: the caller treats null as "not authenticated"
        None => Ok(Json(serde_json::Value::Null).into_response()),
    }
}

// ============================================================================
// Identity-provider callback
// ============================================================================

/// GET /callback
pub async fn callback<V, L, X, E>(
    State(state): State<AuthAppState<V, L, X, E>>,
    headers: HeaderMap,
    Query(query): Query<CallbackQuery>,
) -> AuthResult<Response>
where
    V: SiweVerifier + Send + Sync + 'static,
    L: VerificationLookup + Send + Sync + 'static,
    X: CodeExchanger + Send + Sync + 'static,
    E: AuthEvents + Send + Sync + 'static,
{
    let code = query.code.ok_or(AuthError::MissingCode)?;
    let prior = read_session(&headers, &state.config);

    let session = match ExchangeCodeUseCase::new(state.exchanger.clone())
        .execute(&code, prior)
        .await
    {
        Ok(session) => session,
        // A failed exchange deletes any prior session rather than
        // leaving a half-authenticated cookie behind
        Err(e) => {
            let clear = state.config.session_cookie().build_delete_cookie();
            let mut response = e.into_response();
            if let Ok(value) = clear.parse() {
                response.headers_mut().insert(header::SET_COOKIE, value);
            }
            return Ok(response);
        }
    };

    notify_sign_in(state.events.as_ref(), &session).await;

    let set = session_set_cookie(&state.config, &session);
    let location = format!("{}/", state.config.server_base_url.trim_end_matches('/'));

    Ok((
        StatusCode::FOUND,
        [
            (header::SET_COOKIE, set),
            (header::LOCATION, location),
        ],
    )
        .into_response())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Decode the session cookie; absent/malformed/empty-user all mean "none"
pub(crate) fn read_session(headers: &HeaderMap, config: &AuthConfig) -> Option<Session> {
    let raw = cookie::extract_cookie(headers, &config.cookie_session_name)?;
    Session::from_cookie_value(Some(&cookie::decode_value(&raw)))
}

fn read_nonce(headers: &HeaderMap, config: &AuthConfig) -> Option<String> {
    cookie::extract_cookie(headers, &config.cookie_nonce_name)
}

fn session_set_cookie(config: &AuthConfig, session: &Session) -> String {
    let value = cookie::encode_value(&session.to_cookie_value());
    config.session_cookie().build_set_cookie(&value)
}

async fn notify_sign_in<E: AuthEvents>(events: &E, session: &Session) {
    if let Err(e) = events.on_sign_in(&session.user).await {
        tracing::warn!(error = %e, "on_sign_in event failed");
    }
}
