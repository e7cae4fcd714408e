//! Exchange Code Use Case
//!
//! Redirect-based sign-in: trades the identity provider's authorization
//! code for an identity token and builds a World ID session from its
//! claims.
//!
//! The token payload is decoded structurally (base64url JSON), without a
//! signature check. The token is fetched by this server directly from the
//! provider's token endpoint over TLS, authenticated with the client
//! secret, so the transport is the trust basis for this path.

use std::sync::Arc;

use crate::domain::entity::session::Session;
use crate::domain::verifier::CodeExchanger;
use crate::error::{AuthError, AuthResult};

/// Verification-level claim value that marks orb-level personhood proof
const ORB_VERIFICATION_LEVEL: &str = "orb";

/// Namespaced claim holding the provider's verification metadata
const VERIFICATION_CLAIM: &str = "https://id.worldcoin.org/v1";

/// Exchange code use case
pub struct ExchangeCodeUseCase<X>
where
    X: CodeExchanger,
{
    exchanger: Arc<X>,
}

impl<X> ExchangeCodeUseCase<X>
where
    X: CodeExchanger,
{
    pub fn new(exchanger: Arc<X>) -> Self {
        Self { exchanger }
    }

    /// Exchange `code` and merge the resulting proof into `prior`.
    ///
    /// Any failure is fatal for this attempt; no partial session is
    /// created and `prior` is left untouched by the caller.
    pub async fn execute(&self, code: &str, prior: Option<Session>) -> AuthResult<Session> {
        let id_token = self.exchanger.exchange_code(code).await?;
        let claims = decode_token_payload(&id_token)?;

        let email = claims
            .get("email")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        let verification_level = claims
            .get(VERIFICATION_CLAIM)
            .and_then(|v| v.get("verification_level"))
            .and_then(|v| v.as_str());
        let orb_verified = verification_level == Some(ORB_VERIFICATION_LEVEL);

        let fresh = Session::from_world_id_proof(email, orb_verified);
        let merged = match prior {
            Some(mut existing) => {
                existing.merge_from(fresh);
                existing
            }
            None => fresh,
        };

        tracing::info!(orb_verified = orb_verified, "World ID sign-in completed");

        Ok(merged)
    }
}

/// Decode the payload segment of a JWT-shaped token into JSON claims
///
/// Structural decode only; see the module doc for why no signature is
/// checked on this path.
fn decode_token_payload(token: &str) -> AuthResult<serde_json::Value> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| AuthError::TokenDecode("token has no payload segment".to_string()))?;

    let bytes = platform::crypto::base64url_decode(payload)
        .map_err(|e| AuthError::TokenDecode(format!("base64url: {e}")))?;

    serde_json::from_slice(&bytes).map_err(|e| AuthError::TokenDecode(format!("json: {e}")))
}
