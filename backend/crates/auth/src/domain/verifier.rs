//! Proof Verifier Capabilities
//!
//! Interfaces for the external proof checks. Implementations live in the
//! infrastructure layer; the orchestrator never interprets signature
//! material itself.

use serde::{Deserialize, Serialize};

use crate::error::AuthResult;

/// Wallet-auth proof payload as submitted by the browser
///
/// Carried opaquely to the verifier; the orchestrator only looks at
/// `status` and `address`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletAuthPayload {
    pub status: String,
    pub message: String,
    pub signature: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
}

/// Result of a SIWE-style signature check
#[derive(Debug, Clone, Deserialize)]
pub struct SiweVerification {
    #[serde(rename = "isValid")]
    pub is_valid: bool,
}

/// Verifies a wallet-signed statement against the nonce it must bind
#[trait_variant::make(SiweVerifier: Send)]
pub trait LocalSiweVerifier {
    async fn verify_siwe(
        &self,
        payload: &WalletAuthPayload,
        nonce: &str,
    ) -> AuthResult<SiweVerification>;
}

/// Resolves whether an address holds orb-level proof of personhood
#[trait_variant::make(VerificationLookup: Send)]
pub trait LocalVerificationLookup {
    async fn is_orb_verified(&self, wallet_address: &str) -> AuthResult<bool>;
}

/// Exchanges an authorization code for an identity token
///
/// Opaque OAuth2-style service; returns the raw `id_token` string.
#[trait_variant::make(CodeExchanger: Send)]
pub trait LocalCodeExchanger {
    async fn exchange_code(&self, code: &str) -> AuthResult<String>;
}
