//! Complete SIWE Use Case
//!
//! Verifies a wallet-signature proof against the issued nonce and
//! establishes (or extends) the session.

use std::sync::Arc;

use crate::domain::entity::session::{Session, User};
use crate::domain::verifier::{SiweVerifier, VerificationLookup, WalletAuthPayload};

/// Proof submission from the browser
#[derive(Debug, Clone)]
pub struct CompleteSiweInput {
    pub payload: WalletAuthPayload,
    pub nonce: String,
    pub user: User,
}

/// Outcome of a proof submission
///
/// Not a `Result`: each variant has its own wire contract, and every
/// non-success variant requires the handler to delete the session cookie.
#[derive(Debug, Clone)]
pub enum CompleteSiweOutcome {
    /// Presented nonce missing or not the one last issued
    InvalidNonce,
    /// Signature invalid, or a verifier call failed
    Rejected,
    /// Proof accepted; the merged session to persist and return
    SignedIn(Session),
}

/// Complete SIWE use case
pub struct CompleteSiweUseCase<V, L>
where
    V: SiweVerifier,
    L: VerificationLookup,
{
    verifier: Arc<V>,
    lookup: Arc<L>,
}

impl<V, L> CompleteSiweUseCase<V, L>
where
    V: SiweVerifier,
    L: VerificationLookup,
{
    pub fn new(verifier: Arc<V>, lookup: Arc<L>) -> Self {
        Self { verifier, lookup }
    }

    /// `issued_nonce` is the current value of the nonce cookie;
    /// `prior` is the decoded session cookie, if any.
    pub async fn execute(
        &self,
        input: CompleteSiweInput,
        issued_nonce: Option<&str>,
        prior: Option<Session>,
    ) -> CompleteSiweOutcome {
        if issued_nonce != Some(input.nonce.as_str()) {
            return CompleteSiweOutcome::InvalidNonce;
        }

        let address = input
            .user
            .wallet_address
            .clone()
            .unwrap_or_else(|| input.payload.address.clone());

        // Signature check and orb-verification lookup are independent;
        // both must complete before the decision is made.
        let (verification, orb_verified) = tokio::join!(
            self.verifier.verify_siwe(&input.payload, &input.nonce),
            self.lookup.is_orb_verified(&address),
        );

        let verification = match verification {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "SIWE verification call failed");
                return CompleteSiweOutcome::Rejected;
            }
        };
        let orb_verified = match orb_verified {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "Orb verification lookup failed");
                return CompleteSiweOutcome::Rejected;
            }
        };

        if !verification.is_valid {
            tracing::warn!(address = %address, "Invalid SIWE signature");
            return CompleteSiweOutcome::Rejected;
        }

        let fresh = Session::from_wallet_proof(input.user, orb_verified);
        let merged = match prior {
            Some(mut existing) => {
                existing.merge_from(fresh);
                existing
            }
            None => fresh,
        };

        tracing::info!(
            address = %address,
            orb_verified = orb_verified,
            "Wallet sign-in completed"
        );

        CompleteSiweOutcome::SignedIn(merged)
    }
}
