//! Domain Layer
//!
//! Contains entities and the external-capability traits.

pub mod entity;
pub mod verifier;

// Re-exports
pub use entity::{location::LocationEntry, session::Session, session::User};
pub use verifier::{CodeExchanger, SiweVerifier, VerificationLookup, WalletAuthPayload};
