//! Mini-App Auth Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Session/location entities, external-capability traits
//! - `application/` - Use cases, config, lifecycle events
//! - `infra/` - Identity-provider and verifier HTTP clients
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Wallet-signature sign-in (SIWE-style nonce handshake)
//! - Identity-provider redirect sign-in (authorization-code exchange)
//! - Cookie-only sessions: the session cookie is the sole storage, the
//!   server the sole writer
//! - Session merge semantics: independent wallet and World ID proofs
//!   accrete into one session without clobbering each other
//! - Session augmentation: keyed, independently-expiring extra data
//!   (device location being the first consumer)
//!
//! ## Security Model
//! - One-time nonce bound to the signed statement, stored in its own
//!   Secure+HttpOnly cookie with the session TTL
//! - Any failed proof submission deletes the session cookie; a present
//!   cookie always decodes to a usable session
//! - Cryptographic verification is delegated to external capabilities

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::events::{AuthEvents, NoopEvents};
pub use error::{AuthError, AuthResult};
pub use presentation::router::auth_router;

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::location::*;
    pub use crate::domain::entity::session::*;
    pub use crate::domain::verifier::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
