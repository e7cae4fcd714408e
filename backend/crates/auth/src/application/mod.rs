//! Application Layer
//!
//! Use cases and application services.

pub mod augment_session;
pub mod complete_siwe;
pub mod config;
pub mod events;
pub mod exchange_code;
pub mod issue_nonce;
pub mod sign_out;

// Re-exports
pub use augment_session::AugmentSessionUseCase;
pub use complete_siwe::{CompleteSiweInput, CompleteSiweOutcome, CompleteSiweUseCase};
pub use config::AuthConfig;
pub use events::{AuthEvents, NoopEvents};
pub use exchange_code::ExchangeCodeUseCase;
pub use issue_nonce::{IssueNonceOutput, IssueNonceUseCase};
pub use sign_out::SignOutUseCase;
