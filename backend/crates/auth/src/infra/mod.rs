//! Infrastructure Layer
//!
//! External service integrations (identity provider, verifier gateway).

pub mod worldcoin;

pub use worldcoin::{TokenEndpointExchanger, VerifierGateway};
