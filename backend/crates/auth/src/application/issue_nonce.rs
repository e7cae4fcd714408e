//! Issue Nonce Use Case
//!
//! Mints a one-time challenge token for the wallet handshake.

use std::sync::Arc;

use crate::application::config::AuthConfig;

/// Issue nonce output
#[derive(Debug, Clone)]
pub struct IssueNonceOutput {
    /// Token the client embeds in the statement to be signed
    pub nonce: String,
    /// Set-Cookie value storing the token server-side-of-the-browser
    pub set_cookie: String,
}

/// Issue nonce use case
///
/// The nonce lives only in its cookie; single use is enforced by
/// overwriting on each issuance and deleting the session on any failed
/// proof, not by a consumed-set.
pub struct IssueNonceUseCase {
    config: Arc<AuthConfig>,
}

impl IssueNonceUseCase {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> IssueNonceOutput {
        let nonce = platform::crypto::nonce_token();
        let set_cookie = self.config.nonce_cookie().build_set_cookie(&nonce);

        tracing::debug!("Issued login nonce");

        IssueNonceOutput { nonce, set_cookie }
    }
}
