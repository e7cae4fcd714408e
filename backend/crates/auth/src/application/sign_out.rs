//! Sign Out Use Case
//!
//! Deletes the session cookie unconditionally.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::session::{Session, User};

/// Sign out use case
pub struct SignOutUseCase {
    config: Arc<AuthConfig>,
}

impl SignOutUseCase {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Returns the delete-cookie value and the just-deleted user record
    /// (if a session existed) for the sign-out event.
    pub fn execute(&self, prior: Option<Session>) -> (String, Option<User>) {
        let delete_cookie = self.config.session_cookie().build_delete_cookie();
        let user = prior.map(|s| s.user);

        if user.is_some() {
            tracing::info!("User signed out");
        }

        (delete_cookie, user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_out_without_session_still_clears() {
        let uc = SignOutUseCase::new(Arc::new(AuthConfig::default()));
        let (cookie, user) = uc.execute(None);
        assert!(cookie.starts_with("worldAuthSession=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(user.is_none());
    }

    #[test]
    fn test_sign_out_returns_prior_user() {
        let uc = SignOutUseCase::new(Arc::new(AuthConfig::default()));
        let session = Session::from_world_id_proof(Some("a@b.c".to_string()), false);
        let (_, user) = uc.execute(Some(session));
        assert_eq!(user.unwrap().app_world_id.as_deref(), Some("a@b.c"));
    }
}
