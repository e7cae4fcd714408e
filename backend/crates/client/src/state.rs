//! Client Auth State
//!
//! The in-memory mirror of the session cookie. The mirror is owned by the
//! controller and mutated only through these methods; it is
//! eventually-consistent with the cookie after each round trip.

use miniauth::models::Session;

/// Owned auth state
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    is_loading: bool,
    is_initialized: bool,
    is_installed: bool,
    session: Option<Session>,
}

impl AuthState {
    /// Whether a round trip is currently in flight
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Whether `init` has completed (successfully or not)
    pub fn is_initialized(&self) -> bool {
        self.is_initialized
    }

    /// Whether the wallet bridge is available
    pub fn is_installed(&self) -> bool {
        self.is_installed
    }

    /// Non-null exactly when authenticated
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub(crate) fn mark_initialized(&mut self, installed: bool) {
        self.is_initialized = true;
        self.is_installed = installed;
    }

    /// Mirror a session returned by the server
    pub(crate) fn set_session(&mut self, session: Option<Session>) {
        self.session = session;
    }

    /// Back to unauthenticated; init/installed flags survive
    pub(crate) fn reset_auth(&mut self) {
        self.session = None;
        self.is_loading = false;
    }
}
