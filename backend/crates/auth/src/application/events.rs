//! Lifecycle Event Notifications
//!
//! Host applications observe sign-in/sign-out transitions through this
//! interface. The orchestrator invokes events synchronously after the
//! state transition has been committed to the cookie; an event failure is
//! logged and never rolls the transition back.

use crate::domain::entity::session::User;

/// Observer for auth state transitions
#[trait_variant::make(AuthEvents: Send)]
pub trait LocalAuthEvents {
    /// Invoked after a successful sign-in (either protocol)
    async fn on_sign_in(&self, user: &User) -> Result<(), String>;

    /// Invoked after sign-out, with the just-deleted user record
    async fn on_sign_out(&self, user: &User) -> Result<(), String>;
}

/// Default observer that ignores all events
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEvents;

impl AuthEvents for NoopEvents {
    async fn on_sign_in(&self, _user: &User) -> Result<(), String> {
        Ok(())
    }

    async fn on_sign_out(&self, _user: &User) -> Result<(), String> {
        Ok(())
    }
}
