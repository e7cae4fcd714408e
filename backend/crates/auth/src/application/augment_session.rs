//! Augment Session Use Case
//!
//! Attaches a keyed, independently-expiring data blob to an existing
//! authenticated session without re-running any identity proof.

use crate::domain::entity::session::Session;

/// Augment session use case
///
/// Stateless; the session in and the session out both live in the cookie.
pub struct AugmentSessionUseCase;

impl AugmentSessionUseCase {
    /// Set or remove `extra[key]`.
    ///
    /// Returns `None` when there is no valid session; the caller treats
    /// that as "not authenticated", not as an error. `Some(data)` replaces
    /// the entry wholesale; `None` data removes it.
    pub fn execute(
        &self,
        session: Option<Session>,
        key: &str,
        data: Option<serde_json::Value>,
    ) -> Option<Session> {
        let mut session = session?;

        match data {
            Some(value) => {
                session.extra.insert(key.to_string(), value);
            }
            None => {
                session.extra.remove(key);
            }
        }

        tracing::debug!(key = %key, "Session augmented");

        Some(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::session::User;
    use serde_json::json;

    fn authed_session() -> Session {
        Session::from_wallet_proof(
            User {
                wallet_address: Some("0xabc".to_string()),
                username: None,
                app_world_id: None,
            },
            false,
        )
    }

    #[test]
    fn test_requires_session() {
        let result = AugmentSessionUseCase.execute(None, "location", Some(json!({})));
        assert!(result.is_none());
    }

    #[test]
    fn test_set_replaces_entry_wholesale() {
        let mut session = authed_session();
        session
            .extra
            .insert("location".to_string(), json!({"latitude": 1, "old": true}));

        let data = json!({
            "latitude": 1,
            "longitude": 2,
            "validUntil": "2099-01-01T00:00:00.000Z"
        });

        let updated = AugmentSessionUseCase
            .execute(Some(session), "location", Some(data.clone()))
            .unwrap();

        assert_eq!(updated.extra["location"], data);
        assert!(updated.extra["location"].get("old").is_none());
    }

    #[test]
    fn test_null_removes_entry() {
        let mut session = authed_session();
        session.extra.insert("location".to_string(), json!({}));
        session.extra.insert("theme".to_string(), json!({}));

        let updated = AugmentSessionUseCase
            .execute(Some(session), "location", None)
            .unwrap();

        assert!(!updated.extra.contains_key("location"));
        assert!(updated.extra.contains_key("theme"));
    }

    #[test]
    fn test_identity_fields_untouched() {
        let updated = AugmentSessionUseCase
            .execute(Some(authed_session()), "location", Some(json!({"x": 1})))
            .unwrap();

        assert!(updated.is_authenticated_wallet);
        assert_eq!(updated.user.wallet_address.as_deref(), Some("0xabc"));
    }
}
