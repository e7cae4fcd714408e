//! Session Entity
//!
//! The authenticated identity plus accreted metadata, stored as a single
//! JSON cookie. The cookie is the sole storage; the server is the sole
//! writer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// User record carried by a session
///
/// Field names on the wire match the cookie format consumed by the
/// browser side (`walletAddress`, `username`, `appWorldID`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "walletAddress", skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "appWorldID", skip_serializing_if = "Option::is_none")]
    pub app_world_id: Option<String>,
}

impl User {
    /// A user with no fields does not count as an identity
    pub fn is_empty(&self) -> bool {
        self.wallet_address.is_none() && self.username.is_none() && self.app_world_id.is_none()
    }

    /// Shallow override: `newer` values replace same-key values,
    /// unset keys preserve the prior value
    pub fn merge_from(&mut self, newer: User) {
        if newer.wallet_address.is_some() {
            self.wallet_address = newer.wallet_address;
        }
        if newer.username.is_some() {
            self.username = newer.username;
        }
        if newer.app_world_id.is_some() {
            self.app_world_id = newer.app_world_id;
        }
    }
}

/// Session entity
///
/// A session may hold a wallet proof, a World ID proof, or both; the two
/// arrive independently and must merge without clobbering each other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "isAuthenticatedWallet", default)]
    pub is_authenticated_wallet: bool,
    #[serde(rename = "isAuthenticatedWorldID", default)]
    pub is_authenticated_world_id: bool,
    #[serde(rename = "isOrbVerified", default)]
    pub is_orb_verified: bool,
    #[serde(default)]
    pub user: User,
    /// Open-ended side channel for derived, independently-expiring data
    #[serde(default)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Session {
    /// Session created by a successful wallet-signature proof
    pub fn from_wallet_proof(user: User, is_orb_verified: bool) -> Self {
        Self {
            is_authenticated_wallet: true,
            is_authenticated_world_id: false,
            is_orb_verified,
            user,
            extra: BTreeMap::new(),
        }
    }

    /// Session created by a successful World ID code exchange
    pub fn from_world_id_proof(app_world_id: Option<String>, is_orb_verified: bool) -> Self {
        Self {
            is_authenticated_wallet: false,
            is_authenticated_world_id: true,
            is_orb_verified,
            user: User {
                app_world_id,
                ..User::default()
            },
            extra: BTreeMap::new(),
        }
    }

    /// A session is usable only when it carries a non-empty user
    pub fn is_present(&self) -> bool {
        !self.user.is_empty()
    }

    /// Merge a newer session into this one, field by field:
    /// - proof flags and `isOrbVerified` are logical-OR (never downgrade)
    /// - `user` merges by shallow override
    /// - `extra` is a map union, newer entries replacing same-key entries
    ///   wholesale
    pub fn merge_from(&mut self, newer: Session) {
        self.is_authenticated_wallet |= newer.is_authenticated_wallet;
        self.is_authenticated_world_id |= newer.is_authenticated_world_id;
        self.is_orb_verified |= newer.is_orb_verified;
        self.user.merge_from(newer.user);
        self.extra.extend(newer.extra);
    }

    /// Decode a session from a raw cookie value
    ///
    /// Lenient by design: a missing, malformed, or empty-user cookie all
    /// mean "no session" rather than an error.
    pub fn from_cookie_value(raw: Option<&str>) -> Option<Session> {
        let session: Session = serde_json::from_str(raw?).ok()?;
        session.is_present().then_some(session)
    }

    /// Encode for cookie storage
    pub fn to_cookie_value(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wallet_session() -> Session {
        Session::from_wallet_proof(
            User {
                wallet_address: Some("0xabc".to_string()),
                username: Some("alice".to_string()),
                app_world_id: None,
            },
            false,
        )
    }

    #[test]
    fn test_empty_cookie_is_no_session() {
        assert_eq!(Session::from_cookie_value(None), None);
        assert_eq!(Session::from_cookie_value(Some("")), None);
        assert_eq!(Session::from_cookie_value(Some("{}")), None);
        assert_eq!(Session::from_cookie_value(Some("not json")), None);
        assert_eq!(
            Session::from_cookie_value(Some(r#"{"user":{},"extra":{}}"#)),
            None
        );
    }

    #[test]
    fn test_cookie_round_trip_preserves_wire_names() {
        let session = wallet_session();
        let raw = session.to_cookie_value();
        assert!(raw.contains("\"isAuthenticatedWallet\":true"));
        assert!(raw.contains("\"isAuthenticatedWorldID\":false"));
        assert!(raw.contains("\"walletAddress\":\"0xabc\""));

        let decoded = Session::from_cookie_value(Some(&raw)).unwrap();
        assert_eq!(decoded, session);
    }

    #[test]
    fn test_merge_preserves_prior_proof() {
        let mut prior = Session::from_world_id_proof(Some("a@b.c".to_string()), true);
        prior
            .extra
            .insert("location".to_string(), json!({"latitude": 1.0}));

        prior.merge_from(wallet_session());

        assert!(prior.is_authenticated_wallet);
        assert!(prior.is_authenticated_world_id);
        assert_eq!(prior.user.wallet_address.as_deref(), Some("0xabc"));
        assert_eq!(prior.user.app_world_id.as_deref(), Some("a@b.c"));
        assert!(prior.extra.contains_key("location"));
    }

    #[test]
    fn test_orb_verified_is_monotonic() {
        let mut session = Session::from_wallet_proof(wallet_session().user, true);
        let newer = wallet_session(); // is_orb_verified = false
        session.merge_from(newer);
        assert!(session.is_orb_verified);
    }

    #[test]
    fn test_extra_merge_is_union_newer_wins() {
        let mut a = wallet_session();
        a.extra.insert("location".to_string(), json!({"old": true}));
        a.extra.insert("theme".to_string(), json!({"dark": true}));

        let mut b = wallet_session();
        b.extra.insert("location".to_string(), json!({"new": true}));
        b.extra.insert("badge".to_string(), json!({"level": 2}));

        a.merge_from(b);

        assert_eq!(a.extra.len(), 3);
        assert_eq!(a.extra["location"], json!({"new": true}));
        assert_eq!(a.extra["theme"], json!({"dark": true}));
        assert_eq!(a.extra["badge"], json!({"level": 2}));
    }

    #[test]
    fn test_user_merge_shallow_override() {
        let mut user = User {
            wallet_address: Some("0xabc".to_string()),
            username: Some("alice".to_string()),
            app_world_id: None,
        };
        user.merge_from(User {
            wallet_address: None,
            username: Some("bob".to_string()),
            app_world_id: Some("b@c.d".to_string()),
        });

        assert_eq!(user.wallet_address.as_deref(), Some("0xabc"));
        assert_eq!(user.username.as_deref(), Some("bob"));
        assert_eq!(user.app_world_id.as_deref(), Some("b@c.d"));
    }
}
