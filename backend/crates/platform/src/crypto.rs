//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use uuid::Uuid;

/// Generate a URL-safe, hyphen-free challenge token
///
/// UUIDv4 in simple form: 32 lowercase hex characters, safe to embed
/// in cookies and signed statements without escaping.
pub fn nonce_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Decode a base64url segment (padding optional)
///
/// JWT payload segments are base64url without padding; some providers
/// pad anyway, so both forms are accepted.
pub fn base64url_decode(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::URL_SAFE_NO_PAD
        .decode(s.trim_end_matches('='))
        .or_else(|_| general_purpose::URL_SAFE.decode(s))
}

/// Build an `Authorization: Basic` header value from client credentials
pub fn basic_auth_value(client_id: &str, client_secret: &str) -> String {
    let credentials = format!("{client_id}:{client_secret}");
    format!("Basic {}", general_purpose::STANDARD.encode(credentials))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonce_token_shape() {
        let nonce = nonce_token();
        assert_eq!(nonce.len(), 32);
        assert!(!nonce.contains('-'));
        assert!(nonce.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_nonce_token_unique() {
        assert_ne!(nonce_token(), nonce_token());
    }

    #[test]
    fn test_base64url_decode_unpadded() {
        // {"sub":"x"} without padding
        let decoded = base64url_decode("eyJzdWIiOiJ4In0").unwrap();
        assert_eq!(decoded, br#"{"sub":"x"}"#);
    }

    #[test]
    fn test_base64url_decode_padded() {
        let decoded = base64url_decode("eyJzdWIiOiJ4In0=").unwrap();
        assert_eq!(decoded, br#"{"sub":"x"}"#);
    }

    #[test]
    fn test_basic_auth_value() {
        // base64("id:secret")
        assert_eq!(basic_auth_value("id", "secret"), "Basic aWQ6c2VjcmV0");
    }
}
