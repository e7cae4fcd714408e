//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::session::User;
use crate::domain::verifier::WalletAuthPayload;

// ============================================================================
// Nonce
// ============================================================================

/// Nonce issuance response
#[derive(Debug, Clone, Serialize)]
pub struct NonceResponse {
    pub nonce: String,
}

// ============================================================================
// Complete SIWE
// ============================================================================

/// Proof submission request
#[derive(Debug, Clone, Deserialize)]
pub struct CompleteSiweRequest {
    pub payload: WalletAuthPayload,
    pub nonce: String,
    pub user: User,
}

/// Error body for a rejected proof submission
///
/// Wire shape the browser side branches on:
/// `{"status":"error","isValid":false,"message":"Invalid nonce"}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiweErrorResponse {
    pub status: String,
    pub is_valid: bool,
    pub message: String,
}

impl SiweErrorResponse {
    pub fn invalid_nonce() -> Self {
        Self {
            status: "error".to_string(),
            is_valid: false,
            message: "Invalid nonce".to_string(),
        }
    }
}

// ============================================================================
// Augmentation
// ============================================================================

/// Session augmentation request
#[derive(Debug, Clone, Deserialize)]
pub struct AugmentRequest {
    pub key: String,
    /// A JSON object attaches, null (or absent) detaches; anything else
    /// is rejected with 400
    #[serde(default)]
    pub data: serde_json::Value,
}

// ============================================================================
// Logout / Callback
// ============================================================================

/// Logout response
#[derive(Debug, Clone, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Identity-provider callback query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
}
