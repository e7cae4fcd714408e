//! Device Capabilities
//!
//! Interfaces to the host environment: the wallet bridge (signed
//! statements, user lookup, payments) and the device geolocation sensor.
//! Implementations belong to the embedding application.

use chrono::{DateTime, Duration, Utc};
use miniauth::models::{User, WalletAuthPayload};
use serde::Serialize;

use crate::error::ClientResult;

/// Wallet-auth request the bridge turns into a signed statement
#[derive(Debug, Clone)]
pub struct WalletAuthRequest {
    /// Challenge the statement must bind
    pub nonce: String,
    pub request_id: String,
    /// Statement validity window
    pub expiration_time: DateTime<Utc>,
    pub not_before: DateTime<Utc>,
    /// Human-readable statement shown to the user
    pub statement: String,
}

impl WalletAuthRequest {
    /// Standard request: valid from 24h ago to 7 days out
    pub fn for_nonce(nonce: impl Into<String>, statement: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            nonce: nonce.into(),
            request_id: "0".to_string(),
            expiration_time: now + Duration::days(7),
            not_before: now - Duration::days(1),
            statement: statement.into(),
        }
    }
}

/// Tokens the pay action can transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Wld,
    Usdc,
}

impl Token {
    pub fn symbol(&self) -> &'static str {
        match self {
            Token::Wld => "WLD",
            Token::Usdc => "USDC",
        }
    }

    /// On-chain decimal places for amount conversion
    fn decimals(&self) -> u32 {
        match self {
            Token::Wld => 18,
            Token::Usdc => 6,
        }
    }

    /// Convert a human amount to the smallest on-chain unit
    pub fn to_decimals(&self, amount: f64) -> String {
        let scaled = amount * 10f64.powi(self.decimals() as i32);
        format!("{:.0}", scaled)
    }
}

/// One token leg of a payment
#[derive(Debug, Clone, Serialize)]
pub struct TokenAmount {
    pub symbol: String,
    pub token_amount: String,
}

/// Payment command forwarded to the wallet bridge
#[derive(Debug, Clone, Serialize)]
pub struct PayCommand {
    pub to: String,
    pub reference: String,
    pub tokens: Vec<TokenAmount>,
    pub description: String,
}

impl PayCommand {
    pub fn transfer(recipient: impl Into<String>, token: Token, amount: f64) -> Self {
        Self {
            to: recipient.into(),
            reference: "0".to_string(),
            tokens: vec![TokenAmount {
                symbol: token.symbol().to_string(),
                token_amount: token.to_decimals(amount),
            }],
            description: format!("Sending {}", token.symbol()),
        }
    }
}

/// Wallet bridge capability
#[trait_variant::make(WalletBridge: Send)]
pub trait LocalWalletBridge {
    /// Whether the bridge is available in this environment
    fn is_installed(&self) -> bool;

    /// Ask the wallet to sign a statement binding the request's nonce.
    /// May fail, or be rejected by the user.
    async fn wallet_auth(&self, request: WalletAuthRequest) -> ClientResult<WalletAuthPayload>;

    /// Resolve the username/profile behind an address
    async fn user_by_address(&self, address: &str) -> ClientResult<User>;

    /// Execute a payment; returns the wallet's final payload verbatim
    async fn pay(&self, command: PayCommand) -> ClientResult<serde_json::Value>;
}

/// Geographic coordinates from the device sensor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Device geolocation capability
///
/// `current_position` may suspend indefinitely behind a permission
/// prompt; the controller imposes no timeout.
#[trait_variant::make(Geolocator: Send)]
pub trait LocalGeolocator {
    async fn current_position(&self) -> ClientResult<Coordinates>;
}
