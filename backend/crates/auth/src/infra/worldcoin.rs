//! Worldcoin Integrations
//!
//! Concrete capability clients: the identity provider's token endpoint
//! and an HTTP verifier gateway for deployments that delegate SIWE and
//! orb-verification checks to a sidecar service.

use serde::Deserialize;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::verifier::{
    CodeExchanger, SiweVerification, SiweVerifier, VerificationLookup, WalletAuthPayload,
};
use crate::error::{AuthError, AuthResult};

/// Authorization-code exchanger against the provider's token endpoint
///
/// Server-to-server POST with Basic-auth client credentials and a
/// form-encoded body, returning the raw `id_token`.
#[derive(Clone)]
pub struct TokenEndpointExchanger {
    http: reqwest::Client,
    config: Arc<AuthConfig>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    id_token: String,
}

impl TokenEndpointExchanger {
    pub fn new(http: reqwest::Client, config: Arc<AuthConfig>) -> Self {
        Self { http, config }
    }
}

impl CodeExchanger for TokenEndpointExchanger {
    async fn exchange_code(&self, code: &str) -> AuthResult<String> {
        let form = [
            ("code", code),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];

        let response = self
            .http
            .post(&self.config.token_endpoint)
            .header(
                "Authorization",
                platform::crypto::basic_auth_value(
                    &self.config.client_id,
                    &self.config.client_secret,
                ),
            )
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuthError::ExchangeFailed(format!(
                "token endpoint returned status: {}",
                response.status()
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::ExchangeFailed(format!("malformed token response: {e}")))?;

        Ok(body.id_token)
    }
}

/// HTTP verifier gateway
///
/// POSTs the opaque proof payload to `{base_url}/verify-siwe` and reads
/// orb status from `{base_url}/is-verified/{address}`.
#[derive(Clone)]
pub struct VerifierGateway {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct IsVerifiedResponse {
    #[serde(rename = "isVerified")]
    is_verified: bool,
}

impl VerifierGateway {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

impl SiweVerifier for VerifierGateway {
    async fn verify_siwe(
        &self,
        payload: &WalletAuthPayload,
        nonce: &str,
    ) -> AuthResult<SiweVerification> {
        let url = format!("{}/verify-siwe", self.base_url.trim_end_matches('/'));
        let body = serde_json::json!({ "payload": payload, "nonce": nonce });

        let response = self.http.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(AuthError::Internal(format!(
                "verifier returned status: {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }
}

impl VerificationLookup for VerifierGateway {
    async fn is_orb_verified(&self, wallet_address: &str) -> AuthResult<bool> {
        let url = format!(
            "{}/is-verified/{}",
            self.base_url.trim_end_matches('/'),
            wallet_address
        );

        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(AuthError::Internal(format!(
                "verification lookup returned status: {}",
                response.status()
            )));
        }

        let body: IsVerifiedResponse = response.json().await?;
        Ok(body.is_verified)
    }
}
