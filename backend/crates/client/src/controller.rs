//! Session Controller
//!
//! The browser-side counterpart of the auth endpoints: holds the owned
//! auth state, drives the handshake calls, and exposes derived actions.
//! The HTTP client's cookie jar carries the session cookie between calls;
//! the in-memory state is a read-only mirror updated after each round
//! trip.

use chrono::Utc;
use serde_json::json;
use std::time::Duration;
use uuid::Uuid;

use miniauth::models::{LocationEntry, Session};

use crate::bridge::{Geolocator, PayCommand, Token, WalletAuthRequest, WalletBridge};
use crate::error::{ClientError, ClientResult};
use crate::state::AuthState;

/// Extra key under which the location cache lives
const LOCATION_KEY: &str = "location";

/// Controller configuration
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Server origin, e.g. `https://app.example.com`
    pub base_url: String,
    /// Auth route prefix on the server
    pub auth_prefix: String,
    /// TTL for cached location entries
    pub location_max_age: Duration,
    /// Identity provider client id (redirect flow)
    pub client_id: String,
    /// Redirect URI registered with the identity provider
    pub redirect_uri: String,
    /// Identity provider authorize endpoint
    pub authorize_endpoint: String,
    /// Statement the wallet asks the user to sign
    pub statement: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            auth_prefix: "/api/miniauth".to_string(),
            location_max_age: Duration::from_secs(3600),
            client_id: String::new(),
            redirect_uri: String::new(),
            authorize_endpoint: "https://id.worldcoin.org/authorize".to_string(),
            statement: "This is my statement and here is a link https://worldcoin.com/apps"
                .to_string(),
        }
    }
}

/// Session controller
pub struct SessionController<W, G>
where
    W: WalletBridge,
    G: Geolocator,
{
    http: reqwest::Client,
    options: ClientOptions,
    wallet: W,
    geolocator: G,
    state: AuthState,
}

impl<W, G> SessionController<W, G>
where
    W: WalletBridge,
    G: Geolocator,
{
    pub fn new(options: ClientOptions, wallet: W, geolocator: G) -> ClientResult<Self> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;

        Ok(Self {
            http,
            options,
            wallet,
            geolocator,
            state: AuthState::default(),
        })
    }

    /// Read-only view of the auth state mirror
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Probe the wallet bridge, then hydrate the mirror from the server
    pub async fn init(&mut self) {
        let installed = self.wallet.is_installed();
        self.state.mark_initialized(installed);

        if let Err(e) = self.refresh_session().await {
            e.log();
        }
    }

    /// GET /session and mirror the result
    pub async fn refresh_session(&mut self) -> ClientResult<Option<Session>> {
        let response = self.http.get(self.url("/session")).send().await;

        let session = match response {
            Ok(res) if res.status().is_success() => res.json::<Session>().await.ok(),
            Ok(_) => None,
            Err(e) => {
                self.state.set_session(None);
                return Err(ClientError::Http(e));
            }
        };

        let session = session.filter(Session::is_present);
        self.state.set_session(session.clone());
        Ok(session)
    }

    /// Wallet-signature sign-in handshake
    ///
    /// nonce -> signed statement -> username lookup -> proof submission.
    /// Every failure path resets the mirror to unauthenticated; there is
    /// no retry.
    pub async fn sign_in_wallet(&mut self) -> ClientResult<Session> {
        if !self.state.is_installed() {
            return Err(ClientError::NotInstalled);
        }

        self.state.set_loading(true);
        let result = self.sign_in_wallet_inner().await;
        match result {
            Ok(session) => {
                self.state.set_session(Some(session.clone()));
                self.state.set_loading(false);
                Ok(session)
            }
            Err(e) => {
                self.state.reset_auth();
                e.log();
                Err(e)
            }
        }
    }

    async fn sign_in_wallet_inner(&self) -> ClientResult<Session> {
        #[derive(serde::Deserialize)]
        struct NonceBody {
            nonce: String,
        }

        let NonceBody { nonce } = self
            .http
            .get(self.url("/nonce"))
            .send()
            .await?
            .json()
            .await?;

        let request = WalletAuthRequest::for_nonce(&nonce, &self.options.statement);
        let payload = self.wallet.wallet_auth(request).await?;

        if payload.status == "error" {
            return Err(ClientError::SignInFailed);
        }

        let user = self.wallet.user_by_address(&payload.address).await?;

        let body = json!({
            "payload": payload,
            "nonce": nonce,
            "user": user,
        });

        let value: serde_json::Value = self
            .http
            .post(self.url("/complete-siwe"))
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        // The server answers with the session, or null / an error body
        // when the proof was rejected
        serde_json::from_value::<Session>(value)
            .ok()
            .filter(Session::is_present)
            .ok_or(ClientError::SignInFailed)
    }

    /// Build the identity-provider authorize URL for the redirect flow
    ///
    /// The embedder performs the full-page navigation; nothing in this
    /// process continues past it.
    pub fn world_id_authorize_url(
        &self,
        state: Option<&str>,
        nonce: Option<&str>,
    ) -> ClientResult<reqwest::Url> {
        let nonce = nonce
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let mut params = vec![
            ("redirect_uri", self.options.redirect_uri.clone()),
            ("response_type", "code".to_string()),
            ("response_mode", "query".to_string()),
            ("nonce", nonce),
            ("scope", "openid profile email".to_string()),
            ("client_id", self.options.client_id.clone()),
        ];
        if let Some(state) = state {
            params.push(("state", state.to_string()));
        }

        reqwest::Url::parse_with_params(&self.options.authorize_endpoint, &params)
            .map_err(|_| ClientError::RedirectFailed)
    }

    /// Sign out: the mirror is reset before the network call, and the
    /// delete still counts locally even if the call fails
    pub async fn sign_out(&mut self) -> ClientResult<()> {
        self.state.reset_auth();

        self.http
            .post(self.url("/logout"))
            .json(&json!({}))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    /// Attach (or detach, with `None`) a keyed blob to the session
    pub async fn augment_session(
        &mut self,
        key: &str,
        data: Option<serde_json::Value>,
    ) -> ClientResult<Option<Session>> {
        let response = self
            .http
            .post(self.url("/augment"))
            .json(&json!({ "key": key, "data": data }))
            .send()
            .await?
            .error_for_status()?;

        let session = response
            .json::<Session>()
            .await
            .ok()
            .filter(Session::is_present);

        if session.is_some() {
            self.state.set_session(session.clone());
        }

        Ok(session)
    }

    /// Device location with session-persisted caching
    ///
    /// A fresh cached entry short-circuits without touching the device or
    /// the network. Device failures are cached too, time-boxed, so the
    /// sensor isn't hammered inside the TTL window.
    pub async fn get_location(&mut self, force: bool) -> LocationEntry {
        let now = Utc::now();
        let valid_until = now
            + chrono::Duration::from_std(self.options.location_max_age)
                .unwrap_or_else(|_| chrono::Duration::hours(1));

        let Some(session) = self.state.session() else {
            return LocationEntry::failure("not authenticated", valid_until);
        };

        if !force {
            let cached = session
                .extra
                .get(LOCATION_KEY)
                .and_then(|v| serde_json::from_value::<LocationEntry>(v.clone()).ok());
            if let Some(entry) = cached {
                if entry.is_fresh(now) {
                    return entry;
                }
            }
        }

        let entry = match self.geolocator.current_position().await {
            Ok(coords) => LocationEntry::fix(coords.latitude, coords.longitude, valid_until),
            Err(e) => LocationEntry::failure(e.to_string(), valid_until),
        };

        match serde_json::to_value(&entry) {
            Ok(value) => {
                if let Err(e) = self.augment_session(LOCATION_KEY, Some(value)).await {
                    e.log();
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Location entry serialization failed");
            }
        }

        entry
    }

    /// Send tokens via the wallet bridge
    pub async fn pay(
        &self,
        recipient: &str,
        token: Token,
        amount: f64,
    ) -> ClientResult<serde_json::Value> {
        let command = PayCommand::transfer(recipient, token, amount);
        self.wallet.pay(command).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.options.base_url, self.options.auth_prefix, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::Coordinates;
    use miniauth::models::{User, WalletAuthPayload};

    struct StubWallet;

    impl WalletBridge for StubWallet {
        fn is_installed(&self) -> bool {
            false
        }

        async fn wallet_auth(
            &self,
            _request: WalletAuthRequest,
        ) -> ClientResult<WalletAuthPayload> {
            Err(ClientError::NotInstalled)
        }

        async fn user_by_address(&self, _address: &str) -> ClientResult<User> {
            Err(ClientError::NotInstalled)
        }

        async fn pay(&self, _command: PayCommand) -> ClientResult<serde_json::Value> {
            Err(ClientError::NotInstalled)
        }
    }

    struct StubGeolocator;

    impl Geolocator for StubGeolocator {
        async fn current_position(&self) -> ClientResult<Coordinates> {
            Err(ClientError::FailedException)
        }
    }

    fn controller(options: ClientOptions) -> SessionController<StubWallet, StubGeolocator> {
        SessionController::new(options, StubWallet, StubGeolocator).expect("controller")
    }

    #[test]
    fn test_authorize_url_carries_oidc_params() {
        let c = controller(ClientOptions {
            client_id: "app_123".to_string(),
            redirect_uri: "https://app.example.com/api/miniauth/callback".to_string(),
            ..ClientOptions::default()
        });

        let url = c
            .world_id_authorize_url(Some("st"), Some("my-nonce"))
            .unwrap();

        assert_eq!(url.host_str(), Some("id.worldcoin.org"));
        let pairs: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs["response_type"], "code");
        assert_eq!(pairs["response_mode"], "query");
        assert_eq!(pairs["nonce"], "my-nonce");
        assert_eq!(pairs["scope"], "openid profile email");
        assert_eq!(pairs["client_id"], "app_123");
        assert_eq!(pairs["state"], "st");
        assert_eq!(
            pairs["redirect_uri"],
            "https://app.example.com/api/miniauth/callback"
        );
    }

    #[test]
    fn test_authorize_url_generates_nonce_when_absent() {
        let c = controller(ClientOptions::default());

        let url = c.world_id_authorize_url(None, None).unwrap();
        let pairs: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert!(!pairs["nonce"].is_empty());
        assert!(!pairs.contains_key("state"));
    }

    #[tokio::test]
    async fn test_sign_in_requires_installed_wallet() {
        let mut c = controller(ClientOptions::default());
        c.state.mark_initialized(false);

        let err = c.sign_in_wallet().await.unwrap_err();
        assert!(matches!(err, ClientError::NotInstalled));
    }
}
