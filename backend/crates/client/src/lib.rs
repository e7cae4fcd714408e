//! Mini-App Auth Client
//!
//! Embeddable session controller for applications that talk to the auth
//! endpoints from the user's side: it owns the cookie jar and an
//! in-memory mirror of the session, and drives the wallet sign-in
//! handshake, the identity-provider redirect URL, session augmentation,
//! cached geolocation, and payments.
//!
//! The wallet and the device geolocation are reached through the
//! [`bridge::WalletBridge`] and [`bridge::Geolocator`] traits so hosts
//! can plug in whatever runtime they embed in.

pub mod bridge;
pub mod controller;
pub mod error;
pub mod state;

pub use bridge::{Coordinates, Geolocator, PayCommand, Token, WalletAuthRequest, WalletBridge};
pub use controller::{ClientOptions, SessionController};
pub use error::{ClientError, ClientResult};
pub use state::AuthState;
