//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors go through
//! `miniauth::AuthError`.

use axum::{
    Router, http,
    http::{Method, header},
};
use miniauth::infra::{TokenEndpointExchanger, VerifierGateway};
use miniauth::{AuthConfig, NoopEvents, auth_router};
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn env_secs(name: &str) -> Option<std::time::Duration> {
    let secs: u64 = env::var(name).ok()?.parse().ok()?;
    Some(std::time::Duration::from_secs(secs))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,miniauth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Identity-provider credentials
    let client_id = env::var("WLD_CLIENT_ID").expect("WLD_CLIENT_ID must be set in environment");
    let client_secret =
        env::var("WLD_CLIENT_SECRET").expect("WLD_CLIENT_SECRET must be set in environment");
    let server_base_url =
        env::var("WLD_SERVER").unwrap_or_else(|_| "http://localhost:31113".to_string());
    let redirect_uri = env::var("WLD_REDIRECT_URI")
        .unwrap_or_else(|_| format!("{server_base_url}/api/miniauth/callback"));
    let verifier_base_url = env::var("WLD_VERIFIER_URL")
        .unwrap_or_else(|_| "https://developer.worldcoin.org/api/v2/minikit".to_string());

    let base = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        AuthConfig::default()
    };

    let mut config = AuthConfig {
        client_id,
        client_secret,
        redirect_uri,
        server_base_url,
        ..base
    };
    if let Some(secs) = env_secs("SESSION_MAX_AGE_SECS") {
        config.session_max_age = secs;
    }
    if let Some(secs) = env_secs("LOCATION_MAX_AGE_SECS") {
        config.location_max_age = secs;
    }

    // Outbound HTTP client shared by both gateways
    let http_client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?;

    let exchanger = Arc::new(TokenEndpointExchanger::new(
        http_client.clone(),
        Arc::new(config.clone()),
    ));
    let verifier = Arc::new(VerifierGateway::new(http_client, verifier_base_url));

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest(
            "/api/miniauth",
            auth_router(
                verifier.clone(),
                verifier,
                exchanger,
                Arc::new(NoopEvents),
                config,
            ),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 31113));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
