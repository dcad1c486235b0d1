//! HTTP server bootstrap for the snapmint pin relay.
//!
//! This module wires together:
//! - configuration
//! - the pinning client (holder of the upstream credential pair)
//! - the Axum router with CORS and request tracing

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use crate::infra::{HttpPinningClient, PinningClient, PinningConfig};

/// Inbound payload cap: 10 MiB, enforced before the outbound call.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Relay configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server listen address.
    pub listen_addr: SocketAddr,
    /// Allowed cross-origin caller URL.
    pub allowed_origin: String,
    /// Inbound payload size cap in bytes.
    pub max_upload_bytes: usize,
    /// Upstream pinning service configuration.
    pub pinning: PinningConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Pinning credentials are not validated here; a missing pair only
    /// surfaces on the first upload attempt.
    pub fn from_env() -> Self {
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3001);

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let listen_addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .expect("Invalid listen address");

        let allowed_origin =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        Self {
            listen_addr,
            allowed_origin,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            pinning: PinningConfig::from_env(),
        }
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub pinning: Arc<dyn PinningClient>,
    pub max_upload_bytes: usize,
    pub gateway_host: String,
}

/// Start the relay server.
pub async fn run() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting snapmint relay v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env();
    info!("Configuration loaded");
    info!("  Listen address: {}", config.listen_addr);
    info!("  Allowed origin: {}", config.allowed_origin);
    info!("  Upload cap: {} bytes", config.max_upload_bytes);
    info!("  Pinning endpoint: {}", config.pinning.api_url);

    let gateway_host = config.pinning.gateway_host.clone();
    let state = AppState {
        pinning: Arc::new(HttpPinningClient::new(config.pinning.clone())),
        max_upload_bytes: config.max_upload_bytes,
        gateway_host,
    };

    let app = build_router(&config)?.with_state(state);

    info!("Starting HTTP server on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;

    info!("snapmint relay is ready to accept uploads");
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .init();
}

/// Build the relay router.
pub fn build_router(config: &Config) -> anyhow::Result<Router<AppState>> {
    let origin: HeaderValue = config
        .allowed_origin
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid CORS origin {:?}: {e}", config.allowed_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::exact(origin))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    // Framework limit sits above the relay's own cap so the handler can
    // reject oversize payloads with the canonical too-large error.
    Ok(Router::new()
        .nest("/api", crate::api::router())
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes * 2))
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Health check endpoint.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "snapmint relay is running".to_string(),
    })
}
