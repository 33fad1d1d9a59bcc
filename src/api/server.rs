//! Party Printout API server implementation
//!
//! HTTP server using Axum. Holds the current upload session and serves the
//! rendered printout and its downloadable document.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use crate::session::Session;

const BYTES_PER_MB: usize = 1024 * 1024;

/// API Server configuration
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted upload body, in bytes
    pub max_upload_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_upload_bytes: 20 * BYTES_PER_MB,
        }
    }
}

impl ApiConfig {
    /// Upload limit in bytes for a size given in megabytes, capped at `usize::MAX`
    pub fn upload_limit_from_mb(megabytes: usize) -> usize {
        megabytes.saturating_mul(BYTES_PER_MB)
    }
}

/// Shared application state
pub struct AppState {
    pub version: String,
    pub session: Mutex<Session>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            session: Mutex::new(Session::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the router with all endpoints and middleware
pub fn build_router(state: Arc<AppState>, config: &ApiConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/version", get(handlers::version))
        .route("/api/v1/upload", post(handlers::upload))
        .route("/api/v1/printout", get(handlers::printout))
        .route("/api/v1/reset", post(handlers::reset))
        .route("/api/v1/export", get(handlers::export))
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run the API server
pub async fn run_api_server(config: ApiConfig) -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "party_printout=info,tower_http=info".into()),
        )
        .try_init();

    let state = Arc::new(AppState::new());
    let app = build_router(state, &config);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("🎉 Party Printout server starting on http://{}", addr);
    info!("   Endpoints: /api/v1/upload, /api/v1/printout, /api/v1/reset, /api/v1/export");
    info!("   Health: /health, Version: /version");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Party Printout server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server...");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_upload_bytes, 20 * 1024 * 1024);
    }

    #[test]
    fn test_upload_limit_from_mb() {
        assert_eq!(ApiConfig::upload_limit_from_mb(20), 20 * 1024 * 1024);
        assert_eq!(ApiConfig::upload_limit_from_mb(0), 0);
        assert_eq!(ApiConfig::upload_limit_from_mb(usize::MAX), usize::MAX);
        assert_eq!(ApiConfig::upload_limit_from_mb(usize::MAX / 1024), usize::MAX);
    }

    #[test]
    fn test_config_address_format() {
        let config = ApiConfig {
            host: "192.168.1.100".to_string(),
            port: 9090,
            ..ApiConfig::default()
        };
        let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse().unwrap();
        assert_eq!(addr.port(), 9090);
    }

    #[test]
    fn test_app_state_starts_idle() {
        let state = AppState::new();
        assert_eq!(state.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(state.session.try_lock().unwrap().state().name(), "idle");
    }
}
