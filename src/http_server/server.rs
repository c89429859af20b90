//! # HTTP Server
//!
//! Combines the public and admin routers behind CORS and request tracing.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::admin_routes::admin_routes;
use super::config::HttpServerConfig;
use super::public_routes::public_routes;
use super::state::RopeState;

/// HTTP server for the rope tracker
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over the given state
    pub fn new(config: HttpServerConfig, state: Arc<RopeState>) -> Self {
        let router = build_router(&config, state);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.config.bind_addr().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        info!(event = "SERVER_STARTED", %addr, "rope tracker listening");

        axum::serve(listener, self.router).await
    }
}

/// Build the combined router with all endpoints
pub fn build_router(config: &HttpServerConfig, state: Arc<RopeState>) -> Router {
    Router::new()
        // Public pages, reachable from an NFC tag scan
        .merge(public_routes(state.clone()))
        // Operator panel
        .nest("/admin", admin_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(config.cors_layer())
}
