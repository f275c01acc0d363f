//! Server startup and binding
//!
//! Provides functionality to start the Axum server with configurable host/port.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use pricer_portfolio::{PortfolioConfig, PortfolioError, PortfolioPricer};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::routes::{self, AppState};

/// Server instance that can be started
pub struct Server {
    /// Server configuration
    config: Arc<ServerConfig>,
    /// The built router
    router: Router,
}

impl Server {
    /// Create a new server instance pricing with `portfolio`.
    ///
    /// # Errors
    ///
    /// Returns an error if the portfolio configuration is invalid.
    pub fn new(config: ServerConfig, portfolio: PortfolioConfig) -> Result<Self, PortfolioError> {
        let config = Arc::new(config);
        let pricer = Arc::new(PortfolioPricer::new(portfolio)?);
        let router = routes::build_router(AppState::new(config.clone(), pricer));

        Ok(Self { config, router })
    }

    /// Get the configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Run the server
    ///
    /// Binds to the configured host/port and serves requests until Ctrl-C.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let listener =
            TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;
        self.run_with_listener(listener).await
    }

    /// Run the server with a specific listener
    ///
    /// This is useful for testing where you want to use a listener bound to port 0
    /// to get a random available port.
    pub async fn run_with_listener(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr: SocketAddr = listener.local_addr()?;
        tracing::info!(%addr, "Server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutdown signal received");
    }
}
