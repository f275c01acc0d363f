//! Route modules for the pricer server
//!
//! This module contains endpoint group-specific routers:
//! - blotter: HTML form for editing quotes and viewing the report
//! - pricing: JSON portfolio pricing endpoint
//! - health: Health check and monitoring endpoints

pub mod blotter;
pub mod health;
pub mod pricing;

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use pricer_core::types::Date;
use pricer_portfolio::{PortfolioPricer, PortfolioReport};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::ApiError;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Portfolio pricer shared by all requests
    pub pricer: Arc<PortfolioPricer>,
    /// Server start time for uptime calculation
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Arc<ServerConfig>, pricer: Arc<PortfolioPricer>) -> Self {
        Self {
            config,
            pricer,
            start_time: Instant::now(),
        }
    }

    /// Prices the portfolio on the blocking pool.
    pub async fn price(&self, valuation: Date, quotes: Vec<f64>) -> Result<PortfolioReport, ApiError> {
        let pricer = Arc::clone(&self.pricer);
        let report =
            tokio::task::spawn_blocking(move || pricer.price(valuation, &quotes)).await??;
        Ok(report)
    }
}

/// Build the main application router by merging all route modules
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(blotter::routes())
        .merge(pricing::routes())
        .merge(health::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}


#[cfg(test)]
mod tests {
    use super::test_support::state;
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_router_merges_all_route_groups() {
        let router = build_router(state());

        let response = router
            .clone()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/portfolio")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"rates": [5.0, 5.1, 5.2, 5.3, 5.4]}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_returns_404() {
        let router = build_router(state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/unknown/path")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_state_prices_off_the_runtime() {
        let state = state();
        let report = state
            .price(test_support::valuation(), vec![5.0, 5.1, 5.2, 5.3, 5.4])
            .await
            .unwrap();
        assert_eq!(report.len(), 3);

        let err = state
            .price(test_support::valuation(), vec![])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "InvalidInputError");
    }
}
