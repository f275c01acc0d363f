//! Portfolio pricing endpoint
//!
//! `POST /api/v1/portfolio` prices the standard portfolio against a curve
//! built from the posted quotes.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    routing::post,
    Router,
};
use pricer_core::types::Date;
use pricer_portfolio::PortfolioReport;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;

/// Request body of the pricing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioRequest {
    /// Annual rate quotes in percent, 1Y first
    pub rates: Vec<f64>,
    /// Valuation date; the server's valuation date when omitted
    #[serde(default)]
    pub valuation_date: Option<Date>,
}

/// Build the pricing routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/v1/portfolio", post(price_portfolio))
}

/// POST /api/v1/portfolio - Price the portfolio
async fn price_portfolio(
    State(state): State<AppState>,
    payload: Result<Json<PortfolioRequest>, JsonRejection>,
) -> Result<Json<PortfolioReport>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let valuation = request
        .valuation_date
        .unwrap_or_else(|| state.config.valuation_date());

    tracing::info!(
        quotes = request.rates.len(),
        valuation_date = %valuation,
        "Pricing request"
    );

    let report = state.price(valuation, request.rates).await?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorBody;
    use crate::routes::test_support::state;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn post(body: &str) -> (StatusCode, Vec<u8>) {
        let router = routes().with_state(state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/portfolio")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_baseline_rates_return_three_rows() {
        let (status, body) = post(r#"{"rates": [5.0, 5.1, 5.2, 5.3, 5.4]}"#).await;
        assert_eq!(status, StatusCode::OK);

        let report: PortfolioReport = serde_json::from_slice(&body).unwrap();
        assert_eq!(report.valuation_date, Date::from_ymd(2025, 1, 2).unwrap());
        let types: Vec<_> = report.rows.iter().map(|r| r.instrument_type.as_str()).collect();
        assert_eq!(types, ["Swap", "European Swaption", "Bermudan Swaption"]);
        assert!(report.npv_of("Bermudan Swaption") >= report.npv_of("European Swaption"));
    }

    #[tokio::test]
    async fn test_explicit_valuation_date() {
        let (status, body) =
            post(r#"{"rates": [4.0, 4.5], "valuation_date": "2024-06-14"}"#).await;
        assert_eq!(status, StatusCode::OK);

        let report: PortfolioReport = serde_json::from_slice(&body).unwrap();
        assert_eq!(report.valuation_date.to_string(), "2024-06-14");
    }

    #[tokio::test]
    async fn test_empty_rates_rejected() {
        let (status, body) = post(r#"{"rates": []}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let err: ErrorBody = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.error, "InvalidInputError");
    }

    #[tokio::test]
    async fn test_non_numeric_rate_rejected() {
        let (status, body) = post(r#"{"rates": [5.0, "abc"]}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let err: ErrorBody = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.error, "InvalidInputError");
    }

    #[tokio::test]
    async fn test_inverted_curve_is_calibration_error() {
        let (status, body) = post(r#"{"rates": [9.0, 1.0, 1.0]}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let err: ErrorBody = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.error, "CurveCalibrationError");
    }

    #[tokio::test]
    async fn test_pricing_route_is_post_only() {
        let router = routes().with_state(state());
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1/portfolio")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
