//! API error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use pricer_portfolio::PortfolioError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON body returned for failed requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error kind, e.g. `InvalidInputError`
    pub error: String,
    /// Human readable description
    pub message: String,
}

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Portfolio(#[from] PortfolioError),

    #[error("Malformed request: {0}")]
    BadRequest(String),

    #[error("Pricing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    /// Stable error kind reported to clients.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Portfolio(err) => err.kind(),
            ApiError::BadRequest(_) => "InvalidInputError",
            ApiError::Task(_) => "InternalError",
        }
    }

    /// HTTP status for the error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Portfolio(_) | ApiError::BadRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Logs the error at a level matching who caused it.
    pub fn log(&self) {
        match self {
            ApiError::Portfolio(err) if !err.is_client_error() => {
                tracing::error!(kind = self.kind(), error = %self, "Pricing failed");
            }
            ApiError::Task(_) => {
                tracing::error!(kind = self.kind(), error = %self, "Pricing task failed");
            }
            _ => tracing::warn!(kind = self.kind(), error = %self, "Request rejected"),
        }
    }

    /// Response body for the error.
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.kind().to_string(),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portfolio_error_maps_to_422() {
        let err = ApiError::from(PortfolioError::InvalidInput("rate0 is empty".into()));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.kind(), "InvalidInputError");
        assert!(err.body().message.contains("rate0"));
    }

    #[test]
    fn test_bad_request_kind() {
        let err = ApiError::BadRequest("expected `rates`".into());
        assert_eq!(err.kind(), "InvalidInputError");
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
