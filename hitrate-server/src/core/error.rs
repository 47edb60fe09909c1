use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Main error type for hitrate operations
#[derive(Debug, Error)]
pub enum HitrateError {
    #[error("Cache key must not be empty")]
    InvalidKey,

    #[error("Data source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl HitrateError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidKey => StatusCode::BAD_REQUEST,
            Self::SourceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Implement IntoResponse for Axum integration
impl IntoResponse for HitrateError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.to_string(),
            "code": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

/// Result type alias for hitrate operations
pub type Result<T> = std::result::Result<T, HitrateError>;
