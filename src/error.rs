use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the HTTP handlers. Each variant picks its own status and body shape.
#[derive(Debug, Error)]
pub enum AppError {
    /// Client sent something the mock service refuses; body is `{"error": ..}`.
    #[error("{0}")]
    InvalidUpload(String),

    /// Anything that went wrong while analyzing; body is `{"detail": ..}`.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::InvalidUpload(msg) => json!({ "error": msg }),
            // {:#} keeps the anyhow context chain on one line
            AppError::Internal(e) => json!({ "detail": format!("{:#}", e) }),
        };
        (status, Json(body)).into_response()
    }
}
