use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Pipeline(#[from] mg_core::Error),

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("Invalid meme id: {0}")]
    InvalidId(String),

    #[error("Meme not found: {0}")]
    MemeNotFound(String),

    #[error("action_type is required")]
    MissingActionType,
}

/// Every failure is reported the same way: status 500 and `{"error": ...}`.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Error handling request: {}", self);

        let payload = Json(json!({ "error": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, payload).into_response()
    }
}
