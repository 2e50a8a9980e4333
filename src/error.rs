use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use blog_core::BlogError;
use serde_json::json;
use tracing::error;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    /// The content API failed or returned data we could not use.
    Upstream(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Upstream(err) => {
                error!("Upstream error: {:#}", err);
                (
                    StatusCode::BAD_GATEWAY,
                    "Content service unavailable".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<BlogError> for AppError {
    fn from(err: BlogError) -> Self {
        match err {
            BlogError::UnknownPost(uid) => AppError::NotFound(format!("Post not found: {}", uid)),
            other => AppError::Upstream(anyhow::Error::from(other)),
        }
    }
}
