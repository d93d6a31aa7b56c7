use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Failure taxonomy for the HTTP surface.
///
/// Explicit existence checks surface as 404 with a descriptive message,
/// payload validation as 400, and everything else collapses into a generic
/// 500 with the detail kept in the server log.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("invalid request: {0}")]
    Validation(garde::Report),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, (*message).to_string()),
            ApiError::Validation(report) => {
                (StatusCode::BAD_REQUEST, format!("invalid request: {report}"))
            }
            ApiError::Database(err) => {
                tracing::error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
