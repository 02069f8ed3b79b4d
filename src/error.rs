use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("bad_input")]
    BadInput,

    #[error("forbidden")]
    Forbidden,

    #[error("rate_limited")]
    RateLimited,

    #[error("store_error")]
    Store(#[from] sqlx::Error),
}

impl AppError {
    /// Short machine-readable code returned to the client. Store failures
    /// collapse to a generic code so internal detail never leaves the server.
    fn code(&self) -> &'static str {
        match self {
            AppError::BadInput => "bad_input",
            AppError::Forbidden => "forbidden",
            AppError::RateLimited => "rate_limited",
            AppError::Store(_) => "store_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::BadInput => StatusCode::BAD_REQUEST,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::Store(ref e) => {
                error!("score store failure: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "ok": false, "error": self.code() }))).into_response()
    }
}
