use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Every failure a handler can surface. Conversions cover the layers below;
/// anything that maps to 500 answers a generic body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid email or password")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("database: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("storage: {0}")]
    Io(#[from] std::io::Error),

    #[error("multipart: {0}")]
    Multipart(#[from] MultipartError),

    #[error("password hash: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("blocking task: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        use ApiError as E;
        use StatusCode as SC;
        match self {
            E::BadRequest(_) | E::Multipart(_) => SC::BAD_REQUEST,
            E::Unauthorized => SC::UNAUTHORIZED,
            E::NotFound(_) => SC::NOT_FOUND,
            E::Database(_) | E::Io(_) | E::Hash(_) | E::Join(_) => SC::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("request failed: {self}");
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
