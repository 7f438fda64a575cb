/// Server error types
use axum::{
    extract::multipart::MultipartError,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use melodia_core::MelodiaError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error(transparent)]
    Catalog(#[from] MelodiaError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for ServerError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ServerError::PayloadTooLarge(err.body_text())
        } else {
            ServerError::BadRequest(err.body_text())
        }
    }
}

fn fail(status: StatusCode, message: String) -> (StatusCode, serde_json::Value) {
    (status, json!({ "status": "fail", "message": message }))
}

fn internal(message: &str) -> (StatusCode, serde_json::Value) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "status": "error", "message": message }),
    )
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ServerError::Unauthorized(msg) => fail(StatusCode::UNAUTHORIZED, msg),
            ServerError::BadRequest(msg) => fail(StatusCode::BAD_REQUEST, msg),
            ServerError::PayloadTooLarge(msg) => fail(StatusCode::PAYLOAD_TOO_LARGE, msg),
            ServerError::Catalog(MelodiaError::Invariant(msg)) => {
                fail(StatusCode::BAD_REQUEST, msg)
            }
            ServerError::Catalog(e @ MelodiaError::NotFound { .. }) => {
                fail(StatusCode::NOT_FOUND, e.to_string())
            }
            ServerError::Catalog(ref e) => {
                tracing::error!("Catalog error: {:?}", e);
                internal("Internal server error")
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                internal("Configuration error")
            }
            ServerError::Io(ref e) => {
                tracing::error!("IO error: {:?}", e);
                internal("IO error")
            }
        };

        (status, Json(body)).into_response()
    }
}
