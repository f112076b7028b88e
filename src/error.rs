use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QrError {
    #[error("Failed to initialize QR decoder: {0}")]
    InitializationError(String),

    #[error("Failed to load image: {0}")]
    ImageLoad(String),

    #[error("Decoder failed: {0}")]
    DecodeError(String),

    #[error("Invalid selection: {0}")]
    InvalidRegion(String),

    #[error("Image too large: {size} bytes (max: {max} bytes)")]
    ImageTooLarge { size: usize, max: usize },

    #[error("Missing file in request")]
    MissingFile,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for QrError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            QrError::InitializationError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INIT_ERROR"),
            QrError::ImageLoad(_) => (StatusCode::BAD_REQUEST, "UNSUPPORTED_IMAGE"),
            QrError::DecodeError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DECODE_ERROR"),
            QrError::InvalidRegion(_) => (StatusCode::BAD_REQUEST, "INVALID_REGION"),
            QrError::ImageTooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, "IMAGE_TOO_LARGE"),
            QrError::MissingFile => (StatusCode::BAD_REQUEST, "MISSING_FILE"),
            QrError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            QrError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}
