// Error types for calorie-advisor
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("No file provided: please upload a JPG or PNG image")]
    NoFileProvided,

    #[error("Unsupported content type: {0} (expected image/jpeg or image/png)")]
    UnsupportedContentType(String),

    #[error("Image too large: {size} bytes exceeds maximum of {max} bytes")]
    ImageTooLarge { size: usize, max: usize },

    /// The request body was cut off at the HTTP limit, so the size is unknown.
    #[error("Image too large: upload exceeds maximum of {max} bytes")]
    UploadTooLarge { max: usize },

    #[error("Inference unavailable: {0}")]
    InferenceUnavailable(String),

    #[error("Inference rejected: {0}")]
    InferenceRejected(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AdvisorError {
    /// Whether submitting the same image again could succeed.
    ///
    /// Only transport-level and upstream availability failures qualify;
    /// everything else needs different input or a fixed configuration.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AdvisorError::InferenceUnavailable(_))
    }

    /// Machine-readable kind used in the error envelope and metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            AdvisorError::NoFileProvided => "no_file_provided",
            AdvisorError::UnsupportedContentType(_) => "unsupported_content_type",
            AdvisorError::ImageTooLarge { .. }
            | AdvisorError::UploadTooLarge { .. }
            | AdvisorError::InvalidRequest(_) => "invalid_request_error",
            AdvisorError::InferenceUnavailable(_) => "inference_unavailable",
            AdvisorError::InferenceRejected(_) => "inference_rejected",
            AdvisorError::Config(_) | AdvisorError::ConfigParsing(_) => "configuration_error",
            _ => "internal_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AdvisorError::NoFileProvided | AdvisorError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AdvisorError::UnsupportedContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AdvisorError::ImageTooLarge { .. } | AdvisorError::UploadTooLarge { .. } => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            AdvisorError::InferenceUnavailable(_) => StatusCode::BAD_GATEWAY,
            AdvisorError::InferenceRejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Convert AdvisorError to HTTP responses for Axum
impl IntoResponse for AdvisorError {
    fn into_response(self) -> Response {
        let body = json!({
            "type": "error",
            "error": {
                "type": self.kind(),
                "message": self.to_string(),
                "retryable": self.is_retryable(),
            }
        });

        (self.status_code(), axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
