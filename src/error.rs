//! Error types: fatal startup errors and per-request errors with their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

/// A single malformed or missing request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Failure to load one of the startup artifacts. Always fatal.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("feature schema is empty")]
    EmptySchema,

    #[error("feature schema lists column `{0}` more than once")]
    DuplicateColumn(String),

    #[error("business threshold {0} is outside [0, 1]")]
    ThresholdOutOfRange(f64),

    #[error("unsupported model format: {0} (expected .onnx or .json)")]
    UnsupportedModelFormat(PathBuf),

    #[error("model coefficient `{0}` does not name a schema column")]
    UnknownCoefficient(String),

    #[error("ONNX runtime error: {0}")]
    Onnx(String),
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body fields missing or of the wrong type
    #[error("request validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Request body is not a JSON object
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// Classifier failed to score a vector
    #[error("inference failed: {0}")]
    Inference(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            AppError::Inference(_)
            | AppError::Config(_)
            | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::MalformedBody(_) => "MALFORMED_BODY",
            AppError::Inference(_) => "INFERENCE_ERROR",
            AppError::Config(_) => "CONFIGURATION_ERROR",
            AppError::Io(_) => "IO_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(
                error_code,
                status_code = status.as_u16(),
                message = %message,
                "Request error"
            );
        } else {
            tracing::warn!(
                error_code,
                status_code = status.as_u16(),
                message = %message,
                "Request rejected"
            );
        }

        let details = match self {
            AppError::Validation(fields) => fields,
            _ => Vec::new(),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
                "status": status.as_u16(),
                "details": details,
            }
        }));

        (status, body).into_response()
    }
}
