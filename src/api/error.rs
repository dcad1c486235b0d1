//! Structured API error responses for the pin relay
//!
//! Every failure body carries a human-readable `error` plus a stable,
//! machine-readable `code`; upstream detail rides along in `message`.
//! Credential values never appear in any response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::infra::MinterError;

/// Stable error codes for relay responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No image file in the request (missing or empty field)
    NoFileProvided,
    /// Declared media type is not an image
    UnsupportedMediaType,
    /// Payload exceeds the inbound size cap
    FileTooLarge,
    /// Multipart body could not be read
    InvalidRequestBody,
    /// Pinning service rejected the relay's credentials
    PinningAuthFailed,
    /// Pinning service rejected the upload as malformed
    PinningRejected,
    /// Pinning service unreachable or failed unexpectedly
    UpstreamUnavailable,
    /// Internal server error
    InternalError,
}

impl ErrorCode {
    /// HTTP status for this code. Upstream auth failure is the relay's
    /// own service error: the caller cannot fix it, the deployment can.
    pub fn http_status(&self) -> StatusCode {
        match self {
            ErrorCode::NoFileProvided => StatusCode::BAD_REQUEST,
            ErrorCode::UnsupportedMediaType => StatusCode::BAD_REQUEST,
            ErrorCode::FileTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorCode::InvalidRequestBody => StatusCode::BAD_REQUEST,
            ErrorCode::PinningAuthFailed => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::PinningRejected => StatusCode::BAD_REQUEST,
            ErrorCode::UpstreamUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NoFileProvided => "NO_FILE_PROVIDED",
            ErrorCode::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
            ErrorCode::FileTooLarge => "FILE_TOO_LARGE",
            ErrorCode::InvalidRequestBody => "INVALID_REQUEST_BODY",
            ErrorCode::PinningAuthFailed => "PINNING_AUTH_FAILED",
            ErrorCode::PinningRejected => "PINNING_REJECTED",
            ErrorCode::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error summary
    pub error: String,
    /// Stable machine-readable code
    pub code: ErrorCode,
    /// Raw upstream message, when one is available and safe to expose
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiError {
    pub fn new(code: ErrorCode, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.code.http_status()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code.as_str();
        let mut response = (status, Json(self)).into_response();

        if let Ok(value) = axum::http::HeaderValue::from_str(code) {
            response.headers_mut().insert(
                axum::http::header::HeaderName::from_static("x-error-code"),
                value,
            );
        }
        response
    }
}

impl From<MinterError> for ApiError {
    fn from(err: MinterError) -> Self {
        match err {
            MinterError::MissingFile => {
                ApiError::new(ErrorCode::NoFileProvided, "No image file provided")
            }
            MinterError::UnsupportedMediaType(mime) => {
                ApiError::new(ErrorCode::UnsupportedMediaType, "Only image files are allowed")
                    .with_message(mime)
            }
            MinterError::FileTooLarge { size, limit } => ApiError::new(
                ErrorCode::FileTooLarge,
                format!("File too large. Max size is {}MB.", limit / (1024 * 1024)),
            )
            .with_message(format!("received {size} bytes")),
            MinterError::ImageDecode(msg) => {
                ApiError::new(ErrorCode::InvalidRequestBody, "Unreadable image data")
                    .with_message(msg)
            }
            MinterError::PinningAuth => ApiError::new(
                ErrorCode::PinningAuthFailed,
                "Pinning service authentication failed. Check API keys.",
            ),
            MinterError::PinningRejected(msg) => {
                ApiError::new(ErrorCode::PinningRejected, "Invalid file or pinning request")
                    .with_message(msg)
            }
            MinterError::PinningUnavailable(msg) => {
                ApiError::new(ErrorCode::UpstreamUnavailable, "Upload failed").with_message(msg)
            }
            other => {
                ApiError::new(ErrorCode::InternalError, "Internal error")
                    .with_message(other.to_string())
            }
        }
    }
}
