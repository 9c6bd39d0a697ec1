use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Conversion pipeline errors with appropriate HTTP status codes
///
/// Every stage failure collapses to one of these variants. Details of
/// external failures (process exit codes, provider response bodies) are
/// logged where they occur and never leak into client messages.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Malformed request shape (missing fields, unparseable values)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Requested voice is not in the configured voice set
    #[error("Unknown voice '{0}'")]
    InvalidVoice(String),

    /// Speed multiplier outside the configured bounds
    #[error("Speed {0} is out of range")]
    InvalidSpeed(f64),

    /// Target format is not one of the supported set
    #[error("Unsupported output format '{0}'")]
    UnsupportedFormat(String),

    /// The uploaded document could not be read or parsed
    #[error("Text extraction failed: {0}")]
    Extraction(String),

    /// The synthesis backend was unreachable, timed out, or errored
    #[error("Speech synthesis unavailable: {0}")]
    SynthesisUnavailable(String),

    /// The transcoder failed to launch, exited nonzero, or timed out
    #[error("Audio transcoding failed: {0}")]
    TranscodeFailed(String),

    /// Unexpected internal error; details stay server-side
    #[error("Internal server error")]
    Internal(String),
}

impl ConvertError {
    /// Get the appropriate HTTP status code for this error
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidVoice(_) | Self::InvalidSpeed(_) | Self::UnsupportedFormat(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::SynthesisUnavailable(_) | Self::TranscodeFailed(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string for the response
    pub const fn error_type(&self) -> &str {
        match self {
            Self::InvalidRequest(_) | Self::InvalidVoice(_) | Self::InvalidSpeed(_) => "invalid_request_error",
            Self::UnsupportedFormat(_) => "unsupported_format_error",
            Self::Extraction(_) => "extraction_error",
            Self::SynthesisUnavailable(_) => "synthesis_error",
            Self::TranscodeFailed(_) => "transcode_error",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Message that is safe to expose to API consumers
    pub fn client_message(&self) -> String {
        match self {
            Self::Extraction(_) => "the uploaded document could not be parsed".to_string(),
            Self::SynthesisUnavailable(_) => "the speech synthesis backend could not complete the request".to_string(),
            Self::TranscodeFailed(_) => "audio transcoding failed".to_string(),
            Self::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

/// Error response format compatible with `OpenAI`-style APIs
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorDetails,
}

#[derive(Debug, Serialize)]
struct ErrorDetails {
    message: String,
    r#type: String,
    code: u16,
}

impl IntoResponse for ConvertError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.client_message();

        let error_response = ErrorResponse {
            error: ErrorDetails {
                message,
                r#type: self.error_type().to_string(),
                code: status.as_u16(),
            },
        };

        (status, Json(error_response)).into_response()
    }
}
