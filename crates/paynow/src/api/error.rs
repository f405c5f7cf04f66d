//! Paynow API error types
//!
//! # Error Handling
//!
//! The Paynow API uses standard HTTP response codes. Rejected requests usually
//! carry a structured body:
//!
//! ```json
//! {
//!   "statusCode": 400,
//!   "errors": [
//!     { "errorType": "VALIDATION_ERROR", "field": "amount", "message": "must be positive" }
//!   ]
//! }
//! ```
//!
//! Every failure of an outbound call surfaces as a single [`GatewayError`]
//! wrapped in [`Error::Gateway`]. Nothing is retried by this crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Paynow client error
#[derive(Debug, Error)]
pub enum Error {
    /// Outbound API call failed
    #[error("Paynow gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Notification body is not JSON or does not match the expected shape
    #[error("Malformed notification: {0}")]
    MalformedNotification(String),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Client could not be configured
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Gateway failure details, if this is an outbound call error
    pub fn as_gateway(&self) -> Option<&GatewayError> {
        match self {
            Error::Gateway(e) => Some(e),
            _ => None,
        }
    }
}

/// Failure of an outbound call to Paynow
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Paynow rejected the request with field-level errors
    #[error("{}", format_validation_errors(.errors))]
    Validation {
        /// HTTP status code
        status: u16,
        /// Errors reported by Paynow
        errors: Vec<ValidationError>,
    },

    /// Non-2xx response without structured detail
    #[error("Request failed with HTTP status {0}")]
    Status(u16),

    /// No response within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Connection or protocol failure
    #[error("Network error: {0}")]
    Network(String),
}

impl GatewayError {
    /// HTTP status code, when a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Validation { status, .. } => Some(*status),
            GatewayError::Status(status) => Some(*status),
            GatewayError::Timeout | GatewayError::Network(_) => None,
        }
    }

    /// Check if this is a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, GatewayError::Timeout)
    }

    /// Map a transport failure
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout
        } else {
            GatewayError::Network(err.to_string())
        }
    }

    /// Map a non-2xx response body
    ///
    /// Falls back to the bare status code when the body carries no error list.
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<PaynowApiError>(body) {
            Ok(api_error) if !api_error.errors.is_empty() => GatewayError::Validation {
                status,
                errors: api_error.errors,
            },
            _ => GatewayError::Status(status),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Gateway(GatewayError::from_transport(err))
    }
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ValidationError::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Error response body returned by Paynow
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaynowApiError {
    /// HTTP status code echoed in the body
    #[serde(default)]
    pub status_code: Option<u16>,
    /// Reported errors
    #[serde(default)]
    pub errors: Vec<ValidationError>,
}

/// Single error entry from a Paynow error response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{}", self.describe())]
pub struct ValidationError {
    /// Field the error refers to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Error category (e.g. `VALIDATION_ERROR`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Human-readable message
    pub message: String,
}

impl ValidationError {
    fn describe(&self) -> String {
        match (&self.field, &self.error_type) {
            (Some(field), _) => format!("{}: {}", field, self.message),
            (None, Some(error_type)) => format!("{}: {}", error_type, self.message),
            (None, None) => self.message.clone(),
        }
    }
}
