//! Error types for webbind.
//!
//! Every failure aborts the single dispatch it occurred in and is returned to the
//! caller. Nothing here is retried.
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | [`BindError::MissingParameter`] | A URL pattern parameter has no binding |
//! | [`BindError::Configuration`] | No base URL, duplicate endpoint names |
//! | [`BindError::Authentication`] | Endpoint requires auth but has no credentials |
//! | [`BindError::Transport`] | The HTTP client failed |
//! | [`BindError::UnknownEndpoint`] | [`Api::call`](crate::Api::call) with an undeclared name |
//! | [`BindError::InvalidBody`] | A transform cannot encode the body |
//! | [`BindError::InvalidHeader`] | A header name or value is not valid HTTP |
//! | [`BindError::Json`] | JSON encoding/decoding failed inside a transform |

use thiserror::Error;

/// Result type for webbind operations.
pub type Result<T> = std::result::Result<T, BindError>;

/// Errors raised while building or dispatching API calls.
#[derive(Debug, Error)]
pub enum BindError {
    /// The pattern references a parameter that was not supplied.
    #[error("missing URL parameter: {name}")]
    MissingParameter {
        /// Name of the unbound parameter.
        name: String,
    },

    /// The endpoint or API is not configured well enough to dispatch.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Authentication is required but was never established.
    #[error("authentication error: {0}")]
    Authentication(String),

    /// The HTTP client failed to complete the request.
    #[error("transport error: {0}")]
    Transport(String),

    /// No endpoint with this name is declared on the API.
    #[error("unknown endpoint: {name}")]
    UnknownEndpoint {
        /// The requested endpoint name.
        name: String,
    },

    /// A request transform could not encode the body.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// A header name or value could not be used.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// JSON serialization or parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BindError {
    /// Create a missing parameter error.
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        BindError::MissingParameter { name: name.into() }
    }

    /// Wrap a transport failure, keeping its message verbatim.
    pub fn transport(err: impl std::fmt::Display) -> Self {
        BindError::Transport(err.to_string())
    }

    /// Whether the failure happened before any network traffic was attempted.
    pub fn is_client_side(&self) -> bool {
        !matches!(self, BindError::Transport(_) | BindError::Json(_))
    }
}

impl From<reqwest::Error> for BindError {
    fn from(err: reqwest::Error) -> Self {
        BindError::transport(err)
    }
}

impl From<http::header::InvalidHeaderName> for BindError {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        BindError::InvalidHeader(err.to_string())
    }
}

impl From<http::header::InvalidHeaderValue> for BindError {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        BindError::InvalidHeader(err.to_string())
    }
}
