//! Error types for the `options-volume-logger` crate.
//!
//! All fallible operations in this crate return [`Result<T>`], which is an
//! alias for `std::result::Result<T, CollectorError>`.
//!
//! [`CollectorError`] covers:
//! - **API errors**: structured error bodies returned by the quote function
//! - **HTTP status errors**: unexpected status codes with response body
//! - **HTTP transport errors**: network, TLS, timeout failures
//! - **JSON errors**: decode failures of quote payloads or stored logs
//! - **Object store errors**: GET/PUT/HEAD failures against the bucket
//! - **Invalid logs**: a stored object that is not a JSON array
//! - **Configuration errors**: missing or malformed environment settings

use std::fmt;

/// Error body returned by the quote function when it rejects a request.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    /// Category of the error (e.g. "Runtime.HandlerError").
    #[serde(default)]
    pub error_type: Option<String>,
    /// Human-readable description of the error.
    #[serde(default)]
    pub error_message: Option<String>,
}

impl fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            self.error_type.as_deref().unwrap_or("Unknown Error"),
            self.error_message.as_deref().unwrap_or("No message"),
        )
    }
}

/// All possible errors produced by the collector.
#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    /// An error response returned by the quote function.
    #[error("API error: {0}")]
    Api(ApiErrorBody),

    /// The quote endpoint returned an unexpected HTTP status code.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code.
        status: reqwest::StatusCode,
        /// The response body text.
        body: String,
    },

    /// A network or transport-level error from `reqwest`.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to decode or encode JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An object-store operation failed.
    #[error("object store error: {0}")]
    Store(#[from] object_store::Error),

    /// An error building or parsing a URL.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// A stored log object does not hold a JSON array.
    #[error("invalid log at {key}: {reason}")]
    InvalidLog {
        /// Object key of the log.
        key: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Missing or malformed configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CollectorError>;
