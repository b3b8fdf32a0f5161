//! HTTP client for the quote-fetch function.
//!
//! The [`QuoteClient`] struct wraps [`reqwest::Client`] and knows how to
//! invoke the quote function with a `queryStringParameters` payload. The
//! quote-specific decoding lives in [`crate::api::quote`].

use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::Serialize;

use crate::error::{ApiErrorBody, CollectorError, Result};

/// Invocation payload wrapper expected by the quote function.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Invocation<'a, P: Serialize> {
    query_string_parameters: &'a P,
}

/// HTTP client for the quote function endpoint.
///
/// # Example
///
/// ```no_run
/// use options_volume_logger::client::QuoteClient;
///
/// # fn main() -> options_volume_logger::error::Result<()> {
/// let client = QuoteClient::new("https://quotes.example.com/")?;
/// assert_eq!(client.endpoint(), "https://quotes.example.com");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct QuoteClient {
    http: reqwest::Client,
    endpoint: String,
}

impl QuoteClient {
    /// Create a client for the given function endpoint.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        url::Url::parse(&endpoint)?;
        let http = reqwest::Client::builder()
            .default_headers(Self::default_headers())
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_owned(),
        })
    }

    /// Returns the function endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Invoke the function and return the raw response payload.
    ///
    /// Non-success statuses are mapped to [`CollectorError::Api`] when the
    /// body carries a function error, or [`CollectorError::HttpStatus`].
    pub async fn invoke<P: Serialize>(&self, params: &P) -> Result<bytes::Bytes> {
        tracing::debug!(endpoint = %self.endpoint, "POST invoke");

        let resp = self
            .http
            .post(&self.endpoint)
            .json(&Invocation {
                query_string_parameters: params,
            })
            .send()
            .await?;

        let status = resp.status();
        let bytes = resp.bytes().await?;

        if status.is_success() {
            Ok(bytes)
        } else {
            let body = String::from_utf8_lossy(&bytes);
            Err(parse_error_body(status, &body))
        }
    }

    /// Default headers applied to every request.
    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }
}

/// Try to parse the function's JSON error structure; fall back to a raw HTTP
/// status error.
pub(crate) fn parse_error_body(status: reqwest::StatusCode, body: &str) -> CollectorError {
    if let Ok(api_err) = serde_json::from_str::<ApiErrorBody>(body) {
        if api_err.error_type.is_some() || api_err.error_message.is_some() {
            return CollectorError::Api(api_err);
        }
    }
    CollectorError::HttpStatus {
        status,
        body: body.to_owned(),
    }
}
