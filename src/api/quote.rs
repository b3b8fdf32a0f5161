//! Quote fetching: invoke the quote function and normalize its response.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::client::QuoteClient;
use crate::error::Result;
use crate::types::quote::{QuoteResponse, TickerRequest};

/// Anything that can answer a [`TickerRequest`] with a chain document.
///
/// [`QuoteClient`] is the production implementation; tests substitute
/// in-process fakes.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch and normalize the quote for one ticker.
    async fn fetch_quote(&self, req: &TickerRequest) -> Result<QuoteResponse>;
}

#[async_trait]
impl<T: QuoteSource + ?Sized> QuoteSource for Arc<T> {
    async fn fetch_quote(&self, req: &TickerRequest) -> Result<QuoteResponse> {
        (**self).fetch_quote(req).await
    }
}

#[async_trait]
impl QuoteSource for QuoteClient {
    async fn fetch_quote(&self, req: &TickerRequest) -> Result<QuoteResponse> {
        let raw = self.invoke(req).await?;
        decode_quote(&raw)
    }
}

/// Decode a raw quote payload.
///
/// When the decoded document carries a gateway-style `body`, that body is
/// the real document: a non-empty string is decoded a second time, an object
/// is used as is.
pub fn decode_quote(raw: &[u8]) -> Result<QuoteResponse> {
    let mut doc: Value = serde_json::from_slice(raw)?;
    match doc.get_mut("body").map(Value::take) {
        Some(Value::String(body)) if !body.is_empty() => {
            tracing::debug!("unwrapping gateway envelope");
            doc = serde_json::from_str(&body)?;
        }
        Some(inner @ Value::Object(_)) => doc = inner,
        _ => {}
    }
    Ok(serde_json::from_value(doc)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CollectorError;
    use serde_json::json;

    const CHAIN: &str = r#"{"data":{"lastTrade":"$217.12 +1.2","table":{"rows":[{"c_Volume":"1,000","p_Volume":"20"}]}}}"#;

    #[test]
    fn plain_document() {
        let quote = decode_quote(CHAIN.as_bytes()).unwrap();
        assert_eq!(quote.last_price(), 217.12);
        assert_eq!(quote.rows().len(), 1);
    }

    #[test]
    fn string_envelope_is_decoded_twice() {
        let raw = json!({"statusCode": 200, "body": CHAIN}).to_string();
        let quote = decode_quote(raw.as_bytes()).unwrap();
        assert_eq!(quote.last_price(), 217.12);
        assert_eq!(quote.rows().len(), 1);
    }

    #[test]
    fn object_envelope_is_used_directly() {
        let raw = json!({"body": {"data": {"lastTrade": "$3.50"}}}).to_string();
        let quote = decode_quote(raw.as_bytes()).unwrap();
        assert_eq!(quote.last_price(), 3.5);
        assert!(quote.rows().is_empty());
    }

    #[test]
    fn malformed_envelope_body_fails() {
        let raw = json!({"body": "{not json"}).to_string();
        assert!(matches!(
            decode_quote(raw.as_bytes()),
            Err(CollectorError::Json(_))
        ));
    }

    #[test]
    fn malformed_payload_fails() {
        assert!(decode_quote(b"<html>").is_err());
    }
}
