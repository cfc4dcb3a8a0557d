//! Collaborator interfaces for fetching and decoding.
//!
//! The pipeline only talks to the network through [`Transport`] and only
//! interprets bodies through [`Decoder`], so both can be swapped for test
//! doubles.

#[cfg(feature = "http")]
mod http;

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::errors::{DecodeError, TransportError};

#[cfg(feature = "http")]
pub use http::HttpTransport;

/// Media type accepted by [`JsonDecoder`].
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A response as returned by a transport, before any validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers with lowercase names.
    pub headers: BTreeMap<String, String>,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Creates an empty response with the given status.
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    /// Adds a header. Names are stored lowercase.
    #[must_use]
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Sets the `content-type` header.
    #[must_use]
    pub fn with_content_type(self, content_type: impl Into<String>) -> Self {
        self.with_header("content-type", content_type)
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Media type of the body, without parameters, lowercase.
    ///
    /// `"Application/JSON; charset=utf-8"` yields `"application/json"`.
    #[must_use]
    pub fn content_type(&self) -> Option<String> {
        self.headers.get("content-type").map(|raw| {
            raw.split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase()
        })
    }

    /// Whether the body is declared as JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type().as_deref() == Some(JSON_CONTENT_TYPE)
    }

    /// Whether the status signals a client or server error.
    #[must_use]
    pub fn is_error_status(&self) -> bool {
        self.status >= 400
    }
}

/// Issues GET requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches `url`, returning the response whatever its status.
    ///
    /// Only failures to obtain a response are errors.
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError>;
}

/// Turns raw body bytes into structured data.
#[cfg_attr(test, mockall::automock)]
pub trait Decoder: Send + Sync {
    /// Decodes `body` declared with `content_type`.
    fn decode(&self, body: &[u8], content_type: &str) -> Result<serde_json::Value, DecodeError>;
}

/// Decodes `application/json` bodies with `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl Decoder for JsonDecoder {
    fn decode(&self, body: &[u8], content_type: &str) -> Result<serde_json::Value, DecodeError> {
        if content_type != JSON_CONTENT_TYPE {
            return Err(DecodeError::UnsupportedContentType(content_type.to_string()));
        }
        Ok(serde_json::from_slice(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_type_strips_parameters() {
        let raw = RawResponse::new(200).with_header("Content-Type", "Application/JSON; charset=utf-8");
        assert_eq!(raw.content_type().as_deref(), Some("application/json"));
        assert!(raw.is_json());
    }

    #[test]
    fn test_missing_content_type() {
        let raw = RawResponse::new(204);
        assert_eq!(raw.content_type(), None);
        assert!(!raw.is_json());
    }

    #[test]
    fn test_is_error_status() {
        assert!(!RawResponse::new(200).is_error_status());
        assert!(!RawResponse::new(399).is_error_status());
        assert!(RawResponse::new(400).is_error_status());
        assert!(RawResponse::new(503).is_error_status());
    }

    #[test]
    fn test_json_decoder_decodes() {
        let value = JsonDecoder
            .decode(br#"{"args": {"foo1": "bar1"}}"#, JSON_CONTENT_TYPE)
            .unwrap();
        assert_eq!(value, json!({"args": {"foo1": "bar1"}}));
    }

    #[test]
    fn test_json_decoder_rejects_other_types() {
        let err = JsonDecoder.decode(b"<html></html>", "text/html").unwrap_err();
        assert_eq!(err, DecodeError::UnsupportedContentType("text/html".to_string()));
    }

    #[test]
    fn test_json_decoder_rejects_malformed_body() {
        let err = JsonDecoder.decode(b"{\"open\": ", JSON_CONTENT_TYPE).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_mock_transport() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .times(1)
            .returning(|_| Ok(RawResponse::new(200)));

        let raw = transport.get("https://example.com").await.unwrap();
        assert_eq!(raw.status, 200);
    }
}
