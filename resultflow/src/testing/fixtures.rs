//! Canned responses and end-to-end scenarios.

use crate::errors::{ErrorKind, TransportError};
use crate::pipeline::Payload;
use crate::transport::RawResponse;

use super::mocks::StaticTransport;

/// A JSON response with the given status and body.
#[must_use]
pub fn json_response(status: u16, body: &serde_json::Value) -> RawResponse {
    RawResponse::new(status)
        .with_content_type("application/json")
        .with_body(body.to_string())
}

/// A `200 OK` HTML page.
#[must_use]
pub fn html_response() -> RawResponse {
    RawResponse::new(200)
        .with_content_type("text/html; charset=utf-8")
        .with_body("<html><body>hello</body></html>")
}

/// The standard end-to-end cases every composition style must agree on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// The URL is not `https://`; the transport must never be called.
    NonHttpsUrl,
    /// The transport cannot reach the host.
    TransportFailure,
    /// The server answers with an HTML page.
    HtmlContent,
    /// The server answers `200` with a JSON body.
    JsonSuccess,
    /// The server answers `404` with a JSON body.
    JsonNotFound,
    /// The server declares JSON but sends something else.
    MalformedJson,
}

impl Scenario {
    /// Every scenario.
    pub const ALL: [Self; 6] = [
        Self::NonHttpsUrl,
        Self::TransportFailure,
        Self::HtmlContent,
        Self::JsonSuccess,
        Self::JsonNotFound,
        Self::MalformedJson,
    ];

    /// The URL the scenario fetches.
    #[must_use]
    pub const fn url(self) -> &'static str {
        match self {
            Self::NonHttpsUrl => "http://example.com",
            _ => "https://postman-echo.com/get?foo1=bar1&foo2=bar2",
        }
    }

    fn body() -> serde_json::Value {
        serde_json::json!({
            "args": {"foo1": "bar1", "foo2": "bar2"},
            "url": "https://postman-echo.com/get?foo1=bar1&foo2=bar2",
        })
    }

    /// The response the transport serves.
    #[must_use]
    pub fn response(self) -> Option<RawResponse> {
        match self {
            Self::NonHttpsUrl | Self::JsonSuccess => Some(json_response(200, &Self::body())),
            Self::TransportFailure => None,
            Self::HtmlContent => Some(html_response()),
            Self::JsonNotFound => Some(json_response(404, &serde_json::json!({"error": "not found"}))),
            Self::MalformedJson => Some(
                RawResponse::new(200)
                    .with_content_type("application/json")
                    .with_body("{\"args\": "),
            ),
        }
    }

    /// A fresh transport scripted for this scenario.
    #[must_use]
    pub fn transport(self) -> StaticTransport {
        match self.response() {
            Some(raw) => StaticTransport::responding(raw),
            None => StaticTransport::failing(TransportError::Request {
                url: String::new(),
                message: "dns error: failed to lookup address".to_string(),
            }),
        }
    }

    /// The outcome every composition style must resolve to.
    #[must_use]
    pub fn expected(self) -> Result<Payload, ErrorKind> {
        match self {
            Self::NonHttpsUrl => Err(ErrorKind::BadUrl),
            Self::TransportFailure => Err(ErrorKind::IoError),
            Self::HtmlContent | Self::JsonNotFound | Self::MalformedJson => Err(ErrorKind::InvalidResponse),
            Self::JsonSuccess => Ok(Payload::new(200, Self::body()).with_header("content-type", "application/json")),
        }
    }

    /// Expected number of transport calls for one run.
    #[must_use]
    pub const fn expected_transport_calls(self) -> usize {
        match self {
            Self::NonHttpsUrl => 0,
            _ => 1,
        }
    }
}
