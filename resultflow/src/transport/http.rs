//! `reqwest`-backed transport.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::BTreeMap;

use super::{RawResponse, Transport};
use crate::config::TransportConfig;
use crate::errors::{ResultflowError, TransportError};

/// Fetches URLs over HTTP(S) with a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: TransportConfig,
}

impl HttpTransport {
    /// Builds a client from the configuration.
    pub fn new(config: TransportConfig) -> Result<Self, ResultflowError> {
        let timeout = config.timeout()?;
        let mut headers = HeaderMap::new();
        for (key, value) in &config.headers {
            let invalid = |message: String| ResultflowError::config(format!("transport.headers.{key}"), message);
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| invalid(e.to_string()))?;
            let value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| ResultflowError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Gets the configuration.
    #[must_use]
    pub const fn config(&self) -> &TransportConfig {
        &self.config
    }
}

fn request_error(url: &str, err: &reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout {
            url: url.to_string(),
        }
    } else {
        TransportError::Request {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| request_error(url, &e))?;

        let status = response.status().as_u16();
        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                request_error(url, &e)
            } else {
                TransportError::Body {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        tracing::debug!(url, status, bytes = body.len(), "Response received");

        Ok(RawResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}
