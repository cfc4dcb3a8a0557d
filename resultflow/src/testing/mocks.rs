//! Scripted collaborators for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::errors::{DecodeError, TransportError};
use crate::transport::{Decoder, JsonDecoder, RawResponse, Transport};

/// A transport that answers every request with the same outcome.
#[derive(Debug)]
pub struct StaticTransport {
    outcome: Mutex<Result<RawResponse, TransportError>>,
    call_count: AtomicUsize,
    urls: Mutex<Vec<String>>,
}

impl StaticTransport {
    /// Creates a transport that returns `raw` for every request.
    #[must_use]
    pub fn responding(raw: RawResponse) -> Self {
        Self::with_outcome(Ok(raw))
    }

    /// Creates a transport that fails every request with `error`.
    #[must_use]
    pub fn failing(error: TransportError) -> Self {
        Self::with_outcome(Err(error))
    }

    /// Creates a transport that fails every request as unreachable.
    #[must_use]
    pub fn unreachable() -> Self {
        Self::failing(TransportError::Request {
            url: String::new(),
            message: "connection refused".to_string(),
        })
    }

    fn with_outcome(outcome: Result<RawResponse, TransportError>) -> Self {
        Self {
            outcome: Mutex::new(outcome),
            call_count: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        }
    }

    /// Replaces the scripted outcome.
    pub fn set_outcome(&self, outcome: Result<RawResponse, TransportError>) {
        *self.outcome.lock() = outcome;
    }

    /// Returns the number of requests received.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Returns the requested URLs in order.
    #[must_use]
    pub fn requested_urls(&self) -> Vec<String> {
        self.urls.lock().clone()
    }

    /// Resets call tracking.
    pub fn reset(&self) {
        self.call_count.store(0, Ordering::SeqCst);
        self.urls.lock().clear();
    }
}

#[async_trait]
impl Transport for StaticTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().push(url.to_string());
        match &*self.outcome.lock() {
            Ok(raw) => Ok(raw.clone()),
            Err(TransportError::Request { message, .. }) => Err(TransportError::Request {
                url: url.to_string(),
                message: message.clone(),
            }),
            Err(err) => Err(err.clone()),
        }
    }
}

/// Wraps a transport and appends `transport:start`/`transport:end` events
/// to a shared log, yielding in between.
#[derive(Debug)]
pub struct RecordingTransport<T> {
    inner: T,
    log: Arc<Mutex<Vec<String>>>,
}

impl<T> RecordingTransport<T> {
    /// Wraps `inner`, logging into `log`.
    pub fn new(inner: T, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self { inner, log }
    }

    /// Returns the wrapped transport.
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: Transport> Transport for RecordingTransport<T> {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        self.log.lock().push("transport:start".to_string());
        tokio::task::yield_now().await;
        let outcome = self.inner.get(url).await;
        self.log.lock().push("transport:end".to_string());
        outcome
    }
}

/// A transport that sleeps before delegating.
#[derive(Debug)]
pub struct SlowTransport<T> {
    inner: T,
    delay: Duration,
}

impl<T> SlowTransport<T> {
    /// Creates a slow transport.
    pub fn new(inner: T, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Creates a slow transport with delay in milliseconds.
    pub fn with_delay_ms(inner: T, ms: u64) -> Self {
        Self::new(inner, Duration::from_millis(ms))
    }
}

#[async_trait]
impl<T: Transport> Transport for SlowTransport<T> {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        tokio::time::sleep(self.delay).await;
        self.inner.get(url).await
    }
}

/// A JSON decoder that counts its calls and optionally logs `decode`.
#[derive(Debug, Default)]
pub struct CountingDecoder {
    call_count: AtomicUsize,
    log: Option<Arc<Mutex<Vec<String>>>>,
}

impl CountingDecoder {
    /// Creates a counting decoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a counting decoder that also appends to `log`.
    #[must_use]
    pub fn logging(log: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            call_count: AtomicUsize::new(0),
            log: Some(log),
        }
    }

    /// Returns the number of decode calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Decoder for CountingDecoder {
    fn decode(&self, body: &[u8], content_type: &str) -> Result<serde_json::Value, DecodeError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Some(log) = &self.log {
            log.lock().push("decode".to_string());
        }
        JsonDecoder.decode(body, content_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_transport_counts_calls() {
        let transport = StaticTransport::responding(RawResponse::new(204));
        transport.get("https://a.example.com").await.unwrap();
        transport.get("https://b.example.com").await.unwrap();

        assert_eq!(transport.call_count(), 2);
        assert_eq!(
            transport.requested_urls(),
            vec!["https://a.example.com", "https://b.example.com"]
        );

        transport.reset();
        assert_eq!(transport.call_count(), 0);
        assert!(transport.requested_urls().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_reports_requested_url() {
        let transport = StaticTransport::unreachable();
        let err = transport.get("https://example.com").await.unwrap_err();
        assert_eq!(
            err,
            TransportError::Request {
                url: "https://example.com".to_string(),
                message: "connection refused".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_set_outcome() {
        let transport = StaticTransport::unreachable();
        transport.set_outcome(Ok(RawResponse::new(200)));
        assert_eq!(transport.get("https://x").await, Ok(RawResponse::new(200)));
    }

    #[tokio::test]
    async fn test_recording_transport_logs_events() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let transport = RecordingTransport::new(StaticTransport::responding(RawResponse::new(200)), log.clone());
        transport.get("https://example.com").await.unwrap();

        assert_eq!(*log.lock(), vec!["transport:start", "transport:end"]);
        assert_eq!(transport.inner().call_count(), 1);
    }

    #[tokio::test]
    async fn test_slow_transport_waits() {
        let transport = SlowTransport::with_delay_ms(StaticTransport::responding(RawResponse::new(200)), 20);
        let started = tokio::time::Instant::now();
        transport.get("https://example.com").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_counting_decoder() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let decoder = CountingDecoder::logging(log.clone());
        assert!(decoder.decode(b"{}", "application/json").is_ok());
        assert!(decoder.decode(b"{}", "text/plain").is_err());
        assert_eq!(decoder.call_count(), 2);
        assert_eq!(log.lock().len(), 2);
    }
}
