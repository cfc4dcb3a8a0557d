//! The three pipeline stages: URL check, download, response validation.
//!
//! Every stage reports failure as an [`ErrorKind`] value. Collaborator
//! failures are converted here and nowhere else.

use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, warn};

use super::payload::Payload;
use crate::core::Deferred;
use crate::errors::ErrorKind;
use crate::observability::SpanTimer;
use crate::transport::{Decoder, RawResponse, Transport};

/// Identifies a stage in log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageName {
    /// Synchronous URL pre-check.
    CheckUrl,
    /// Transport fetch.
    DownloadUrl,
    /// Content-type, status and body validation.
    ValidateResponse,
}

impl StageName {
    /// Returns the snake_case stage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CheckUrl => "check_url",
            Self::DownloadUrl => "download_url",
            Self::ValidateResponse => "validate_response",
        }
    }

    /// The error this stage fails with.
    #[must_use]
    pub const fn failure(self) -> ErrorKind {
        match self {
            Self::CheckUrl => ErrorKind::BadUrl,
            Self::DownloadUrl => ErrorKind::IoError,
            Self::ValidateResponse => ErrorKind::InvalidResponse,
        }
    }
}

impl std::fmt::Display for StageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks that `url` starts with `required_scheme`.
///
/// Pure and synchronous; runs before any asynchronous work is scheduled.
/// An empty `required_scheme` matches nothing.
pub fn check_url(url: &str, required_scheme: &str) -> Result<String, ErrorKind> {
    let scheme_len = required_scheme.len();
    let matches = scheme_len > 0
        && url.len() >= scheme_len
        && url.is_char_boundary(scheme_len)
        && url[..scheme_len].eq_ignore_ascii_case(required_scheme);

    if matches {
        debug!(stage = %StageName::CheckUrl, url, "URL accepted");
        Ok(url.to_string())
    } else {
        warn!(stage = %StageName::CheckUrl, url, required_scheme, "URL rejected");
        Err(StageName::CheckUrl.failure())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Fetches `url` through `transport`.
///
/// This is the only place transport faults are caught: an `Err` from the
/// transport and a panic inside it both resolve to [`ErrorKind::IoError`].
pub fn download_url(transport: Arc<dyn Transport>, url: String) -> Deferred<Result<RawResponse, ErrorKind>> {
    Deferred::new(async move {
        let timer = SpanTimer::start(StageName::DownloadUrl.as_str());
        let outcome = AssertUnwindSafe(async { transport.get(&url).await })
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(raw)) => {
                debug!(
                    stage = %StageName::DownloadUrl,
                    url = %url,
                    status = raw.status,
                    duration_ms = timer.finish(),
                    "Download completed"
                );
                Ok(raw)
            }
            Ok(Err(err)) => {
                warn!(stage = %StageName::DownloadUrl, url = %url, error = %err, "Download failed");
                Err(StageName::DownloadUrl.failure())
            }
            Err(panic) => {
                warn!(
                    stage = %StageName::DownloadUrl,
                    url = %url,
                    error = panic_message(panic.as_ref()),
                    "Transport panicked"
                );
                Err(StageName::DownloadUrl.failure())
            }
        }
    })
}

/// Validates a raw response and decodes its body.
///
/// Checks run in order: content type must be `application/json`, status
/// must be below 400, and the body must decode.
pub fn validate(decoder: &dyn Decoder, raw: RawResponse) -> Result<Payload, ErrorKind> {
    let stage = StageName::ValidateResponse;

    let content_type = match raw.content_type() {
        Some(ct) if raw.is_json() => ct,
        other => {
            warn!(stage = %stage, content_type = ?other, "Unexpected content type");
            return Err(stage.failure());
        }
    };

    if raw.is_error_status() {
        warn!(stage = %stage, status = raw.status, "Error status");
        return Err(stage.failure());
    }

    let body = decoder.decode(&raw.body, &content_type).map_err(|err| {
        warn!(stage = %stage, error = %err, "Body could not be decoded");
        stage.failure()
    })?;

    Ok(Payload {
        status: raw.status,
        body,
        headers: raw.headers,
    })
}

/// Deferred form of [`validate`], run when the chain reaches it.
pub fn validate_response(decoder: Arc<dyn Decoder>, raw: RawResponse) -> Deferred<Result<Payload, ErrorKind>> {
    Deferred::lazy(move || async move { validate(decoder.as_ref(), raw) })
}
