//! Rendering a finished pipeline outcome.
//!
//! The pipeline never renders implicitly: a caller hands the final `Result`
//! to [`render`] (or builds the chain with
//! [`Pipeline::fetch_and_present`](crate::pipeline::Pipeline::fetch_and_present)),
//! which routes success and failure to different presenter methods.

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::core::ResultExt;
use crate::errors::ErrorKind;
use crate::pipeline::Payload;

/// Renders pipeline outcomes.
pub trait Presenter: Send + Sync {
    /// Renders a successful payload.
    fn success(&self, payload: &Payload);

    /// Renders a failure.
    fn failure(&self, error: ErrorKind);
}

/// Routes `outcome` to the presenter and returns it unchanged.
pub fn render(outcome: Result<Payload, ErrorKind>, presenter: &dyn Presenter) -> Result<Payload, ErrorKind> {
    outcome
        .tap(|payload| presenter.success(payload))
        .tap_error(|err| presenter.failure(*err))
}

/// Formats a payload as indented JSON.
#[must_use]
pub fn format_payload(payload: &Payload) -> String {
    serde_json::to_string_pretty(&payload.to_json()).unwrap_or_else(|_| format!("{payload:?}"))
}

/// Prints payloads as indented JSON and errors by name to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn success(&self, payload: &Payload) {
        println!("{}", format_payload(payload));
    }

    fn failure(&self, error: ErrorKind) {
        println!("{error}");
    }
}

/// Reports outcomes through `tracing` instead of stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingPresenter;

impl Presenter for LoggingPresenter {
    fn success(&self, payload: &Payload) {
        info!(status = payload.status, body = %payload.body, "Fetched payload");
    }

    fn failure(&self, error: ErrorKind) {
        warn!(error = %error, "Fetch failed");
    }
}

/// One call received by a [`CollectingPresenter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// `success` was called with this payload.
    Success(Payload),
    /// `failure` was called with this error.
    Failure(ErrorKind),
}

/// A presenter that records every call, for tests.
#[derive(Debug, Default)]
pub struct CollectingPresenter {
    rendered: Mutex<Vec<Rendered>>,
}

impl CollectingPresenter {
    /// Creates an empty collecting presenter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything rendered so far, in call order.
    #[must_use]
    pub fn rendered(&self) -> Vec<Rendered> {
        self.rendered.lock().clone()
    }

    /// Returns the number of render calls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rendered.lock().len()
    }

    /// Returns true if nothing has been rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rendered.lock().is_empty()
    }
}

impl Presenter for CollectingPresenter {
    fn success(&self, payload: &Payload) {
        self.rendered.lock().push(Rendered::Success(payload.clone()));
    }

    fn failure(&self, error: ErrorKind) {
        self.rendered.lock().push(Rendered::Failure(error));
    }
}
