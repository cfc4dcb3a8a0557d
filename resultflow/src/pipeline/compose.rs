//! Wiring the stages into a pipeline.
//!
//! The same three stages can be composed two ways, and both must resolve to
//! the same `Result` for the same input:
//!
//! - [`Pipeline::fetch_with_transformer`] lifts every stage into a
//!   [`FutureResult`] and chains them with `bind`.
//! - [`Pipeline::fetch_manually`] chains plain [`Deferred`] values and
//!   branches on each `Result` by hand.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

use super::payload::Payload;
use super::stages;
use crate::config::ResultflowConfig;
use crate::core::{Deferred, FutureResult, ResultExt};
use crate::errors::{ErrorKind, ResultflowError};
use crate::observability::SpanTimer;
use crate::present::Presenter;
use crate::transport::{Decoder, JsonDecoder, RawResponse, Transport};

/// How a pipeline run composes its stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositionStyle {
    /// Stages lifted into `FutureResult` and chained with `bind`.
    #[default]
    Transformer,
    /// Stages chained as `Deferred` values with manual branching.
    Manual,
}

impl CompositionStyle {
    /// Both styles.
    pub const ALL: [Self; 2] = [Self::Transformer, Self::Manual];

    /// Returns the snake_case style name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transformer => "transformer",
            Self::Manual => "manual",
        }
    }
}

/// Fetch-and-validate pipeline over a transport and a decoder.
///
/// Cloning is cheap; each run builds its own chain and shares nothing but
/// the collaborators.
#[derive(Clone)]
pub struct Pipeline {
    transport: Arc<dyn Transport>,
    decoder: Arc<dyn Decoder>,
    required_scheme: String,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("required_scheme", &self.required_scheme)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Creates a pipeline that decodes JSON and requires `https://`.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            decoder: Arc::new(JsonDecoder),
            required_scheme: ResultflowConfig::default().required_scheme,
        }
    }

    /// Creates a pipeline using the configured URL prefix.
    ///
    /// Fails if `config` does not pass [`ResultflowConfig::validate`].
    pub fn from_config(transport: Arc<dyn Transport>, config: &ResultflowConfig) -> Result<Self, ResultflowError> {
        config.validate()?;
        Ok(Self::new(transport).with_required_scheme(config.required_scheme.clone()))
    }

    /// Replaces the decoder.
    #[must_use]
    pub fn with_decoder(mut self, decoder: Arc<dyn Decoder>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Sets the prefix the URL check requires. An empty prefix rejects every URL.
    #[must_use]
    pub fn with_required_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.required_scheme = scheme.into();
        self
    }

    /// Gets the required URL prefix.
    #[must_use]
    pub fn required_scheme(&self) -> &str {
        &self.required_scheme
    }

    /// Stage 1: the synchronous URL check.
    pub fn check_url(&self, url: &str) -> Result<String, ErrorKind> {
        stages::check_url(url, &self.required_scheme)
    }

    /// Stage 2: the transport fetch.
    pub fn download_url(&self, url: String) -> Deferred<Result<RawResponse, ErrorKind>> {
        stages::download_url(Arc::clone(&self.transport), url)
    }

    /// Stage 3: response validation and decoding.
    pub fn validate_response(&self, raw: RawResponse) -> Deferred<Result<Payload, ErrorKind>> {
        stages::validate_response(Arc::clone(&self.decoder), raw)
    }

    /// Deferred URL check; runs on first poll.
    fn checked_url(&self, url: &str) -> Deferred<Result<String, ErrorKind>> {
        let checker = self.clone();
        let url = url.to_string();
        Deferred::lazy(move || async move { checker.check_url(&url) })
    }

    /// Composes the stages with the transformer.
    pub fn fetch_with_transformer(&self, url: &str) -> FutureResult<Payload, ErrorKind> {
        let downloader = self.clone();
        let validator = self.clone();

        FutureResult::new(self.checked_url(url))
            .bind(move |url| downloader.download_url(url).into_future_result())
            .bind(move |raw| validator.validate_response(raw).into_future_result())
    }

    /// Composes the stages by branching on each `Result` by hand.
    pub fn fetch_manually(&self, url: &str) -> Deferred<Result<Payload, ErrorKind>> {
        let downloader = self.clone();
        let validator = self.clone();

        self.checked_url(url)
            .bind(move |checked| match checked {
                Ok(url) => downloader.download_url(url),
                Err(err) => Deferred::pure(Err(err)),
            })
            .bind(move |downloaded| match downloaded {
                Ok(raw) => validator.validate_response(raw),
                Err(err) => Deferred::pure(Err(err)),
            })
    }

    /// The manual chain with rendering as its last step.
    ///
    /// Success and failure reach the presenter through different calls;
    /// the outcome is returned unchanged.
    pub fn fetch_and_present(
        &self,
        url: &str,
        presenter: Arc<dyn Presenter>,
    ) -> Deferred<Result<Payload, ErrorKind>> {
        self.fetch_manually(url).map(move |outcome| {
            outcome
                .tap(|payload| presenter.success(payload))
                .tap_error(|err| presenter.failure(*err))
        })
    }

    /// Runs one pipeline for `url` inside its own run span.
    pub async fn run(&self, url: &str, style: CompositionStyle) -> Result<Payload, ErrorKind> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("pipeline_run", %run_id, url, style = style.as_str());

        async move {
            let timer = SpanTimer::start(style.as_str());
            let outcome = match style {
                CompositionStyle::Transformer => self.fetch_with_transformer(url).await,
                CompositionStyle::Manual => self.fetch_manually(url).await,
            };

            match &outcome {
                Ok(payload) => info!(
                    status = payload.status,
                    duration_ms = timer.finish(),
                    "Pipeline succeeded"
                ),
                Err(err) => warn!(error = %err, duration_ms = timer.finish(), "Pipeline failed"),
            }
            outcome
        }
        .instrument(span)
        .await
    }
}
