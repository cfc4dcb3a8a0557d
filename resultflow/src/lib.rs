//! # Resultflow
//!
//! Composable asynchronous, fallible pipelines.
//!
//! Resultflow fuses "a value that arrives later" with "a computation that may
//! fail" into one type, [`FutureResult`](core::FutureResult), so that
//! multi-stage workflows read as a flat chain:
//!
//! - **Synchronous fallible steps**: [`ResultExt`](core::ResultExt) adds
//!   `bind`/`map_error` to `Result`
//! - **Lazy async steps**: [`Deferred`](core::Deferred) runs nothing until awaited
//! - **Short-circuiting**: the first `Err` skips every later stage
//! - **A fetch-and-validate pipeline**: URL check, download, JSON validation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use resultflow::prelude::*;
//!
//! let transport = HttpTransport::new(TransportConfig::default())?;
//! let pipeline = Pipeline::new(Arc::new(transport));
//!
//! match pipeline.fetch_with_transformer("https://postman-echo.com/get?foo1=bar1").await {
//!     Ok(payload) => println!("{}", payload.body),
//!     Err(kind) => println!("{kind}"),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod core;
pub mod errors;
pub mod observability;
pub mod pipeline;
pub mod present;
pub mod testing;
pub mod transport;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{LogFormat, ResultflowConfig, TransportConfig, DEFAULT_URL};
    pub use crate::core::{Deferred, FutureResult, ResultExt};
    pub use crate::errors::{DecodeError, ErrorKind, ResultflowError, TransportError};
    pub use crate::observability::init_tracing;
    pub use crate::pipeline::{CompositionStyle, Payload, Pipeline, StageName};
    pub use crate::present::{render, ConsolePresenter, LoggingPresenter, Presenter};
    #[cfg(feature = "http")]
    pub use crate::transport::HttpTransport;
    pub use crate::transport::{Decoder, JsonDecoder, RawResponse, Transport};
    pub use std::sync::Arc;
}
