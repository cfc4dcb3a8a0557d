//! Error types for the resultflow crate.
//!
//! Pipeline stages only ever fail with an [`ErrorKind`]. The collaborator
//! errors ([`TransportError`], [`DecodeError`]) are converted into an
//! `ErrorKind` at the stage that invokes the collaborator, and
//! [`ResultflowError`] covers the ambient layer around the pipeline
//! (configuration, client construction, logging setup).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The closed set of failures a pipeline run can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum ErrorKind {
    /// The URL failed the syntactic pre-check; no asynchronous work started.
    #[error("BadUrl")]
    BadUrl,
    /// The transport failed while fetching the URL.
    #[error("IoError")]
    IoError,
    /// The fetched response failed content-type, status or body validation.
    #[error("InvalidResponse")]
    InvalidResponse,
}

impl ErrorKind {
    /// All variants, in pipeline stage order.
    pub const ALL: [Self; 3] = [Self::BadUrl, Self::IoError, Self::InvalidResponse];

    /// Returns the variant name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BadUrl => "BadUrl",
            Self::IoError => "IoError",
            Self::InvalidResponse => "InvalidResponse",
        }
    }
}

/// A failure reported by a transport implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request could not be sent or no response arrived.
    #[error("request to {url} failed: {message}")]
    Request {
        /// The requested URL.
        url: String,
        /// Description of the failure.
        message: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out")]
    Timeout {
        /// The requested URL.
        url: String,
    },

    /// The response body could not be read.
    #[error("failed to read body from {url}: {message}")]
    Body {
        /// The requested URL.
        url: String,
        /// Description of the failure.
        message: String,
    },
}

/// A failure reported by a body decoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The decoder does not handle the declared content type.
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// The body is not valid for the declared content type.
    #[error("malformed body: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Errors raised by the code around a pipeline run.
#[derive(Debug, Error)]
pub enum ResultflowError {
    /// A configuration value could not be parsed.
    #[error("invalid configuration for {key}: {message}")]
    Config {
        /// The offending key or environment variable.
        key: String,
        /// Description of the problem.
        message: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// The logging subscriber could not be installed.
    #[error("failed to initialise tracing: {0}")]
    Tracing(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ResultflowError {
    /// Creates a configuration error.
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            key: key.into(),
            message: message.into(),
        }
    }
}
