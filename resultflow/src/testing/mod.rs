//! Testing utilities for resultflow pipelines.
//!
//! This module provides:
//! - Scripted transports and decoders that count their calls
//! - Canned responses for the standard pipeline scenarios

mod fixtures;
mod mocks;

pub use fixtures::{html_response, json_response, Scenario};
pub use mocks::{CountingDecoder, RecordingTransport, SlowTransport, StaticTransport};
