//! Observability utilities.
//!
//! Log setup for binaries and the timing helper the stages use for their
//! `duration_ms` fields.

mod spans;
mod subscriber;

pub use spans::SpanTimer;
pub use subscriber::{build_filter, init_tracing, DEFAULT_FILTER};
