//! The composable abstractions every pipeline is built from.
//!
//! This module contains, leaves first:
//! - `ResultExt`: `bind`/`map_error` combinators for the synchronous `Result`
//! - `Deferred`: a single-shot asynchronous computation
//! - `FutureResult`: the transformer fusing the two

mod deferred;
mod future_result;
mod result_ext;

pub use deferred::Deferred;
pub use future_result::FutureResult;
pub use result_ext::ResultExt;
