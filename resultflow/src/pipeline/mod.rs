//! Pipeline stages and their composition.
//!
//! This module provides:
//! - The three stages (URL check, download, validation)
//! - The validated [`Payload`]
//! - [`Pipeline`], which composes the stages in either style

mod compose;
mod payload;
mod stages;

pub use compose::{CompositionStyle, Pipeline};
pub use payload::Payload;
pub use stages::{check_url, download_url, validate, validate_response, StageName};
