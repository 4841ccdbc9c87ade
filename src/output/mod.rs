//! Output module for rendering results
//!
//! This module handles:
//! - Wrapping harvest and article results in JSON status envelopes
//! - Writing them to any `io::Write` sink

mod envelope;

pub use envelope::{
    format_elapsed, ArticleResponse, ListingData, ListingResponse, ListingSection,
};

use crate::Result;
use serde::Serialize;
use std::io::Write;

/// Writes a value as pretty-printed JSON followed by a newline
pub fn write_json<T: Serialize, W: Write>(writer: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}
