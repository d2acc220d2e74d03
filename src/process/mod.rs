//! Input processing.
//!
//! The main entry point is [`source`], which takes raw bytes and a resolved
//! language and returns the rewrapped bytes. [`rewrap_stream`] wraps it for
//! any `Read` / `Write` pair, and [`markdown`] holds the document mode.

pub mod markdown;
pub mod pipeline;

pub use markdown::{render_document, CommonMarkLocator, ParagraphLocator};
pub use pipeline::{rewrap_stream, source, source_str};
