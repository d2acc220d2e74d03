//! Comment and prose rendering.
//!
//! This module turns classified text back into wrapped lines:
//! - [`wrap`]: Greedy, tab-aware paragraph wrapping shared by every mode
//! - [`line_comment`]: Runs of line comments, split at decoration lines
//! - [`block_comment`]: Block comments in canonical opener / prefix / closer form
//! - [`doc_comment`]: Structured doc comments with headings, lists and code blocks

pub mod block_comment;
pub mod doc_comment;
pub mod line_comment;
pub mod wrap;

pub use wrap::{display_width, wrap_text};
