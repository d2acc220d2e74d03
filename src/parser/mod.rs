//! Source text analysis.
//!
//! This module locates and interprets comment text:
//! - [`segment`]: Splits source lines into code, line-comment and block-comment segments
//! - [`doc`]: Block grammar for doc comments (paragraphs, headings, lists, code)
//! - [`inline`]: Links, doc links and emphasis inside doc-comment paragraphs
//! - [`patterns`]: Precompiled regex patterns shared by the parsers
//!
//! Classification never drops or reorders lines: every input line belongs to
//! exactly one segment.

pub mod doc;
pub mod inline;
pub mod patterns;
pub mod segment;

pub use doc::{DocBlock, List, ListItem};
pub use inline::InlineSpan;
pub use segment::{classify, Segment, SegmentKind};
