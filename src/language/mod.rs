//! Per-language comment syntax.
//!
//! This module holds the immutable registry the engine consults:
//! - [`Language`]: Comment markers, block tokens, directive prefixes and processing kind
//! - [`registry`]: The built-in table with lookups by extension, filename and name
//!
//! The registry is built once and only exposed through read-only lookups.

pub mod registry;
pub mod types;

pub use registry::{from_extension, from_filename, from_name, languages, resolve, PLAIN_TEXT};
pub use types::{Language, LanguageKind, DEFAULT_BLOCK_PREFIX};
