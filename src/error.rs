//! Error types and result aliases for rewrap.
//!
//! The rewrapping engine itself is total and never returns an error. Only the
//! boundary code (configuration, language resolution, input expansion and
//! file I/O) is fallible:
//! - [`Result<T>`]: Type alias for `anyhow::Result<T>` used throughout the crate

use anyhow::Result as AnyhowResult;

pub type Result<T> = AnyhowResult<T>;
