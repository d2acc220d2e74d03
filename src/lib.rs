//! rewrap - Rewrap comments in source code and prose in documents
//!
//! Comment text is reflowed to a target column while code, directives and
//! decoration lines are left exactly as written.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod files;
pub mod format;
pub mod language;
pub mod parser;
pub mod process;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::Config;
pub use error::Result;
pub use language::Language;
pub use process::{source, source_str};
