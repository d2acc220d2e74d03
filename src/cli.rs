//! Command-line interface for rewrap.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

/// CLI arguments parsed from command line
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Files, directories or glob patterns to rewrap
    pub inputs: Vec<String>,

    /// Target line width
    pub column: Option<usize>,

    /// Tab stop distance for width accounting
    pub tab_width: Option<usize>,

    /// Language name overriding extension lookup (`text` for plain text)
    pub lang: Option<String>,

    /// Rewrite files in place instead of printing to stdout
    pub write: bool,

    /// Print each rewritten path
    pub verbose: bool,

    /// Directory names to skip while expanding inputs
    pub exclude: Vec<String>,

    /// Config file path
    pub config: Option<PathBuf>,

    /// Number of parallel jobs (0 = auto, 1 = sequential)
    pub jobs: Option<usize>,

    /// Enable debug logging
    pub debug: bool,
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    Command::new("rewrap")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Rewrap comments in source code, prose in Markdown and plain text")
        .arg(
            Arg::new("inputs")
                .help("Files, directories or glob patterns (reads stdin when omitted)")
                .value_name("FILE")
                .num_args(1..)
                .required(false),
        )
        .arg(
            Arg::new("column")
                .short('c')
                .long("column")
                .help("Target line width in columns [default: 100]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("tab-width")
                .long("tab-width")
                .help("Tab stop distance used when measuring lines [default: 4]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("lang")
                .long("lang")
                .help("Language of the input, overriding the file extension (\"text\" for plain text)")
                .value_name("NAME"),
        )
        .arg(
            Arg::new("write")
                .short('w')
                .long("write")
                .help("Rewrite files in place instead of printing to stdout")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print the path of each rewritten file")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("exclude")
                .long("exclude")
                .help("Directory names to skip (comma-separated, can be repeated)")
                .value_name("DIRS")
                .value_delimiter(',')
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to configuration file (overrides auto-discovery)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .help("Number of parallel jobs with --write (0=auto, 1=sequential)")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        )
}

/// Parse CLI arguments from command line
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse CLI arguments from an iterator (for testing)
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

/// Convert clap `ArgMatches` to `CliArgs`
fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    CliArgs {
        inputs: matches
            .get_many::<String>("inputs")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        column: matches.get_one::<usize>("column").copied(),
        tab_width: matches.get_one::<usize>("tab-width").copied(),
        lang: matches.get_one::<String>("lang").cloned(),
        write: matches.get_flag("write"),
        verbose: matches.get_flag("verbose"),
        exclude: matches
            .get_many::<String>("exclude")
            .map(|vals| {
                vals.map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
                    .collect()
            })
            .unwrap_or_default(),
        config: matches.get_one::<PathBuf>("config").cloned(),
        jobs: matches.get_one::<usize>("jobs").copied(),
        debug: matches.get_flag("debug"),
    }
}
