//! rewrap - Rewrap comments and prose to a target width

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Context;
use rayon::prelude::*;
use rewrap::files::expand_inputs;
use rewrap::language::resolve;
use rewrap::process::source;
use rewrap::{parse_args, CliArgs, Config, Result};

/// Files larger than this are skipped to prevent memory exhaustion (100 MB)
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

fn main() -> Result<()> {
    let args = parse_args();
    init_logging(args.debug);

    if args.inputs.is_empty() {
        if io::stdin().is_terminal() {
            print_usage();
            anyhow::bail!("no input files given and stdin is a terminal");
        }
        let config = build_config(&args, None)?;
        return process_stdin(&config, &args);
    }

    // An explicit config file applies to every input; otherwise discovery
    // starts from the current directory for input expansion and from each
    // file for its own settings.
    let base_config = build_config(&args, None)?;
    let files = expand_inputs(
        &args.inputs,
        &base_config.exclude,
        &base_config.extensions,
    )?;
    if files.is_empty() {
        log::warn!("no files found to rewrap");
        return Ok(());
    }

    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                log::warn!("failed to configure thread pool: {e}");
            }
        }
    }

    let per_file_config = args.config.is_none();
    let errors = if args.write && files.len() > 1 && args.jobs != Some(1) {
        process_files_parallel(&files, &base_config, per_file_config, &args)
    } else {
        process_files_sequential(&files, &base_config, per_file_config, &args)
    };

    if errors > 0 {
        anyhow::bail!("failed to rewrap {errors} of {} files", files.len());
    }
    Ok(())
}

/// Install the logger: `--debug` forces debug output, otherwise `RUST_LOG`
/// applies with a default of `warn`
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

/// Build configuration from CLI args and optional config file
///
/// If `for_path` is provided and no explicit config file is specified,
/// uses auto-discovery to find config files in parent directories.
fn build_config(args: &CliArgs, for_path: Option<&Path>) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        log::debug!("using explicit config file: {}", config_path.display());
        Config::from_toml_file(config_path)?
    } else {
        let start = match for_path {
            Some(path) => path.to_path_buf(),
            None => std::env::current_dir().unwrap_or_default(),
        };
        for f in &Config::discover_config_files(&start) {
            log::debug!("discovered config file {}", f.display());
        }
        Config::from_discovered_files(&start)
    };

    // Override with CLI arguments
    if let Some(column) = args.column {
        config.column = column;
    }
    if let Some(tab_width) = args.tab_width {
        config.tab_width = tab_width;
    }
    config.exclude.extend(args.exclude.iter().cloned());

    log::debug!("configuration: {config:?}");

    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }
    Ok(config)
}

/// Configuration for one file
fn config_for(
    path: &Path,
    base_config: &Config,
    per_file_config: bool,
    args: &CliArgs,
) -> Result<Config> {
    if per_file_config {
        build_config(args, Some(path))
    } else {
        Ok(base_config.clone())
    }
}

/// Process files one at a time, in input order
fn process_files_sequential(
    files: &[PathBuf],
    base_config: &Config,
    per_file_config: bool,
    args: &CliArgs,
) -> usize {
    let mut errors = 0;
    for path in files {
        let result = config_for(path, base_config, per_file_config, args)
            .and_then(|config| process_single_file(path, &config, args));
        if let Err(e) = result {
            errors += 1;
            eprintln!("Error rewrapping {}: {e:#}", path.display());
        }
    }
    errors
}

/// Rewrite files in place in parallel using Rayon
fn process_files_parallel(
    files: &[PathBuf],
    base_config: &Config,
    per_file_config: bool,
    args: &CliArgs,
) -> usize {
    let success_count = AtomicUsize::new(0);
    let error_count = AtomicUsize::new(0);

    files.par_iter().for_each(|path| {
        let result = config_for(path, base_config, per_file_config, args)
            .and_then(|config| process_single_file(path, &config, args));
        match result {
            Ok(()) => {
                success_count.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                error_count.fetch_add(1, Ordering::Relaxed);
                eprintln!("Error rewrapping {}: {e:#}", path.display());
            }
        }
    });

    let success = success_count.load(Ordering::Relaxed);
    let errors = error_count.load(Ordering::Relaxed);
    log::info!("rewrapped {success} files, {errors} errors");
    errors
}

/// Rewrap a single file to stdout or in place
fn process_single_file(path: &Path, config: &Config, args: &CliArgs) -> Result<()> {
    let metadata =
        std::fs::metadata(path).with_context(|| format!("read {}", path.display()))?;
    if metadata.len() > DEFAULT_MAX_FILE_SIZE {
        log::warn!(
            "skipping {} ({} MB exceeds limit of {} MB)",
            path.display(),
            metadata.len() / (1024 * 1024),
            DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
        );
        return Ok(());
    }

    let contents = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let lang = resolve(Some(path), args.lang.as_deref(), &config.extensions)?;
    log::debug!(
        "{}: language {}",
        path.display(),
        lang.map_or("text", |l| l.name)
    );
    let output = source(&contents, lang, config.column, config.tab_width);

    if args.write {
        if output != contents {
            // fs::write truncates the existing file, so its permissions are kept
            std::fs::write(path, &output)
                .with_context(|| format!("write {}", path.display()))?;
        }
        if args.verbose {
            println!("{}", path.display());
        }
    } else {
        let mut stdout = io::stdout().lock();
        stdout.write_all(&output)?;
        stdout.flush()?;
    }
    Ok(())
}

/// Rewrap stdin to stdout; the language comes only from `--lang`
fn process_stdin(config: &Config, args: &CliArgs) -> Result<()> {
    let mut contents = Vec::new();
    io::stdin()
        .read_to_end(&mut contents)
        .context("read stdin")?;

    let lang = resolve(None, args.lang.as_deref(), &config.extensions)?;
    let output = source(&contents, lang, config.column, config.tab_width);
    io::stdout().write_all(&output)?;
    Ok(())
}

fn print_usage() {
    println!(
        "rewrap v{} - rewrap comments and prose to a target width",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("Usage:");
    println!("  rewrap [OPTIONS] <FILE|DIR|GLOB>...");
    println!("  cat notes.txt | rewrap --lang text");
    println!();
    println!("Examples:");
    println!("  rewrap main.go                  # Print main.go with rewrapped comments");
    println!("  rewrap -w -c 80 'src/**/*.go'   # Rewrap in place at 80 columns");
    println!("  rewrap -w --exclude vendor .    # Rewrap a tree, skipping vendor/");
    println!();
    println!("Options:");
    println!("  -c, --column <NUM>              Target width [default: 100]");
    println!("      --tab-width <NUM>           Tab stop distance [default: 4]");
    println!("      --lang <NAME>               Language override (\"text\" for plain text)");
    println!("  -w, --write                     Rewrite files in place");
    println!("  -v, --verbose                   Print each rewritten path");
    println!("      --exclude <DIRS>            Directory names to skip (comma-separated)");
    println!("      --config <FILE>             Config file path (overrides auto-discovery)");
    println!("  -j, --jobs <NUM>                Parallel jobs with --write (0=auto, 1=sequential)");
    println!("  -D, --debug                     Enable debug logging");
    println!("  -h, --help                      Print help");
    println!();
    println!("Config file auto-discovery:");
    println!("  Searches for rewrap.toml in parent directories");
    println!("  starting from the file being rewrapped up to the root directory.");
    println!("  Also checks rewrap.toml in the home directory.");
    println!("  More specific configs (closer to file) override less specific ones.");
}
