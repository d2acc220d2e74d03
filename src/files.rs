//! Input expansion
//!
//! Turns the command-line inputs into the list of files to rewrap. Plain
//! paths are used as given, directories are walked for files in a known
//! language and glob patterns are expanded.

use std::collections::{HashMap, HashSet};
use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use walkdir::WalkDir;

use crate::language::from_filename;
use crate::Result;

/// Whether an input contains glob metacharacters
#[must_use]
pub fn is_glob(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

/// Whether any directory component of `path` is an excluded name
#[must_use]
pub fn is_excluded(path: &Path, exclude: &[String]) -> bool {
    if exclude.is_empty() {
        return false;
    }
    let mut dirs = path.parent().into_iter().flat_map(Path::components);
    dirs.any(|component| match component {
        Component::Normal(name) => exclude.iter().any(|e| name == e.as_str()),
        _ => false,
    })
}

/// Whether a file has a built-in or configured language extension
fn is_known_file(path: &Path, extensions: &HashMap<String, String>) -> bool {
    if from_filename(path).is_some() {
        return true;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            extensions
                .keys()
                .any(|custom| custom.strip_prefix('.').unwrap_or(custom).eq_ignore_ascii_case(ext))
        })
}

/// Collect the files below a directory that have a known language
fn walk_dir(
    root: &Path,
    exclude: &[String],
    extensions: &HashMap<String, String>,
) -> Vec<PathBuf> {
    // Note: WalkDir detects symlink loops when follow_links(true) and
    // returns errors for them, which are skipped.
    WalkDir::new(root)
        .follow_links(true)
        .max_depth(256)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !exclude.iter().any(|e| entry.file_name() == e.as_str())
        })
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| is_known_file(path, extensions))
        .collect()
}

/// Expand one glob pattern into files
fn expand_glob(pattern: &str, exclude: &[String]) -> Result<Vec<PathBuf>> {
    let paths =
        glob::glob(pattern).with_context(|| format!("invalid pattern \"{pattern}\""))?;
    let mut files = Vec::new();
    for entry in paths {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                log::warn!("skipping unreadable match of \"{pattern}\": {e}");
                continue;
            }
        };
        if path.is_dir() || is_excluded(&path, exclude) {
            continue;
        }
        files.push(path);
    }
    // Directories and excluded paths do not count as matches
    if files.is_empty() {
        anyhow::bail!("pattern \"{pattern}\" matched no files");
    }
    Ok(files)
}

/// Expand command-line inputs into a deduplicated, ordered file list
///
/// # Arguments
/// * `inputs` - Paths, directories and glob patterns as typed by the user
/// * `exclude` - Directory names to skip while walking or globbing
/// * `extensions` - Configured extension mappings, used to recognize files
///   while walking directories
pub fn expand_inputs(
    inputs: &[String],
    exclude: &[String],
    extensions: &HashMap<String, String>,
) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for input in inputs {
        let expanded = if is_glob(input) {
            expand_glob(input, exclude)?
        } else {
            let path = PathBuf::from(input);
            if path.is_dir() {
                walk_dir(&path, exclude, extensions)
            } else {
                vec![path]
            }
        };
        for path in expanded {
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    log::debug!("expanded {} inputs into {} files", inputs.len(), files.len());
    Ok(files)
}
