//! Property checks over the fixture corpus
//!
//! Every file in `tests/fixtures/` is named `<name>_c<column>.<ext>`. Each is
//! rewrapped at that column and the output is checked for idempotence, the
//! width bound, word conservation, newline preservation and untouched
//! directive lines.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rewrap::format::display_width;
use rewrap::language::{self, Language};
use rewrap::source_str;

const TAB_WIDTH: usize = 4;

struct Fixture {
    path: PathBuf,
    column: usize,
    lang: Option<&'static Language>,
    input: String,
}

/// Column width encoded in a fixture name such as `go_doc_c100.go`
fn column_from_name(path: &Path) -> Option<usize> {
    let stem = path.file_stem()?.to_str()?;
    let (_, column) = stem.rsplit_once("_c")?;
    column.parse().ok()
}

fn fixtures() -> Vec<Fixture> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures");
    let mut paths: Vec<PathBuf> = fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", dir.display()))
        .map(|entry| entry.unwrap().path())
        .collect();
    paths.sort();

    let fixtures: Vec<Fixture> = paths
        .into_iter()
        .map(|path| {
            let column = column_from_name(&path)
                .unwrap_or_else(|| panic!("No column width in {}", path.display()));
            let lang = language::resolve(Some(&path), None, &HashMap::new()).unwrap();
            let input = fs::read_to_string(&path)
                .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
            Fixture {
                path,
                column,
                lang,
                input,
            }
        })
        .collect();
    assert!(!fixtures.is_empty(), "no fixtures found");
    fixtures
}

fn rewrap(fixture: &Fixture, text: &str) -> String {
    source_str(text, fixture.lang, fixture.column, TAB_WIDTH)
}

/// Words of a text, ignoring tokens made only of comment punctuation
fn words(text: &str) -> Vec<&str> {
    let mut words: Vec<&str> = text
        .split_whitespace()
        .filter(|w| !w.chars().all(|c| matches!(c, '/' | '#' | '*')))
        .collect();
    words.sort_unstable();
    words
}

#[test]
fn test_fixtures_idempotent() {
    for fixture in fixtures() {
        let once = rewrap(&fixture, &fixture.input);
        let twice = rewrap(&fixture, &once);
        assert_eq!(once, twice, "not idempotent: {}", fixture.path.display());
    }
}

#[test]
fn test_fixtures_width_bound() {
    for fixture in fixtures() {
        let output = rewrap(&fixture, &fixture.input);
        let input_lines: Vec<&str> = fixture.input.lines().collect();
        for line in output.lines() {
            if display_width(line, TAB_WIDTH) <= fixture.column || input_lines.contains(&line) {
                continue;
            }
            // Only a single over-long word may exceed the column
            let tokens: Vec<&str> = line
                .split_whitespace()
                .filter(|w| !w.chars().all(|c| matches!(c, '/' | '#' | '*' | '-')))
                .collect();
            assert_eq!(
                tokens.len(),
                1,
                "line too wide in {}: {line:?}",
                fixture.path.display()
            );
        }
    }
}

#[test]
fn test_fixtures_conserve_words() {
    for fixture in fixtures() {
        let output = rewrap(&fixture, &fixture.input);
        assert_eq!(
            words(&output),
            words(&fixture.input),
            "words changed in {}",
            fixture.path.display()
        );
    }
}

#[test]
fn test_fixtures_trailing_newline() {
    for fixture in fixtures() {
        let output = rewrap(&fixture, &fixture.input);
        assert_eq!(
            output.ends_with('\n'),
            fixture.input.ends_with('\n'),
            "trailing newline changed in {}",
            fixture.path.display()
        );
        let trimmed = fixture.input.trim_end_matches('\n');
        assert!(
            !rewrap(&fixture, trimmed).ends_with('\n'),
            "newline added in {}",
            fixture.path.display()
        );
    }
}

#[test]
fn test_fixtures_directives_untouched() {
    for fixture in fixtures() {
        let Some(lang) = fixture.lang else {
            continue;
        };
        let output = rewrap(&fixture, &fixture.input);
        let output_lines: Vec<&str> = output.lines().collect();
        for line in fixture.input.lines() {
            let trimmed = line.trim_start();
            let is_directive = lang.line_markers.iter().any(|marker| {
                trimmed
                    .strip_prefix(marker)
                    .is_some_and(|rest| lang.directives.iter().any(|d| rest.starts_with(d)))
            });
            if is_directive {
                assert!(
                    output_lines.contains(&line),
                    "directive {line:?} changed in {}",
                    fixture.path.display()
                );
            }
        }
    }
}

#[test]
fn test_column_from_name() {
    assert_eq!(column_from_name(Path::new("go_doc_c100.go")), Some(100));
    assert_eq!(column_from_name(Path::new("notes_c30.txt")), Some(30));
    assert_eq!(column_from_name(Path::new("plain.txt")), None);
}
