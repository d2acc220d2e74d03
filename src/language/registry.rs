/// Built-in language table and read-only lookups
///
/// The table is a `static` slice; the extension index is built once on first
/// use and never mutated, so lookups need no synchronization.
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use super::types::{Language, LanguageKind};
use crate::Result;

/// Language name that forces plain-text mode regardless of extension
pub const PLAIN_TEXT: &str = "text";

const C_BLOCK_START: &[&str] = &["/*"];
const C_BLOCK_END: &[&str] = &["*/"];

static LANGUAGES: &[Language] = &[
    Language {
        name: "go",
        extensions: &[".go"],
        line_markers: &["//"],
        block_start: C_BLOCK_START,
        block_end: C_BLOCK_END,
        block_prefix: None,
        directives: &["go:", "line ", "export ", "nolint"],
        doc_marker: Some("//"),
        kind: LanguageKind::Source,
    },
    Language {
        name: "c",
        extensions: &[".c", ".h"],
        line_markers: &["//"],
        block_start: C_BLOCK_START,
        block_end: C_BLOCK_END,
        block_prefix: None,
        directives: &[],
        doc_marker: None,
        kind: LanguageKind::Source,
    },
    Language {
        name: "cpp",
        extensions: &[".cpp", ".cc", ".cxx", ".hpp", ".hxx"],
        line_markers: &["//"],
        block_start: C_BLOCK_START,
        block_end: C_BLOCK_END,
        block_prefix: None,
        directives: &[],
        doc_marker: None,
        kind: LanguageKind::Source,
    },
    Language {
        name: "java",
        extensions: &[".java"],
        line_markers: &["//"],
        block_start: C_BLOCK_START,
        block_end: C_BLOCK_END,
        block_prefix: Some(" * "),
        directives: &[],
        doc_marker: None,
        kind: LanguageKind::Source,
    },
    Language {
        name: "javascript",
        extensions: &[".js", ".jsx", ".mjs", ".cjs"],
        line_markers: &["//"],
        block_start: C_BLOCK_START,
        block_end: C_BLOCK_END,
        block_prefix: None,
        directives: &[],
        doc_marker: None,
        kind: LanguageKind::Source,
    },
    Language {
        name: "typescript",
        extensions: &[".ts", ".tsx", ".mts", ".cts"],
        line_markers: &["//"],
        block_start: C_BLOCK_START,
        block_end: C_BLOCK_END,
        block_prefix: None,
        directives: &[],
        doc_marker: None,
        kind: LanguageKind::Source,
    },
    Language {
        name: "python",
        extensions: &[".py"],
        line_markers: &["#"],
        block_start: &[],
        block_end: &[],
        block_prefix: None,
        // Shebang and encoding declaration
        directives: &["!", " -*-"],
        doc_marker: None,
        kind: LanguageKind::Source,
    },
    Language {
        name: "shell",
        extensions: &[".sh", ".bash", ".zsh"],
        line_markers: &["#"],
        block_start: &[],
        block_end: &[],
        block_prefix: None,
        directives: &["!"],
        doc_marker: None,
        kind: LanguageKind::Source,
    },
    Language {
        name: "ruby",
        extensions: &[".rb"],
        line_markers: &["#"],
        block_start: &[],
        block_end: &[],
        block_prefix: None,
        directives: &["!", " frozen_string_literal:"],
        doc_marker: None,
        kind: LanguageKind::Source,
    },
    Language {
        name: "rust",
        extensions: &[".rs"],
        // Doc markers first so `///` runs do not match the plain `//` marker
        line_markers: &["///", "//!", "//"],
        block_start: C_BLOCK_START,
        block_end: C_BLOCK_END,
        block_prefix: None,
        directives: &[],
        doc_marker: None,
        kind: LanguageKind::Source,
    },
    Language {
        name: "toml",
        extensions: &[".toml"],
        line_markers: &["#"],
        block_start: &[],
        block_end: &[],
        block_prefix: None,
        directives: &[],
        doc_marker: None,
        kind: LanguageKind::Source,
    },
    Language {
        name: "yaml",
        extensions: &[".yaml", ".yml"],
        line_markers: &["#"],
        block_start: &[],
        block_end: &[],
        block_prefix: None,
        directives: &[],
        doc_marker: None,
        kind: LanguageKind::Source,
    },
    Language {
        name: "markdown",
        extensions: &[".md", ".markdown"],
        line_markers: &[],
        block_start: &[],
        block_end: &[],
        block_prefix: None,
        directives: &[],
        doc_marker: None,
        kind: LanguageKind::Document,
    },
];

/// Extension (lowercase, with dot) to language index
static EXTENSION_MAP: LazyLock<HashMap<&'static str, &'static Language>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for lang in LANGUAGES {
        for ext in lang.extensions {
            map.insert(*ext, lang);
        }
    }
    map
});

/// All built-in languages in table order
#[must_use]
pub fn languages() -> &'static [Language] {
    LANGUAGES
}

/// Look up a language by file extension (with or without the leading dot)
#[must_use]
pub fn from_extension(ext: &str) -> Option<&'static Language> {
    let ext = ext.to_ascii_lowercase();
    if ext.starts_with('.') {
        EXTENSION_MAP.get(ext.as_str()).copied()
    } else {
        EXTENSION_MAP.get(format!(".{ext}").as_str()).copied()
    }
}

/// Look up a language from a file path's extension
#[must_use]
pub fn from_filename(path: &Path) -> Option<&'static Language> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(from_extension)
}

/// Look up a language by name (case-insensitive)
#[must_use]
pub fn from_name(name: &str) -> Option<&'static Language> {
    LANGUAGES
        .iter()
        .find(|lang| lang.name.eq_ignore_ascii_case(name))
}

/// Resolve the language for an input
///
/// # Arguments
/// * `path` - Input file, `None` for stdin
/// * `lang_override` - Explicit `--lang` value; [`PLAIN_TEXT`] forces plain-text mode
/// * `extra_extensions` - Extension to language-name mappings from configuration,
///   consulted before the built-in table
///
/// # Returns
/// * `Ok(None)` for plain-text mode
/// * `Err` when `lang_override` or a configured mapping names an unknown language
pub fn resolve(
    path: Option<&Path>,
    lang_override: Option<&str>,
    extra_extensions: &HashMap<String, String>,
) -> Result<Option<&'static Language>> {
    if let Some(name) = lang_override.filter(|name| !name.is_empty()) {
        if name.eq_ignore_ascii_case(PLAIN_TEXT) {
            return Ok(None);
        }
        return match from_name(name) {
            Some(lang) => Ok(Some(lang)),
            None => anyhow::bail!("unknown language: {name}"),
        };
    }

    let Some(ext) = path
        .and_then(|p| p.extension())
        .and_then(|ext| ext.to_str())
    else {
        return Ok(None);
    };

    // `x` and `.x` may both be configured; the dotless key wins, then the
    // lowest key, so the choice never depends on map order
    let configured = extra_extensions
        .iter()
        .filter(|(custom, _)| {
            custom
                .strip_prefix('.')
                .unwrap_or(custom.as_str())
                .eq_ignore_ascii_case(ext)
        })
        .min_by(|(a, _), (b, _)| {
            (a.starts_with('.'), a.as_str()).cmp(&(b.starts_with('.'), b.as_str()))
        });
    if let Some((_, name)) = configured {
        if name.eq_ignore_ascii_case(PLAIN_TEXT) {
            return Ok(None);
        }
        return match from_name(name) {
            Some(lang) => Ok(Some(lang)),
            None => anyhow::bail!("unknown language for extension .{ext}: {name}"),
        };
    }

    Ok(from_extension(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_extensions_unique() {
        let mut seen = HashSet::new();
        for lang in languages() {
            for ext in lang.extensions {
                assert!(seen.insert(*ext), "duplicate extension {ext}");
            }
        }
    }

    #[test]
    fn test_block_tokens_paired() {
        for lang in languages() {
            assert_eq!(
                lang.block_start.len(),
                lang.block_end.len(),
                "unpaired block tokens for {}",
                lang.name
            );
        }
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(from_extension(".go").map(|l| l.name), Some("go"));
        assert_eq!(from_extension("GO").map(|l| l.name), Some("go"));
        assert_eq!(from_extension(".hpp").map(|l| l.name), Some("cpp"));
        assert!(from_extension(".unknown").is_none());
    }

    #[test]
    fn test_from_filename() {
        let lang = from_filename(Path::new("src/main.rs")).unwrap();
        assert_eq!(lang.name, "rust");
        assert!(from_filename(Path::new("Makefile")).is_none());
        assert!(from_filename(Path::new("README.md")).unwrap().is_document());
    }

    #[test]
    fn test_from_name_case_insensitive() {
        assert_eq!(from_name("Python").map(|l| l.name), Some("python"));
        assert!(from_name("cobol").is_none());
    }

    #[test]
    fn test_resolve_text_override() {
        let none = HashMap::new();
        let lang = resolve(Some(Path::new("main.go")), Some("text"), &none).unwrap();
        assert!(lang.is_none());
    }

    #[test]
    fn test_resolve_unknown_override() {
        let none = HashMap::new();
        let err = resolve(None, Some("klingon"), &none).unwrap_err();
        assert!(err.to_string().contains("unknown language"));
    }

    #[test]
    fn test_resolve_from_path() {
        let none = HashMap::new();
        let lang = resolve(Some(Path::new("a/b.py")), None, &none).unwrap();
        assert_eq!(lang.map(|l| l.name), Some("python"));
        assert!(resolve(None, None, &none).unwrap().is_none());
    }

    #[test]
    fn test_resolve_extra_extension() {
        let mut extra = HashMap::new();
        extra.insert(".gotmpl".to_string(), "go".to_string());
        extra.insert("notes".to_string(), "text".to_string());
        let lang = resolve(Some(Path::new("x.gotmpl")), None, &extra).unwrap();
        assert_eq!(lang.map(|l| l.name), Some("go"));
        assert!(resolve(Some(Path::new("x.notes")), None, &extra)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_resolve_extra_extension_dotless_key_wins() {
        let mut extra = HashMap::new();
        extra.insert(".tpl".to_string(), "python".to_string());
        extra.insert("tpl".to_string(), "go".to_string());
        let lang = resolve(Some(Path::new("page.tpl")), None, &extra).unwrap();
        assert_eq!(lang.map(|l| l.name), Some("go"));
        let lang = resolve(Some(Path::new("PAGE.TPL")), None, &extra).unwrap();
        assert_eq!(lang.map(|l| l.name), Some("go"));
    }
}
