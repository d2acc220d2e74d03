//! Configuration management for rewrap.
//!
//! This module provides the [`Config`] struct which controls wrapping behavior.
//! Configuration can be loaded from:
//! - TOML files (`rewrap.toml`)
//! - CLI arguments (which override file settings)
//!
//! Config files are auto-discovered by searching parent directories from the file
//! being rewrapped up to the filesystem root, plus the user's home directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Config file names to search for (in order of priority, later overrides earlier)
const CONFIG_FILE_NAMES: &[&str] = &["rewrap.toml"];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    // Fallback for Windows
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

// Serde default functions
fn default_column() -> usize {
    100
}
fn default_tab_width() -> usize {
    4
}

/// Main configuration struct for rewrap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Target line width in display columns (default: 100)
    #[serde(default = "default_column")]
    pub column: usize,

    /// Tab stop distance for width accounting (default: 4)
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,

    /// Directory names skipped while expanding inputs
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Extra file extensions mapped to language names, e.g. `h = "c"`
    #[serde(default)]
    pub extensions: HashMap<String, String>,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
struct PartialConfig {
    pub column: Option<usize>,
    pub tab_width: Option<usize>,
    pub exclude: Option<Vec<String>>,
    #[serde(default)]
    pub extensions: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            column: default_column(),
            tab_width: default_tab_width(),
            exclude: Vec::new(),
            extensions: HashMap::new(),
        }
    }
}

impl Config {
    /// Maximum reasonable column width
    const MAX_COLUMN: usize = 1000;
    /// Maximum reasonable tab width
    const MAX_TAB_WIDTH: usize = 16;

    /// Validate configuration values are within reasonable bounds
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.column == 0 {
            return Some("column must be at least 1".to_string());
        }
        if self.column > Self::MAX_COLUMN {
            return Some(format!(
                "column {} exceeds maximum of {}",
                self.column,
                Self::MAX_COLUMN
            ));
        }
        if self.tab_width == 0 {
            return Some("tab_width must be at least 1".to_string());
        }
        if self.tab_width > Self::MAX_TAB_WIDTH {
            return Some(format!(
                "tab_width {} exceeds maximum of {}",
                self.tab_width,
                Self::MAX_TAB_WIDTH
            ));
        }
        None
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?;
        let partial: PartialConfig = toml::from_str(&contents)
            .with_context(|| format!("parse {}", path.display()))?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = partial.column {
            self.column = v;
        }
        if let Some(v) = partial.tab_width {
            self.tab_width = v;
        }
        if let Some(v) = &partial.exclude {
            self.exclude.clone_from(v);
        }
        // Merge extension maps (partial values override)
        for (k, v) in &partial.extensions {
            self.extensions.insert(k.clone(), v.clone());
        }
    }

    /// Discover config files from parent directories of a given path
    ///
    /// Searches from the file's directory up to the root, then adds home directory config.
    /// Returns list of config file paths in order of priority (least specific first).
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        // Home directory config has the lowest priority
        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            // Globs and missing paths fall back to the working directory
            std::env::current_dir().ok()
        };

        if let Some(dir) = start_dir {
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            // Root first, so nearer files override farther ones
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones (only explicitly set values).
    /// Returns default config if no files found.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let mut config = Self::default();
        for path in &Self::discover_config_files(start_path) {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => {
                        log::debug!("loaded config {}", path.display());
                        config.apply_partial(&partial);
                    }
                    Err(e) => log::warn!("failed to parse {}: {e}", path.display()),
                },
                Err(e) => log::warn!("failed to read {}: {e}", path.display()),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.column, 100);
        assert_eq!(config.tab_width, 4);
        assert!(config.exclude.is_empty());
        assert!(config.extensions.is_empty());
    }

    #[test]
    fn test_config_apply_partial() {
        let mut base = Config::default();
        let partial = PartialConfig {
            column: Some(80),
            ..Default::default()
        };
        base.apply_partial(&partial);
        assert_eq!(base.column, 80);
        // Other fields should remain at defaults
        assert_eq!(base.tab_width, 4);
    }

    #[test]
    fn test_config_apply_partial_preserves_unset() {
        let mut base = Config {
            tab_width: 8,
            exclude: vec!["target".to_string()],
            ..Default::default()
        };
        let partial = PartialConfig {
            column: Some(72),
            ..Default::default()
        };
        base.apply_partial(&partial);
        assert_eq!(base.tab_width, 8);
        assert_eq!(base.exclude, vec!["target"]);
        assert_eq!(base.column, 72);
    }

    #[test]
    fn test_config_apply_partial_extensions() {
        let mut base = Config::default();
        base.extensions.insert("h".to_string(), "c".to_string());
        base.extensions.insert("inc".to_string(), "c".to_string());

        let mut partial = PartialConfig::default();
        partial.extensions.insert("inc".to_string(), "cpp".to_string());
        partial.extensions.insert(".bzl".to_string(), "python".to_string());
        base.apply_partial(&partial);

        assert_eq!(base.extensions.get("h").map(String::as_str), Some("c"));
        assert_eq!(base.extensions.get("inc").map(String::as_str), Some("cpp"));
        assert_eq!(base.extensions.get(".bzl").map(String::as_str), Some("python"));
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rewrap.toml");
        std::fs::write(
            &path,
            "column = 72\nexclude = [\"vendor\"]\n\n[extensions]\nh = \"c\"\n",
        )
        .unwrap();
        let config = Config::from_toml_file(&path).unwrap();
        assert_eq!(config.column, 72);
        assert_eq!(config.tab_width, 4);
        assert_eq!(config.exclude, vec!["vendor"]);
        assert_eq!(config.extensions.get("h").map(String::as_str), Some("c"));
    }

    #[test]
    fn test_from_toml_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(Config::from_toml_file(&missing).is_err());

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "column = \"wide\"\n").unwrap();
        let err = Config::from_toml_file(&bad).unwrap_err();
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn test_discover_nearer_config_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("rewrap.toml"), "column = 60\ntab_width = 2\n").unwrap();
        std::fs::write(nested.join("rewrap.toml"), "column = 70\n").unwrap();
        let file = nested.join("main.go");
        std::fs::write(&file, "package main\n").unwrap();

        let found = Config::discover_config_files(&file);
        let ours: Vec<&PathBuf> = found.iter().filter(|p| p.starts_with(dir.path())).collect();
        assert_eq!(ours.len(), 2);
        assert!(ours[0].starts_with(dir.path()) && ours[1].starts_with(&nested));

        let config = Config::from_discovered_files(&file);
        assert_eq!(config.column, 70);
        assert_eq!(config.tab_width, 2);
    }

    #[test]
    fn test_validate_default_config() {
        let config = Config::default();
        assert!(
            config.validate().is_none(),
            "Default config should be valid"
        );
    }

    #[test]
    fn test_validate_column_bounds() {
        let zero = Config {
            column: 0,
            ..Default::default()
        };
        assert!(zero.validate().unwrap().contains("column"));
        let huge = Config {
            column: 5000,
            ..Default::default()
        };
        assert!(huge.validate().is_some());
        let one = Config {
            column: 1,
            ..Default::default()
        };
        assert!(one.validate().is_none());
    }

    #[test]
    fn test_validate_tab_width_bounds() {
        let zero = Config {
            tab_width: 0,
            ..Default::default()
        };
        assert!(zero.validate().unwrap().contains("tab_width"));
        let huge = Config {
            tab_width: 64,
            ..Default::default()
        };
        assert!(huge.validate().is_some());
    }
}
