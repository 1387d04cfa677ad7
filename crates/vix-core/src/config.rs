//! Editor configuration, read from `config.toml`.
//!
//! ## Learning: Serde Defaults
//!
//! Every section derives `Serialize`/`Deserialize` and is marked
//! `#[serde(default)]`, so a missing field or section takes its `Default`
//! value. A config file only needs the settings it changes:
//!
//! ```toml
//! [editor]
//! undo_limit = 500
//!
//! [highlight.keywords]
//! cpp = ["size_t", "std"]
//!
//! [keyboard.bindings]
//! "Z Z" = "write_quit"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// All configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Undo settings
    pub editor: EditorConfig,

    /// Saving behavior
    pub files: FileConfig,

    /// Keyword highlighting settings
    pub highlight: HighlightConfig,

    /// Terminal appearance settings
    pub ui: UiConfig,

    /// Keyboard settings
    pub keyboard: KeyboardConfig,
}

impl Config {
    /// Loads config from the default location, falling back to defaults.
    pub fn load() -> Self {
        match Self::load_from_default_path() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config: {}", e);
                Self::default()
            }
        }
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Loads `default_path()` if the file exists.
    fn load_from_default_path() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("vix").join("config.toml"))
    }
}

/// `[editor]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Undo history limit (edit groups)
    pub undo_limit: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self { undo_limit: 1000 }
    }
}

/// `[files]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Terminate the last line with a newline on save
    pub final_newline: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            final_newline: true,
        }
    }
}

/// `[highlight]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Highlight keywords at all
    pub enabled: bool,

    /// Extra keywords per file extension
    pub keywords: HashMap<String, Vec<String>>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            keywords: HashMap::new(),
        }
    }
}

/// `[ui]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Show a line-number gutter
    pub line_numbers: bool,

    /// Foreground color for keywords
    pub keyword_color: String,

    /// Background color of the status line
    pub status_color: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            line_numbers: false,
            keyword_color: "red".to_string(),
            status_color: "darkgrey".to_string(),
        }
    }
}

/// `[keyboard]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    /// Extra Normal-mode bindings: key sequence -> command name
    pub bindings: HashMap<String, String>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.editor.undo_limit, 1000);
        assert!(config.files.final_newline);
        assert!(config.highlight.enabled);
        assert_eq!(config.ui.keyword_color, "red");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.editor.undo_limit, config.editor.undo_limit);
    }

    #[test]
    fn test_partial_config() {
        let parsed: Config = toml::from_str(
            r#"
            [highlight.keywords]
            cpp = ["size_t"]

            [keyboard.bindings]
            "Z Z" = "write_quit"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.editor.undo_limit, 1000);
        assert_eq!(parsed.highlight.keywords["cpp"], vec!["size_t"]);
        assert_eq!(parsed.keyboard.bindings["Z Z"], "write_quit");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui]\nline_numbers = true\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(loaded.ui.line_numbers);
        assert_eq!(loaded.ui.keyword_color, "red");

        std::fs::write(&path, "[ui]\nline_numbers = 3\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
