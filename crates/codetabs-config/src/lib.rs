//! Configuration management for codetabs.
//!
//! Parses `codetabs.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [render]
//! highlight = true
//! markdown = true
//!
//! [convert]
//! code_language = "text"
//! strip_chars = ["\u200B", "\uFEFF"]
//!
//! [editor]
//! placeholder = "// Write your code here"
//!
//! [store]
//! path = "${NOTES_DIR:-.}/blocks.json"
//!
//! [languages]
//! extra = ["mermaid"]
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `store.path` supports `${VAR}` (errors if unset) and `${VAR:-default}`.
//! Relative store paths resolve against the config file's directory.

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override block store path.
    pub store_path: Option<PathBuf>,
    /// Override syntax highlighting flag.
    pub highlight: Option<bool>,
    /// Override markdown rendering flag.
    pub markdown: Option<bool>,
    /// Override the info string of generated code blocks.
    pub code_language: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "codetabs.toml";

/// Default code for new widgets.
const DEFAULT_PLACEHOLDER: &str = "// Write your code here";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendering configuration.
    pub render: RenderConfig,
    /// Conversion configuration.
    pub convert: ConvertConfig,
    /// Editor configuration.
    pub editor: EditorConfig,
    /// Block store configuration (path as written in TOML).
    store: StoreConfigRaw,
    /// Language registry configuration.
    pub languages: LanguagesConfig,

    /// Resolved block store path (set after loading).
    #[serde(skip)]
    pub store_path: Option<PathBuf>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Highlight code tabs with syntect.
    pub highlight: bool,
    /// Render `markdown-render` tabs as HTML.
    pub markdown: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            highlight: true,
            markdown: true,
        }
    }
}

/// Conversion configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Info string of code blocks produced from widgets.
    pub code_language: String,
    /// Characters stripped from block text before parsing.
    /// Each entry must be a single character.
    strip_chars: Option<Vec<String>>,
}

impl ConvertConfig {
    /// Configured strip characters, or `None` for the converter default.
    #[must_use]
    pub fn strip_chars(&self) -> Option<Vec<char>> {
        self.strip_chars
            .as_ref()
            .map(|chars| chars.iter().filter_map(|s| s.chars().next()).collect())
    }
}

/// Editor configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Code placed in newly inserted widgets.
    pub placeholder: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
        }
    }
}

/// Raw store configuration as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StoreConfigRaw {
    path: Option<String>,
}

/// Language registry configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LanguagesConfig {
    /// Tags accepted in addition to the highlighter's syntaxes.
    pub extra: Vec<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`store.path`").
        field: String,
        /// Error message (e.g., "${`NOTES_DIR`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `codetabs.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, so CLI arguments take
    /// precedence over config file values.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Block store path, required by commands that work on a document.
    pub fn require_store_path(&self) -> Result<&Path, ConfigError> {
        self.store_path.as_deref().ok_or_else(|| {
            ConfigError::Validation(
                "store.path is not set (use [store] path or --store)".to_owned(),
            )
        })
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_convert()?;
        self.validate_editor()?;
        self.validate_languages()?;
        Ok(())
    }

    fn validate_convert(&self) -> Result<(), ConfigError> {
        let lang = &self.convert.code_language;
        if lang.chars().any(|c| c.is_whitespace() || c == '`') {
            return Err(ConfigError::Validation(format!(
                "convert.code_language must be a single word, got {lang:?}"
            )));
        }

        for entry in self.convert.strip_chars.iter().flatten() {
            if entry.chars().count() != 1 {
                return Err(ConfigError::Validation(format!(
                    "convert.strip_chars entries must be single characters, got {entry:?}"
                )));
            }
        }

        Ok(())
    }

    fn validate_editor(&self) -> Result<(), ConfigError> {
        if self.editor.placeholder.trim().is_empty() {
            return Err(ConfigError::Validation(
                "editor.placeholder cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_languages(&self) -> Result<(), ConfigError> {
        for tag in &self.languages.extra {
            if tag.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "languages.extra cannot contain empty tags".to_owned(),
                ));
            }
        }
        Ok(())
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(store_path) = &settings.store_path {
            self.store_path = Some(store_path.clone());
        }
        if let Some(highlight) = settings.highlight {
            self.render.highlight = highlight;
        }
        if let Some(markdown) = settings.markdown {
            self.render.markdown = markdown;
        }
        if let Some(code_language) = &settings.code_language {
            self.convert.code_language.clone_from(code_language);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_store(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Expand and resolve the store path against the config directory.
    fn resolve_store(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        self.store_path = match &self.store.path {
            Some(raw) => {
                let expanded = expand::expand_env(raw, "store.path")?;
                if expanded.trim().is_empty() {
                    return Err(ConfigError::Validation("store.path cannot be empty".to_owned()));
                }
                Some(config_dir.join(expanded))
            }
            None => None,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.render.highlight);
        assert!(config.render.markdown);
        assert_eq!(config.convert.code_language, "");
        assert_eq!(config.convert.strip_chars(), None);
        assert_eq!(config.editor.placeholder, "// Write your code here");
        assert!(config.store_path.is_none());
        assert!(config.languages.extra.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r##"
[render]
highlight = false

[convert]
code_language = "text"
strip_chars = ["\u200B", "x"]

[editor]
placeholder = "# edit me"

[languages]
extra = ["mermaid", "hcl"]
"##;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.render.highlight);
        assert!(config.render.markdown);
        assert_eq!(config.convert.code_language, "text");
        assert_eq!(config.convert.strip_chars(), Some(vec!['\u{200B}', 'x']));
        assert_eq!(config.editor.placeholder, "# edit me");
        assert_eq!(config.languages.extra, vec!["mermaid".to_owned(), "hcl".to_owned()]);
    }

    #[test]
    fn test_load_resolves_store_relative_to_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "[store]\npath = \"notes/blocks.json\"\n");

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.store_path, Some(dir.path().join("notes/blocks.json")));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_expands_store_path() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            dir.path(),
            "[store]\npath = \"${CODETABS_TEST_NO_SUCH_DIR:-/data}/blocks.json\"\n",
        );

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.store_path, Some(PathBuf::from("/data/blocks.json")));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(Some(&dir.path().join("missing.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "[render\n");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_strip_chars_must_be_single_characters() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "[convert]\nstrip_chars = [\"ab\"]\n");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(err.to_string().contains("convert.strip_chars"));
    }

    #[test]
    fn test_code_language_must_be_single_word() {
        let config: Config = toml::from_str("[convert]\ncode_language = \"a b\"\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_empty_placeholder_rejected() {
        let config: Config = toml::from_str("[editor]\nplaceholder = \" \"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_discover_from_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "");
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(Config::discover_from(&nested), Some(path));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        let overrides = CliSettings {
            store_path: Some(PathBuf::from("/tmp/doc.json")),
            highlight: Some(false),
            code_language: Some("md".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.require_store_path().unwrap(), Path::new("/tmp/doc.json"));
        assert!(!config.render.highlight);
        assert!(config.render.markdown); // Unchanged
        assert_eq!(config.convert.code_language, "md");
    }

    #[test]
    fn test_require_store_path_unset() {
        let err = Config::default().require_store_path().unwrap_err();
        assert!(err.to_string().contains("store.path"));
    }
}
