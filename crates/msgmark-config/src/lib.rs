use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Appearance of formatted messages. Colours are `#RRGGBB` or `#AARRGGBB`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormattingConfig {
    /// Delimiter colour in edit mode, or `"none"` to delete delimiters.
    pub highlight: String,
    pub mention_color: String,
    pub code_background: String,
    pub bullet: String,
    pub quote_glyph: String,
    /// Messages longer than this many bytes are shown unformatted.
    pub max_input_len: usize,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            highlight: "#9E9E9E".to_string(),
            mention_color: "#1E88E5".to_string(),
            code_background: "#EEEEEE".to_string(),
            bullet: "• ".to_string(),
            quote_glyph: String::new(),
            max_input_len: 256 * 1024,
        }
    }
}

impl FormattingConfig {
    pub fn highlight_disabled(&self) -> bool {
        self.highlight.trim().eq_ignore_ascii_case("none")
    }
}

/// Paragraph layout for render mode. Indents in ems, line heights in sp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub list_indent_step: f32,
    pub list_indent_base: f32,
    pub list_rest_extra: f32,
    pub ordered_indent_step: f32,
    pub ordered_indent_base: f32,
    pub ordered_rest_extra: f32,
    pub quote_indent: f32,
    pub heading_line_heights: [f32; 5],
    pub default_line_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            list_indent_step: 0.8,
            list_indent_base: 0.4,
            list_rest_extra: 0.6,
            ordered_indent_step: 1.1,
            ordered_indent_base: 0.4,
            ordered_rest_extra: 1.05,
            quote_indent: 2.0,
            heading_line_heights: [27.0, 24.0, 21.0, 18.0, 18.0],
            default_line_height: 18.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub formatting: FormattingConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Loads the config at `path` (or the default location), falling back to
    /// defaults when no file exists.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let loaded = match path {
            Some(p) => Self::load_from_path(Self::expand_path(p).as_deref().unwrap_or(p))?,
            None => Self::load()?,
        };
        Ok(loaded.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/msgmark");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
