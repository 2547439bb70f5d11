//! Configuration management for rw-head.
//!
//! Parses `head.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! ```toml
//! [defaults]
//! charset = "UTF-8"
//! viewport = "width=device-width, initial-scale=1"
//!
//! [markup]
//! void_style = "html"  # or "self-closing"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Bare `$VAR` text is never expanded.
//!
//! Expanded fields:
//! - `defaults.charset`
//! - `defaults.viewport`

mod expand;

use std::path::{Path, PathBuf};

use rw_head::{DEFAULT_CHARSET, DEFAULT_VIEWPORT, RenderOptions, VoidStyle};
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "head.toml";

/// Head rendering configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HeadConfig {
    /// Values for tags injected when descriptors do not supply them.
    pub defaults: DefaultsConfig,
    /// Markup output configuration.
    pub markup: MarkupConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Injected default tag configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Value of the default `<meta charset>`.
    pub charset: String,
    /// Content of the default `<meta name="viewport">`.
    pub viewport: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            charset: DEFAULT_CHARSET.to_owned(),
            viewport: DEFAULT_VIEWPORT.to_owned(),
        }
    }
}

/// Markup output configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    /// How void elements (`meta`, `link`, `base`) are closed.
    pub void_style: VoidStyle,
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
        /// Config field path (e.g., "`defaults.charset`").
        field: String,
        /// Error message (e.g., "${`HEAD_CHARSET`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl HeadConfig {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `head.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing, expansion or validation fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }

        let discovered = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd));
        match discovered {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.validate()?;
        Ok(config)
    }

    /// Render options described by this configuration.
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            charset: self.defaults.charset.clone(),
            viewport: self.defaults.viewport.clone(),
            void_style: self.markup.void_style,
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.defaults.charset, "defaults.charset")?;
        require_non_empty(&self.defaults.viewport, "defaults.viewport")?;
        Ok(())
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
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

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::debug!(path = %path.display(), "Loading head config");
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.defaults.charset = expand::expand_env(&self.defaults.charset, "defaults.charset")?;
        self.defaults.viewport =
            expand::expand_env(&self.defaults.viewport, "defaults.viewport")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = HeadConfig::default();
        assert_eq!(config.defaults.charset, "UTF-8");
        assert_eq!(
            config.defaults.viewport,
            "width=device-width, initial-scale=1"
        );
        assert_eq!(config.markup.void_style, VoidStyle::Html);
        assert!(config.config_path.is_none());
        assert_eq!(config.render_options(), RenderOptions::default());
    }

    #[test]
    fn test_parse_empty_config() {
        let config = HeadConfig::from_toml_str("").unwrap();
        assert_eq!(config.render_options(), RenderOptions::default());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[defaults]
charset = "utf-8"
viewport = "width=device-width"

[markup]
void_style = "self-closing"
"#;
        let config = HeadConfig::from_toml_str(toml).unwrap();
        assert_eq!(
            config.render_options(),
            RenderOptions {
                charset: "utf-8".to_owned(),
                viewport: "width=device-width".to_owned(),
                void_style: VoidStyle::SelfClosing,
            }
        );
    }

    #[test]
    fn test_parse_partial_defaults() {
        let toml = r#"
[defaults]
charset = "ISO-8859-1"
"#;
        let config = HeadConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.defaults.charset, "ISO-8859-1");
        assert_eq!(config.defaults.viewport, DEFAULT_VIEWPORT);
    }

    #[test]
    fn test_parse_invalid_void_style() {
        let toml = r#"
[markup]
void_style = "xhtml-ish"
"#;
        let result = HeadConfig::from_toml_str(toml);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validate_empty_charset() {
        let toml = r#"
[defaults]
charset = ""
"#;
        let err = HeadConfig::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("defaults.charset"));
    }

    #[test]
    fn test_validate_blank_viewport() {
        let toml = r#"
[defaults]
viewport = "   "
"#;
        let err = HeadConfig::from_toml_str(toml).unwrap_err();
        assert!(err.to_string().contains("defaults.viewport"));
    }

    #[test]
    fn test_expand_env_vars_charset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("RW_HEAD_CONFIG_CHARSET", "windows-1252");
        }

        let toml = r#"
[defaults]
charset = "${RW_HEAD_CONFIG_CHARSET}"
"#;
        let config = HeadConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.defaults.charset, "windows-1252");

        unsafe {
            std::env::remove_var("RW_HEAD_CONFIG_CHARSET");
        }
    }

    #[test]
    fn test_expand_env_vars_missing() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("RW_HEAD_CONFIG_MISSING");
        }

        let toml = r#"
[defaults]
viewport = "${RW_HEAD_CONFIG_MISSING}"
"#;
        let err = HeadConfig::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
    }

    #[test]
    fn test_expand_env_vars_leaves_bare_dollar() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("RW_HEAD_CONFIG_WIDTH", "640");
        }

        let toml = r#"
[defaults]
viewport = "width=${RW_HEAD_CONFIG_WIDTH}, label=$HOME"
"#;
        let config = HeadConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.defaults.viewport, "width=640, label=$HOME");

        unsafe {
            std::env::remove_var("RW_HEAD_CONFIG_WIDTH");
        }
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[markup]\nvoid_style = \"self-closing\"\n").unwrap();

        let config = HeadConfig::load(Some(&path)).unwrap();
        assert_eq!(config.markup.void_style, VoidStyle::SelfClosing);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_explicit_path_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = HeadConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("site").join("pages");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        let found = HeadConfig::discover_config(&nested).unwrap();
        assert_eq!(found, dir.path().join(CONFIG_FILENAME));
    }

    #[test]
    fn test_discover_config_prefers_nearest() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("site");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();
        std::fs::write(nested.join(CONFIG_FILENAME), "").unwrap();

        let found = HeadConfig::discover_config(&nested).unwrap();
        assert_eq!(found, nested.join(CONFIG_FILENAME));
    }
}
