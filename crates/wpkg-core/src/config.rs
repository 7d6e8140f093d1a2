//! Repository configuration.
//!
//! Configuration is stored in TOML format at:
//! - Linux: `~/.config/wpkg/config.toml`
//! - macOS: `~/Library/Application Support/wpkg/config.toml`
//! - Windows: `%APPDATA%\wpkg\config.toml`
//!
//! ```toml
//! plugins_dir = "/var/www/html/wp-content/plugins"
//! vendor = "wpkg"
//! ```
//!
//! The plugins root is injected into every descriptor from here; nothing in
//! the workspace reads it from global state.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default Composer vendor prefix for package names.
pub const DEFAULT_VENDOR: &str = "wpkg";

const DEFAULT_PLUGINS_DIR: &str = "/var/www/html/wp-content/plugins";

/// Configuration of the package repository.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use wpkg_core::RepositoryConfig;
///
/// let config = RepositoryConfig::from_toml_str(
///     r#"
/// plugins_dir = "/srv/site/wp-content/plugins"
/// vendor = "acme"
/// "#,
/// )?;
///
/// assert_eq!(config.plugins_dir, Path::new("/srv/site/wp-content/plugins"));
/// assert_eq!(config.vendor, "acme");
/// # Ok::<(), wpkg_core::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Absolute path of the plugins root.
    ///
    /// Every plugin basename is resolved against this directory.
    pub plugins_dir: PathBuf,

    /// Composer vendor prefix used when naming packages.
    pub vendor: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            plugins_dir: PathBuf::from(DEFAULT_PLUGINS_DIR),
            vendor: DEFAULT_VENDOR.to_string(),
        }
    }
}

impl RepositoryConfig {
    /// Returns the platform-specific default configuration file path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the platform has no configuration
    /// directory.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| Error::ConfigError {
            message: "failed to determine config directory".to_string(),
        })?;

        Ok(config_dir.join("wpkg").join("config.toml"))
    }

    /// Loads configuration from `path`, or returns defaults if the file does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// fails [`validate`](Self::validate).
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!("Loaded config from {}", path.display());

        Ok(config)
    }

    /// Parses and validates configuration from a TOML string.
    ///
    /// Missing keys take their default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid TOML or the resulting
    /// configuration fails [`validate`](Self::validate).
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::ConfigError {
            message: format!("failed to serialize config: {e}"),
        })
    }

    /// Replaces the plugins root.
    #[must_use]
    pub fn with_plugins_dir(mut self, plugins_dir: impl Into<PathBuf>) -> Self {
        self.plugins_dir = plugins_dir.into();
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if:
    /// - `plugins_dir` is empty or relative
    /// - `vendor` is empty or contains characters other than lowercase
    ///   ASCII letters, digits, `-`, `_` and `.`
    ///
    /// # Examples
    ///
    /// ```
    /// use wpkg_core::RepositoryConfig;
    ///
    /// let config = RepositoryConfig::default();
    /// assert!(config.validate().is_ok());
    ///
    /// let relative = config.with_plugins_dir("wp-content/plugins");
    /// assert!(relative.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.plugins_dir.as_os_str().is_empty() {
            return Err(Error::ConfigError {
                message: "plugins_dir cannot be empty".to_string(),
            });
        }

        if !self.plugins_dir.is_absolute() {
            return Err(Error::ConfigError {
                message: format!(
                    "plugins_dir must be an absolute path, got '{}'",
                    self.plugins_dir.display()
                ),
            });
        }

        if self.vendor.is_empty() {
            return Err(Error::ConfigError {
                message: "vendor cannot be empty".to_string(),
            });
        }

        if !self
            .vendor
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.'))
        {
            return Err(Error::ConfigError {
                message: format!(
                    "invalid vendor '{}' (allowed: a-z, 0-9, -, _, .)",
                    self.vendor
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = RepositoryConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.vendor, DEFAULT_VENDOR);
        assert!(config.plugins_dir.is_absolute());
    }

    #[test]
    fn test_from_toml_str_partial_uses_defaults() {
        let config = RepositoryConfig::from_toml_str(r#"vendor = "acme""#).unwrap();
        assert_eq!(config.vendor, "acme");
        assert_eq!(config.plugins_dir, PathBuf::from(DEFAULT_PLUGINS_DIR));
    }

    #[test]
    fn test_from_toml_str_rejects_relative_dir() {
        let err = RepositoryConfig::from_toml_str(r#"plugins_dir = "plugins""#).unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("absolute"));
    }

    #[test]
    fn test_from_toml_str_rejects_bad_vendor() {
        assert!(RepositoryConfig::from_toml_str(r#"vendor = """#).is_err());
        assert!(RepositoryConfig::from_toml_str(r#"vendor = "Acme Corp""#).is_err());
        assert!(RepositoryConfig::from_toml_str(r#"vendor = "acme/corp""#).is_err());
    }

    #[test]
    fn test_from_toml_str_invalid_toml() {
        let err = RepositoryConfig::from_toml_str("plugins_dir = ").unwrap_err();
        assert!(matches!(err, Error::TomlParse(_)));
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let temp = TempDir::new().unwrap();
        let config = RepositoryConfig::load(&temp.path().join("absent.toml")).unwrap();
        assert_eq!(config, RepositoryConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "plugins_dir = \"/srv/plugins\"\nvendor = \"team-a\"\n",
        )
        .unwrap();

        let config = RepositoryConfig::load(&path).unwrap();
        assert_eq!(config.plugins_dir, PathBuf::from("/srv/plugins"));
        assert_eq!(config.vendor, "team-a");
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = RepositoryConfig::default().with_plugins_dir("/srv/plugins");
        let toml_str = config.to_toml_string().unwrap();
        let parsed = RepositoryConfig::from_toml_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_default_path_ends_with_config_toml() {
        if let Ok(path) = RepositoryConfig::default_path() {
            assert!(path.ends_with("wpkg/config.toml"));
        }
    }
}
