//! Configuration resolution and the `wpkg config` command.
//!
//! The effective configuration is the TOML file (or defaults when it does
//! not exist) with `--plugins-dir` applied on top.

use crate::formatters::format_output;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use wpkg_core::RepositoryConfig;
use wpkg_core::cli::{ExitCode, OutputFormat};

/// Effective configuration and where it came from.
#[derive(Debug, Serialize)]
pub struct ConfigResult {
    /// Configuration file that was consulted
    pub config_file: String,
    /// Whether that file exists
    pub config_file_exists: bool,
    /// Effective settings
    #[serde(flatten)]
    pub config: RepositoryConfig,
}

/// Returns `explicit` or the platform default configuration path.
///
/// # Errors
///
/// Returns an error if no explicit path is given and the platform has no
/// configuration directory.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => RepositoryConfig::default_path().context("failed to determine config path"),
    }
}

/// Loads the configuration at `path` and applies the plugins directory
/// override.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or the resulting
/// configuration is invalid.
pub fn resolve_config(path: &Path, plugins_dir: Option<PathBuf>) -> Result<RepositoryConfig> {
    let mut config = RepositoryConfig::load(path)
        .with_context(|| format!("failed to load config from {}", path.display()))?;

    if let Some(dir) = plugins_dir {
        debug!("Overriding plugins_dir with {}", dir.display());
        config = config.with_plugins_dir(dir);
        config.validate().context("invalid --plugins-dir")?;
    }

    Ok(config)
}

/// Runs the config command.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub fn run(path: &Path, config: RepositoryConfig, output_format: OutputFormat) -> Result<ExitCode> {
    let result = ConfigResult {
        config_file: path.display().to_string(),
        config_file_exists: path.exists(),
        config,
    };

    println!("{}", format_output(&result, output_format)?);
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_path_explicit() {
        let path = config_path(Some(Path::new("/etc/wpkg.toml"))).unwrap();
        assert_eq!(path, PathBuf::from("/etc/wpkg.toml"));
    }

    #[test]
    fn test_resolve_config_defaults_when_missing() {
        let temp = TempDir::new().unwrap();
        let config = resolve_config(&temp.path().join("none.toml"), None).unwrap();
        assert_eq!(config, RepositoryConfig::default());
    }

    #[test]
    fn test_resolve_config_override() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "plugins_dir = \"/from/file\"\nvendor = \"acme\"\n").unwrap();

        let config = resolve_config(&path, Some(PathBuf::from("/from/flag"))).unwrap();
        assert_eq!(config.plugins_dir, PathBuf::from("/from/flag"));
        assert_eq!(config.vendor, "acme");
    }

    #[test]
    fn test_resolve_config_rejects_relative_override() {
        let temp = TempDir::new().unwrap();
        let err = resolve_config(&temp.path().join("none.toml"), Some(PathBuf::from("rel")))
            .unwrap_err();
        assert!(err.to_string().contains("--plugins-dir"));
    }

    #[test]
    fn test_resolve_config_invalid_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "vendor = [").unwrap();

        let err = resolve_config(&path, None).unwrap_err();
        assert!(err.to_string().contains("failed to load config"));
    }

    #[test]
    fn test_config_result_flattens_settings() {
        let result = ConfigResult {
            config_file: "/etc/wpkg.toml".to_string(),
            config_file_exists: false,
            config: RepositoryConfig::default(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["vendor"], "wpkg");
        assert_eq!(json["config_file_exists"], false);
    }
}
