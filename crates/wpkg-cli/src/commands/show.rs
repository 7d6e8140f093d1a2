//! `wpkg show`: every field of one plugin descriptor.
//!
//! The plugin is given either as a basename (`akismet/akismet.php`) or as a
//! slug (`akismet`). Basenames resolve without scanning, so an uninstalled
//! plugin can still be described; slugs are looked up among installed
//! plugins.

use crate::commands::is_invalid_input;
use crate::formatters::format_output;
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{error, info, warn};
use wpkg_core::cli::{ExitCode, OutputFormat};
use wpkg_core::{Package, PackageType, RepositoryConfig};
use wpkg_plugin::{PluginDescriptor, PluginDirectory, PluginHeaders};

/// Full description of one plugin.
#[derive(Debug, Serialize)]
pub struct ShowResult {
    /// Main file relative to the plugins root
    pub basename: String,
    /// Derived slug
    pub slug: String,
    /// Composer package name
    pub package: String,
    /// Package kind
    #[serde(rename = "type")]
    pub package_type: PackageType,
    /// Absolute path of the main file
    pub file: String,
    /// Plugin directory, or the main file for single-file plugins
    pub path: String,
    /// Whether the main file exists
    pub installed: bool,
    /// `Plugin Name` header
    pub name: String,
    /// `Version` header
    pub version: String,
    /// `Author` header
    pub author: String,
    /// `Author URI` header
    pub author_uri: String,
    /// `Description` header
    pub description: String,
    /// `Plugin URI` header
    pub homepage: String,
    /// Every header that was read
    pub headers: PluginHeaders,
}

impl ShowResult {
    fn new(plugin: &PluginDescriptor, vendor: &str) -> Self {
        Self {
            basename: plugin.basename().to_string(),
            slug: plugin.slug().to_string(),
            package: plugin.package_name(vendor),
            package_type: plugin.package_type(),
            file: plugin.file().display().to_string(),
            path: plugin.path().display().to_string(),
            installed: plugin.is_installed(),
            name: plugin.name().to_string(),
            version: plugin.version().to_string(),
            author: plugin.author().to_string(),
            author_uri: plugin.author_uri().to_string(),
            description: plugin.description().to_string(),
            homepage: plugin.homepage().to_string(),
            headers: plugin.headers().clone(),
        }
    }
}

/// Resolves `plugin` as a basename if it ends in `.php`, else as a slug.
///
/// # Errors
///
/// Returns an error if the basename is invalid or, for slugs, the plugins
/// root cannot be scanned.
pub fn resolve(directory: &PluginDirectory, plugin: &str) -> Result<Option<PluginDescriptor>> {
    if plugin.ends_with(".php") {
        let descriptor = directory
            .descriptor(plugin)
            .with_context(|| format!("invalid plugin basename '{plugin}'"))?;
        return Ok(Some(descriptor));
    }

    directory
        .find(plugin)
        .with_context(|| format!("failed to look up plugin '{plugin}'"))
}

/// Describes one plugin, or returns `None` if no plugin has that slug.
///
/// # Errors
///
/// Same as [`resolve`].
pub fn show_plugin(config: &RepositoryConfig, plugin: &str) -> Result<Option<ShowResult>> {
    let directory = PluginDirectory::from_config(config);
    let result = resolve(&directory, plugin)?.map(|p| ShowResult::new(&p, &config.vendor));
    Ok(result)
}

/// Runs the show command.
///
/// Exits with [`ExitCode::NOT_INSTALLED`] when the plugin is not installed
/// and [`ExitCode::INVALID_INPUT`] when `plugin` is not a valid basename.
///
/// # Errors
///
/// Returns an error if scanning or formatting fails.
pub fn run(config: &RepositoryConfig, plugin: &str, output_format: OutputFormat) -> Result<ExitCode> {
    info!("Showing plugin: {}", plugin);

    let result = match show_plugin(config, plugin) {
        Ok(result) => result,
        Err(e) if is_invalid_input(&e) => {
            error!("{e:#}");
            return Ok(ExitCode::INVALID_INPUT);
        }
        Err(e) => return Err(e),
    };

    let Some(result) = result else {
        warn!("No installed plugin with slug '{}'", plugin);
        return Ok(ExitCode::NOT_INSTALLED);
    };

    println!("{}", format_output(&result, output_format)?);

    if result.installed {
        Ok(ExitCode::SUCCESS)
    } else {
        warn!("Plugin '{}' is not installed", result.basename);
        Ok(ExitCode::NOT_INSTALLED)
    }
}
