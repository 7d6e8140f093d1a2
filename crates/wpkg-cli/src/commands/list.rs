//! `wpkg list`: installed plugins under the plugins root.

use crate::formatters::format_output;
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;
use wpkg_core::cli::{ExitCode, OutputFormat};
use wpkg_core::{Package, RepositoryConfig};
use wpkg_plugin::{PluginDescriptor, PluginDirectory};

/// Result of listing plugins.
#[derive(Debug, Serialize)]
pub struct ListResult {
    /// Plugins root that was scanned
    pub plugins_dir: String,
    /// Number of plugins found
    pub plugin_count: usize,
    /// One entry per plugin, sorted by basename
    pub plugins: Vec<PluginSummary>,
}

/// Summary of a plugin for listing.
#[derive(Debug, Serialize)]
pub struct PluginSummary {
    /// Main file relative to the plugins root
    pub basename: String,
    /// Derived slug
    pub slug: String,
    /// Composer package name
    pub package: String,
    /// `Plugin Name` header
    pub name: String,
    /// `Version` header
    pub version: String,
}

impl PluginSummary {
    fn new(plugin: &PluginDescriptor, vendor: &str) -> Self {
        Self {
            basename: plugin.basename().to_string(),
            slug: plugin.slug().to_string(),
            package: plugin.package_name(vendor),
            name: plugin.name().to_string(),
            version: plugin.version().to_string(),
        }
    }
}

/// Scans the configured plugins root.
///
/// # Errors
///
/// Returns an error if the plugins root does not exist.
pub fn list_plugins(config: &RepositoryConfig) -> Result<ListResult> {
    let directory = PluginDirectory::from_config(config);
    let plugins = directory.scan().with_context(|| {
        format!(
            "failed to list plugins in {}",
            config.plugins_dir.display()
        )
    })?;

    info!("Found {} plugins", plugins.len());

    let plugins: Vec<PluginSummary> = plugins
        .iter()
        .map(|p| PluginSummary::new(p, &config.vendor))
        .collect();

    Ok(ListResult {
        plugins_dir: config.plugins_dir.display().to_string(),
        plugin_count: plugins.len(),
        plugins,
    })
}

/// Runs the list command.
///
/// # Errors
///
/// Returns an error if scanning or formatting fails.
pub fn run(config: &RepositoryConfig, output_format: OutputFormat) -> Result<ExitCode> {
    let result = list_plugins(config)?;
    println!("{}", format_output(&result, output_format)?);
    Ok(ExitCode::SUCCESS)
}
