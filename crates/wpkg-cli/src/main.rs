//! wpkg command-line interface.
//!
//! Inspects the `WordPress` plugins a Composer repository would serve.
//!
//! # Architecture
//!
//! The CLI is organized around subcommands:
//! - `list` - Scan the plugins root and list every plugin found
//! - `show` - Describe one plugin by slug or basename
//! - `config` - Print the effective configuration
//! - `completions` - Generate shell completions
//!
//! # Examples
//!
//! ```bash
//! # List installed plugins
//! wpkg list --plugins-dir /srv/site/wp-content/plugins
//!
//! # Describe one plugin as JSON
//! wpkg show akismet/akismet.php --format json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wpkg_cli::commands;
use wpkg_core::RepositoryConfig;
use wpkg_core::cli::{ExitCode, OutputFormat};

/// Inspect `WordPress` plugins served as Composer packages.
#[derive(Parser, Debug)]
#[command(name = "wpkg")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    format: String,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, env = "WPKG_CONFIG")]
    config: Option<PathBuf>,

    /// Plugins root, overriding the configuration file
    #[arg(long, global = true, env = "WPKG_PLUGINS_DIR")]
    plugins_dir: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List installed plugins.
    ///
    /// Scans the plugins root one level deep and lists every PHP file
    /// carrying a `Plugin Name` header.
    List,

    /// Show every field of one plugin.
    ///
    /// Exits with status 1 if the plugin is not installed and 2 if the
    /// basename is invalid.
    ///
    /// # Examples
    ///
    /// ```bash
    /// wpkg show akismet
    /// wpkg show hello.php --format text
    /// ```
    Show {
        /// Plugin slug, or basename ending in `.php`
        plugin: String,
    },

    /// Print the effective configuration.
    Config,

    /// Generate shell completions.
    ///
    /// Generates completion scripts for various shells that can be
    /// sourced or saved to enable tab completion for this CLI.
    Completions {
        /// Target shell for completion generation
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.log_json);

    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(e) if commands::is_invalid_input(&e) => {
            eprintln!("Error: {e:#}");
            ExitCode::INVALID_INPUT
        }
        Err(e) => return Err(e),
    };

    std::process::exit(exit_code.as_i32());
}

/// Parses the output format and executes the command.
///
/// # Errors
///
/// Returns an error if the format is unknown or the command fails.
fn run(cli: &Cli) -> Result<ExitCode> {
    let output_format = cli
        .format
        .parse::<OutputFormat>()
        .context("invalid --format")?;

    execute_command(cli, output_format)
}

/// Initializes logging to stderr.
///
/// `RUST_LOG` applies unless `--verbose` forces the debug level.
fn init_logging(verbose: bool, json: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Executes the parsed command and returns its exit code.
///
/// # Errors
///
/// Returns an error if configuration cannot be resolved or the command fails.
fn execute_command(cli: &Cli, output_format: OutputFormat) -> Result<ExitCode> {
    let load_config = || -> Result<(PathBuf, RepositoryConfig)> {
        let path = commands::config::config_path(cli.config.as_deref())?;
        let config = commands::config::resolve_config(&path, cli.plugins_dir.clone())?;
        Ok((path, config))
    };

    match &cli.command {
        Commands::List => {
            let (_, config) = load_config()?;
            commands::list::run(&config, output_format)
        }
        Commands::Show { plugin } => {
            let (_, config) = load_config()?;
            commands::show::run(&config, plugin, output_format)
        }
        Commands::Config => {
            let (path, config) = load_config()?;
            commands::config::run(&path, config, output_format)
        }
        Commands::Completions { shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            commands::completions::run(*shell, &mut cmd)
        }
    }
}
