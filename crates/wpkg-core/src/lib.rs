//! Core types, configuration, and errors for wpkg.
//!
//! This crate provides the foundational types shared by every crate in the
//! wpkg workspace, a private Composer-style package repository for
//! `WordPress` plugins.
//!
//! # Architecture
//!
//! The core consists of:
//! - Error hierarchy with contextual information
//! - Repository configuration loaded from TOML
//! - The [`Package`] trait and [`PackageType`] shared by package kinds
//! - CLI value types (`OutputFormat`, `ExitCode`)
//!
//! # Examples
//!
//! ```
//! use wpkg_core::{PackageType, RepositoryConfig};
//!
//! let config = RepositoryConfig::from_toml_str(
//!     r#"plugins_dir = "/var/www/wp-content/plugins""#,
//! )?;
//! assert_eq!(config.vendor, "wpkg");
//! assert_eq!(PackageType::Plugin.as_str(), "plugin");
//! # Ok::<(), wpkg_core::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod cli;
mod config;
mod error;
mod package;

pub use config::{DEFAULT_VENDOR, RepositoryConfig};
pub use error::{Error, Result};
pub use package::{Package, PackageType};
