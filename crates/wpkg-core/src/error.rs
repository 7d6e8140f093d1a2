//! Error types for wpkg.
//!
//! Every library crate in the workspace reports failures through the single
//! [`Error`] enum defined here. Note that reading plugin metadata never
//! produces an error: a missing file or header is a normal data state, not a
//! failure.
//!
//! # Examples
//!
//! ```
//! use wpkg_core::{Error, Result};
//!
//! fn require_vendor(vendor: &str) -> Result<()> {
//!     if vendor.is_empty() {
//!         return Err(Error::ConfigError {
//!             message: "vendor cannot be empty".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = require_vendor("").unwrap_err();
//! assert!(err.is_config_error());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for wpkg.
#[derive(Error, Debug)]
pub enum Error {
    /// Plugin basename is not a usable relative path.
    ///
    /// Basenames must be non-empty, relative, and free of `.`/`..`
    /// components so they always resolve inside the plugins root.
    #[error("Invalid plugin basename '{basename}': {reason}")]
    InvalidBasename {
        /// The rejected basename
        basename: String,
        /// Why the basename was rejected
        reason: String,
    },

    /// The plugins root directory does not exist.
    #[error("Plugins directory not found: {}", path.display())]
    PluginsRootNotFound {
        /// The configured plugins root
        path: PathBuf,
    },

    /// Configuration error.
    ///
    /// Raised when configuration is invalid or missing required fields.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Invalid argument error.
    ///
    /// Raised when CLI arguments or function parameters are invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O error from filesystem operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML configuration could not be parsed.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Returns `true` if this is a configuration error.
    ///
    /// Parse failures of the configuration file count as configuration
    /// errors too.
    ///
    /// # Examples
    ///
    /// ```
    /// use wpkg_core::Error;
    ///
    /// let err = Error::ConfigError {
    ///     message: "plugins_dir must be absolute".to_string(),
    /// };
    /// assert!(err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. } | Self::TomlParse(_))
    }

    /// Returns `true` if this error was caused by invalid user input.
    ///
    /// # Examples
    ///
    /// ```
    /// use wpkg_core::Error;
    ///
    /// let err = Error::InvalidBasename {
    ///     basename: "../evil.php".to_string(),
    ///     reason: "must not contain '..'".to_string(),
    /// };
    /// assert!(err.is_invalid_input());
    /// ```
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidBasename { .. } | Self::InvalidArgument(_)
        )
    }

    /// Returns `true` if a required path was not found.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::PluginsRootNotFound { .. })
    }
}

/// Result type alias for wpkg operations.
pub type Result<T> = std::result::Result<T, Error>;
