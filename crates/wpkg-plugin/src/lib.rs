//! Installed plugin descriptors for the wpkg package repository.
//!
//! Each plugin is identified by its basename, the path of its main file
//! relative to the plugins root (`"akismet/akismet.php"`, `"hello.php"`).
//! A [`PluginDescriptor`] derives the plugin's slug and paths from that
//! basename and lazily reads the header block of the main file the first
//! time metadata is requested.
//!
//! # Architecture
//!
//! 1. `slug` - Converts names into identifier-safe slugs
//! 2. `headers` - Parses the leading comment block of a plugin file
//! 3. `descriptor` - One installed plugin, with cached header metadata
//! 4. `directory` - Enumerates the plugins installed under a root
//!
//! # Examples
//!
//! ```no_run
//! use wpkg_plugin::PluginDescriptor;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let plugin = PluginDescriptor::new("/var/www/html/wp-content/plugins", "akismet/akismet.php")?;
//!
//! if plugin.is_installed() {
//!     println!("{} {}", plugin.name(), plugin.version());
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod descriptor;
mod directory;
mod headers;
mod slug;

pub use descriptor::PluginDescriptor;
pub use directory::PluginDirectory;
pub use headers::{
    DEFAULT_MAX_HEADER_BYTES, FileHeaderReader, HeaderField, HeaderReader, PluginHeaders,
    parse_headers,
};
pub use slug::to_slug;
