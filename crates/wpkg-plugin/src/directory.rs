//! Enumeration of installed plugins.
//!
//! Plugins live directly under the plugins root:
//!
//! ```text
//! plugins/
//! ├── hello.php             # single-file plugin
//! ├── akismet/
//! │   ├── akismet.php       # main file, declares "Plugin Name"
//! │   └── class.akismet.php # no header, not a plugin
//! └── .cache/               # hidden, never scanned
//! ```
//!
//! A `.php` file directly in the root, or one level inside a subdirectory,
//! is a plugin when its headers declare a non-empty `Plugin Name`.
//! Symlinked plugin directories and files are followed; their basenames are
//! the link paths under the root, not the link targets.

use crate::descriptor::PluginDescriptor;
use crate::headers::{FileHeaderReader, HeaderField, HeaderReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};
use wpkg_core::{Error, RepositoryConfig, Result};

/// The plugins root and the reader used for the plugins found in it.
///
/// # Examples
///
/// ```no_run
/// use wpkg_plugin::PluginDirectory;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let directory = PluginDirectory::new("/var/www/html/wp-content/plugins");
///
/// for plugin in directory.scan()? {
///     println!("{} v{} ({})", plugin.name(), plugin.version(), plugin.slug());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PluginDirectory {
    root: PathBuf,
    reader: Arc<dyn HeaderReader>,
}

impl PluginDirectory {
    /// Creates a directory that reads plugin headers from disk.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_reader(root, Arc::new(FileHeaderReader::new()))
    }

    /// Creates a directory with a custom header reader.
    #[must_use]
    pub fn with_reader(root: impl Into<PathBuf>, reader: Arc<dyn HeaderReader>) -> Self {
        Self {
            root: root.into(),
            reader,
        }
    }

    /// Creates a directory for the configured plugins root.
    #[must_use]
    pub fn from_config(config: &RepositoryConfig) -> Self {
        Self::new(config.plugins_dir.clone())
    }

    /// The plugins root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Builds a descriptor for `basename` without scanning.
    ///
    /// The plugin does not have to be installed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBasename`] if `basename` is not a valid
    /// relative path.
    pub fn descriptor(&self, basename: &str) -> Result<PluginDescriptor> {
        PluginDescriptor::with_reader(&self.root, basename, Arc::clone(&self.reader))
    }

    /// Lists installed plugins, sorted by basename.
    ///
    /// Each returned descriptor already holds the headers read during the
    /// scan, so no file is read twice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PluginsRootNotFound`] if the root is not a directory.
    /// Unreadable entries and symlink loops below the root are skipped.
    pub fn scan(&self) -> Result<Vec<PluginDescriptor>> {
        if !self.root.is_dir() {
            return Err(Error::PluginsRootNotFound {
                path: self.root.clone(),
            });
        }

        let mut plugins = Vec::new();

        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(2)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", self.root.display(), e);
                    continue;
                }
            };

            if !entry.file_type().is_file() || !is_php(entry.path()) {
                continue;
            }

            let Some(basename) = relative_basename(&self.root, entry.path()) else {
                warn!("Skipping non UTF-8 path: {}", entry.path().display());
                continue;
            };

            let headers = self.reader.read_headers(entry.path());
            if headers.field(HeaderField::Name).is_empty() {
                debug!("Skipping {}: no plugin name header", basename);
                continue;
            }

            plugins.push(self.descriptor(&basename)?.with_headers(headers));
        }

        plugins.sort_by(|a, b| a.basename().cmp(b.basename()));

        debug!(
            "Found {} plugins in {}",
            plugins.len(),
            self.root.display()
        );

        Ok(plugins)
    }

    /// Finds the installed plugin whose slug is `slug`.
    ///
    /// When several plugins share a slug, the first by basename wins.
    ///
    /// # Errors
    ///
    /// Same as [`scan`](Self::scan).
    pub fn find(&self, slug: &str) -> Result<Option<PluginDescriptor>> {
        Ok(self.scan()?.into_iter().find(|p| p.slug() == slug))
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|s| s.starts_with('.'))
}

fn is_php(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "php")
}

/// Converts a path below `root` into a `/`-separated basename.
fn relative_basename(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let segments = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    Some(segments.join("/"))
}
