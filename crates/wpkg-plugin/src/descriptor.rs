//! Descriptor for a single installed plugin.

use crate::headers::{FileHeaderReader, HeaderField, HeaderReader, PluginHeaders};
use crate::slug::to_slug;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use wpkg_core::{Error, Package, PackageType, Result};

/// One installed plugin, identified by its basename under a plugins root.
///
/// The slug and paths are derived at construction without touching the
/// filesystem. Header metadata is read through a [`HeaderReader`] on first
/// access and cached for the lifetime of the descriptor; later changes to
/// the file on disk are not observed.
///
/// # Thread Safety
///
/// `PluginDescriptor` is `Send + Sync`. Concurrent first accesses still
/// result in a single header read.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use wpkg_plugin::PluginDescriptor;
///
/// let plugin = PluginDescriptor::new("/plugins", "sample/sample.php")?;
///
/// assert_eq!(plugin.slug(), "sample");
/// assert_eq!(plugin.file(), Path::new("/plugins/sample/sample.php"));
/// assert_eq!(plugin.path(), Path::new("/plugins/sample"));
///
/// let solo = PluginDescriptor::new("/plugins", "solo.php")?;
/// assert_eq!(solo.slug(), "solo");
/// assert_eq!(solo.path(), Path::new("/plugins/solo.php"));
/// # Ok::<(), wpkg_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct PluginDescriptor {
    basename: String,
    slug: String,
    file: PathBuf,
    path: PathBuf,
    reader: Arc<dyn HeaderReader>,
    headers: OnceLock<PluginHeaders>,
}

impl PluginDescriptor {
    /// Creates a descriptor that reads headers from the plugin file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBasename`] if `basename` is empty, absolute,
    /// or contains empty, `.` or `..` segments.
    pub fn new(plugins_root: impl AsRef<Path>, basename: &str) -> Result<Self> {
        Self::with_reader(plugins_root, basename, Arc::new(FileHeaderReader::new()))
    }

    /// Creates a descriptor with a custom header reader.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn with_reader(
        plugins_root: impl AsRef<Path>,
        basename: &str,
        reader: Arc<dyn HeaderReader>,
    ) -> Result<Self> {
        validate_basename(basename)?;

        let plugins_root = plugins_root.as_ref();
        let file = plugins_root.join(basename);
        let path = match basename.rsplit_once('/') {
            Some((dir, _)) => plugins_root.join(dir),
            None => file.clone(),
        };

        Ok(Self {
            basename: basename.to_string(),
            slug: derive_slug(basename),
            file,
            path,
            reader,
            headers: OnceLock::new(),
        })
    }

    /// Seeds the header cache with headers that were already read.
    pub(crate) fn with_headers(mut self, headers: PluginHeaders) -> Self {
        self.headers = OnceLock::from(headers);
        self
    }

    /// Path of the main file relative to the plugins root.
    #[must_use]
    pub fn basename(&self) -> &str {
        &self.basename
    }

    /// Slug derived from the plugin's directory, or from the file stem for
    /// single-file plugins.
    ///
    /// Not guaranteed to match the slug the plugin is registered under
    /// elsewhere.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Always [`PackageType::Plugin`].
    #[must_use]
    pub const fn package_type(&self) -> PackageType {
        PackageType::Plugin
    }

    /// Absolute path of the main file.
    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Directory containing the main file.
    ///
    /// A plugin that is a single file directly in the plugins root has no
    /// directory of its own; its path is the main file itself.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the main file exists.
    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.file.is_file()
    }

    /// Whether header metadata has been loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.headers.get().is_some()
    }

    /// All header metadata, loading it on first call.
    #[must_use]
    pub fn headers(&self) -> &PluginHeaders {
        self.headers.get_or_init(|| {
            tracing::debug!("Loading headers for plugin: {}", self.basename);
            self.reader.read_headers(&self.file)
        })
    }

    /// Value of a header field, or `""` if the plugin does not declare it.
    #[must_use]
    pub fn data(&self, field: HeaderField) -> &str {
        self.headers().field(field)
    }

    /// Value of a header by mapping key (`"Name"`, `"PluginURI"`, ...), or
    /// `""` if absent.
    #[must_use]
    pub fn data_by_key(&self, key: &str) -> &str {
        self.headers().value(key)
    }

    /// `Plugin Name` header.
    #[must_use]
    pub fn name(&self) -> &str {
        self.data(HeaderField::Name)
    }

    /// `Author` header.
    #[must_use]
    pub fn author(&self) -> &str {
        self.data(HeaderField::Author)
    }

    /// `Author URI` header.
    #[must_use]
    pub fn author_uri(&self) -> &str {
        self.data(HeaderField::AuthorUri)
    }

    /// `Description` header.
    #[must_use]
    pub fn description(&self) -> &str {
        self.data(HeaderField::Description)
    }

    /// `Plugin URI` header.
    #[must_use]
    pub fn homepage(&self) -> &str {
        self.data(HeaderField::PluginUri)
    }

    /// `Version` header.
    #[must_use]
    pub fn version(&self) -> &str {
        self.data(HeaderField::Version)
    }

    /// `Text Domain` header.
    #[must_use]
    pub fn text_domain(&self) -> &str {
        self.data(HeaderField::TextDomain)
    }

    /// `Requires at least` header.
    #[must_use]
    pub fn requires_wp(&self) -> &str {
        self.data(HeaderField::RequiresWp)
    }

    /// `Requires PHP` header.
    #[must_use]
    pub fn requires_php(&self) -> &str {
        self.data(HeaderField::RequiresPhp)
    }
}

impl Package for PluginDescriptor {
    fn package_type(&self) -> PackageType {
        Self::package_type(self)
    }

    fn basename(&self) -> &str {
        Self::basename(self)
    }

    fn slug(&self) -> &str {
        Self::slug(self)
    }

    fn file(&self) -> &Path {
        Self::file(self)
    }

    fn path(&self) -> &Path {
        Self::path(self)
    }

    fn is_installed(&self) -> bool {
        Self::is_installed(self)
    }

    fn name(&self) -> &str {
        Self::name(self)
    }

    fn version(&self) -> &str {
        Self::version(self)
    }

    fn author(&self) -> &str {
        Self::author(self)
    }

    fn author_uri(&self) -> &str {
        Self::author_uri(self)
    }

    fn description(&self) -> &str {
        Self::description(self)
    }

    fn homepage(&self) -> &str {
        Self::homepage(self)
    }
}

/// Derives the slug: directory portion of the basename, or the file name
/// without `.php` when there is no directory.
fn derive_slug(basename: &str) -> String {
    let raw = match basename.rsplit_once('/') {
        Some((dir, _)) => dir,
        None => basename.strip_suffix(".php").unwrap_or(basename),
    };
    to_slug(raw)
}

/// Validates that a basename stays inside the plugins root.
fn validate_basename(basename: &str) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidBasename {
        basename: basename.to_string(),
        reason: reason.to_string(),
    };

    if basename.is_empty() {
        return Err(invalid("cannot be empty"));
    }

    if Path::new(basename).has_root() || basename.starts_with('/') {
        return Err(invalid("must be relative to the plugins directory"));
    }

    for segment in basename.split('/') {
        match segment {
            "" => return Err(invalid("contains an empty path segment")),
            "." | ".." => return Err(invalid("must not contain '.' or '..' segments")),
            _ => {}
        }
    }

    Ok(())
}
