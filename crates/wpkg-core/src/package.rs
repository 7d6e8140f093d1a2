//! Package abstraction shared by every package kind the repository serves.

use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Kind of package exposed by the repository.
///
/// # Examples
///
/// ```
/// use wpkg_core::PackageType;
///
/// let kind = PackageType::Plugin;
/// assert_eq!(kind.as_str(), "plugin");
/// assert_eq!(kind.to_string(), "plugin");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum PackageType {
    /// A plugin installed under the plugins root.
    Plugin,
}

impl PackageType {
    /// Returns the identifier used in package names and API output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plugin => "plugin",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of an installed package.
///
/// Metadata accessors never fail: a field the package does not declare is
/// reported as an empty string.
pub trait Package: Send + Sync {
    /// Kind of package.
    fn package_type(&self) -> PackageType;

    /// Path of the package's main file relative to its root directory.
    fn basename(&self) -> &str;

    /// Identifier-safe token derived from the basename.
    fn slug(&self) -> &str;

    /// Absolute path of the package's main file.
    fn file(&self) -> &Path;

    /// Directory holding the package, or the main file for single-file packages.
    fn path(&self) -> &Path;

    /// Whether the main file currently exists on disk.
    fn is_installed(&self) -> bool;

    /// Display name.
    fn name(&self) -> &str;

    /// Installed version.
    fn version(&self) -> &str;

    /// Author name.
    fn author(&self) -> &str;

    /// Author homepage.
    fn author_uri(&self) -> &str;

    /// Short description.
    fn description(&self) -> &str;

    /// Package homepage.
    fn homepage(&self) -> &str;

    /// Composer package name, `{vendor}/{slug}`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::path::Path;
    /// # use wpkg_core::{Package, PackageType};
    /// # struct Fixed;
    /// # impl Package for Fixed {
    /// #     fn package_type(&self) -> PackageType { PackageType::Plugin }
    /// #     fn basename(&self) -> &str { "akismet/akismet.php" }
    /// #     fn slug(&self) -> &str { "akismet" }
    /// #     fn file(&self) -> &Path { Path::new("/p/akismet/akismet.php") }
    /// #     fn path(&self) -> &Path { Path::new("/p/akismet") }
    /// #     fn is_installed(&self) -> bool { false }
    /// #     fn name(&self) -> &str { "" }
    /// #     fn version(&self) -> &str { "" }
    /// #     fn author(&self) -> &str { "" }
    /// #     fn author_uri(&self) -> &str { "" }
    /// #     fn description(&self) -> &str { "" }
    /// #     fn homepage(&self) -> &str { "" }
    /// # }
    /// assert_eq!(Fixed.package_name("acme"), "acme/akismet");
    /// ```
    fn package_name(&self, vendor: &str) -> String {
        format!("{vendor}/{}", self.slug())
    }
}
