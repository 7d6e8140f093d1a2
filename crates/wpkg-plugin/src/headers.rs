//! Plugin header parsing.
//!
//! A plugin's main file declares its metadata in a leading comment block:
//!
//! ```php
//! <?php
//! /**
//!  * Plugin Name: Hello Dolly
//!  * Plugin URI:  https://example.org/hello-dolly
//!  * Description: A tiny plugin.
//!  * Author:      Matt
//!  * Version:     1.7.2
//!  */
//! ```
//!
//! Only the first [`DEFAULT_MAX_HEADER_BYTES`] bytes of the file are
//! inspected. Each header is matched on its own line, case-insensitively, and
//! its value is cut at the first `*/` or `?>`.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

/// Number of leading bytes scanned for headers.
pub const DEFAULT_MAX_HEADER_BYTES: u64 = 8 * 1024;

static FIELD_REGEXES: LazyLock<Vec<(HeaderField, Regex)>> = LazyLock::new(|| {
    HeaderField::ALL
        .iter()
        .map(|&field| {
            let pattern = format!(
                r"(?im)^(?:[ \t]*<\?php)?[ \t/*#@]*{}:(.*)$",
                regex::escape(field.label())
            );
            (field, Regex::new(&pattern).expect("valid regex"))
        })
        .collect()
});
static COMMENT_END_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(?:\*/|\?>).*").expect("valid regex"));

/// A header a plugin can declare.
///
/// Each field has a mapping [`key`](Self::key) used by [`PluginHeaders`] and
/// a [`label`](Self::label) as written in the plugin file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeaderField {
    /// `Plugin Name`
    Name,
    /// `Plugin URI`
    PluginUri,
    /// `Description`
    Description,
    /// `Author`
    Author,
    /// `Author URI`
    AuthorUri,
    /// `Version`
    Version,
    /// `Text Domain`
    TextDomain,
    /// `Domain Path`
    DomainPath,
    /// `Network`
    Network,
    /// `Requires at least`
    RequiresWp,
    /// `Requires PHP`
    RequiresPhp,
    /// `Update URI`
    UpdateUri,
}

impl HeaderField {
    /// Every known header field, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Name,
        Self::PluginUri,
        Self::Description,
        Self::Author,
        Self::AuthorUri,
        Self::Version,
        Self::TextDomain,
        Self::DomainPath,
        Self::Network,
        Self::RequiresWp,
        Self::RequiresPhp,
        Self::UpdateUri,
    ];

    /// Key of this field in a [`PluginHeaders`] mapping.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::PluginUri => "PluginURI",
            Self::Description => "Description",
            Self::Author => "Author",
            Self::AuthorUri => "AuthorURI",
            Self::Version => "Version",
            Self::TextDomain => "TextDomain",
            Self::DomainPath => "DomainPath",
            Self::Network => "Network",
            Self::RequiresWp => "RequiresWP",
            Self::RequiresPhp => "RequiresPHP",
            Self::UpdateUri => "UpdateURI",
        }
    }

    /// Header label as it appears in the plugin file.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Plugin Name",
            Self::PluginUri => "Plugin URI",
            Self::Description => "Description",
            Self::Author => "Author",
            Self::AuthorUri => "Author URI",
            Self::Version => "Version",
            Self::TextDomain => "Text Domain",
            Self::DomainPath => "Domain Path",
            Self::Network => "Network",
            Self::RequiresWp => "Requires at least",
            Self::RequiresPhp => "Requires PHP",
            Self::UpdateUri => "Update URI",
        }
    }

    /// Looks up a field by its mapping key (exact match).
    ///
    /// # Examples
    ///
    /// ```
    /// use wpkg_plugin::HeaderField;
    ///
    /// assert_eq!(HeaderField::from_key("AuthorURI"), Some(HeaderField::AuthorUri));
    /// assert_eq!(HeaderField::from_key("Author URI"), None);
    /// ```
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Header metadata of one plugin, keyed by [`HeaderField::key`].
///
/// Lookups through [`value`](Self::value) and [`field`](Self::field) return
/// an empty string for absent keys; use [`get`](Self::get) to tell an absent
/// key from an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PluginHeaders(BTreeMap<String, String>);

impl PluginHeaders {
    /// Creates an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Inserts a value, replacing any previous value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns the value for `key`, or `None` if the key is absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns the value for `key`, or `""` if the key is absent.
    #[must_use]
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }

    /// Returns the value of a known field, or `""` if it is absent.
    #[must_use]
    pub fn field(&self, field: HeaderField) -> &str {
        self.value(field.key())
    }

    /// Number of keys in the mapping.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the mapping has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PluginHeaders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Reads header metadata from a plugin's main file.
///
/// Implementations never fail: a missing, unreadable or header-less file
/// yields an empty (or partial) mapping.
pub trait HeaderReader: fmt::Debug + Send + Sync {
    /// Reads the headers of the file at `file`.
    fn read_headers(&self, file: &Path) -> PluginHeaders;
}

/// [`HeaderReader`] that parses the leading comment block of a file on disk.
#[derive(Debug, Clone, Copy)]
pub struct FileHeaderReader {
    max_bytes: u64,
}

impl Default for FileHeaderReader {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_HEADER_BYTES,
        }
    }
}

impl FileHeaderReader {
    /// Creates a reader that scans the first [`DEFAULT_MAX_HEADER_BYTES`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Changes how many leading bytes are scanned.
    #[must_use]
    pub const fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    fn read_prefix(&self, file: &Path) -> io::Result<String> {
        let mut buf = Vec::new();
        File::open(file)?.take(self.max_bytes).read_to_end(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl HeaderReader for FileHeaderReader {
    fn read_headers(&self, file: &Path) -> PluginHeaders {
        match self.read_prefix(file) {
            Ok(content) => {
                let headers = parse_headers(&content);
                debug!(
                    "Read headers from {}: name='{}'",
                    file.display(),
                    headers.field(HeaderField::Name)
                );
                headers
            }
            Err(e) => {
                debug!("No headers for {}: {}", file.display(), e);
                PluginHeaders::new()
            }
        }
    }
}

/// Parses plugin headers from file content.
///
/// Every [`HeaderField`] is present in the result; fields the content does
/// not declare map to `""`.
///
/// # Examples
///
/// ```
/// use wpkg_plugin::{HeaderField, parse_headers};
///
/// let headers = parse_headers("<?php\n/*\nPlugin Name: Demo\nVersion: 2.0 */\n");
/// assert_eq!(headers.field(HeaderField::Name), "Demo");
/// assert_eq!(headers.field(HeaderField::Version), "2.0");
/// assert_eq!(headers.field(HeaderField::Author), "");
/// ```
#[must_use]
pub fn parse_headers(content: &str) -> PluginHeaders {
    let content = content.replace('\r', "\n");

    FIELD_REGEXES
        .iter()
        .map(|(field, regex)| {
            let value = regex
                .captures(&content)
                .and_then(|c| c.get(1))
                .map(|m| cleanup_header_value(m.as_str()))
                .unwrap_or_default();
            (field.key(), value)
        })
        .collect()
}

fn cleanup_header_value(raw: &str) -> String {
    COMMENT_END_REGEX.replace(raw, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const HELLO_DOLLY: &str = r"<?php
/**
 * @package Hello_Dolly
 * @version 1.7.2
 */
/*
Plugin Name: Hello Dolly
Plugin URI: http://wordpress.org/plugins/hello-dolly/
Description: This is not just a plugin, it symbolizes the hope of an entire generation.
Author: Matt Mullenweg
Version: 1.7.2
Author URI: http://ma.tt/
*/
";

    #[test]
    fn test_parse_headers_complete() {
        let headers = parse_headers(HELLO_DOLLY);

        assert_eq!(headers.field(HeaderField::Name), "Hello Dolly");
        assert_eq!(
            headers.field(HeaderField::PluginUri),
            "http://wordpress.org/plugins/hello-dolly/"
        );
        assert!(
            headers
                .field(HeaderField::Description)
                .starts_with("This is not just a plugin")
        );
        assert_eq!(headers.field(HeaderField::Author), "Matt Mullenweg");
        assert_eq!(headers.field(HeaderField::AuthorUri), "http://ma.tt/");
        assert_eq!(headers.field(HeaderField::Version), "1.7.2");
    }

    #[test]
    fn test_parse_headers_fills_every_field() {
        let headers = parse_headers(HELLO_DOLLY);
        assert_eq!(headers.len(), HeaderField::ALL.len());
        assert_eq!(headers.get("TextDomain"), Some(""));
        assert_eq!(headers.field(HeaderField::RequiresPhp), "");
    }

    #[test]
    fn test_parse_headers_docblock_style() {
        let content = r"<?php
/**
 * Plugin Name:       Example
 * Requires at least: 6.2
 * Requires PHP:      8.1
 * Text Domain:       example
 * Domain Path:       /languages
 * Network:           true
 * Update URI:        https://updates.example.com/
 */
";
        let headers = parse_headers(content);
        assert_eq!(headers.field(HeaderField::Name), "Example");
        assert_eq!(headers.field(HeaderField::RequiresWp), "6.2");
        assert_eq!(headers.field(HeaderField::RequiresPhp), "8.1");
        assert_eq!(headers.field(HeaderField::TextDomain), "example");
        assert_eq!(headers.field(HeaderField::DomainPath), "/languages");
        assert_eq!(headers.field(HeaderField::Network), "true");
        assert_eq!(
            headers.field(HeaderField::UpdateUri),
            "https://updates.example.com/"
        );
    }

    #[test]
    fn test_parse_headers_case_insensitive_labels() {
        let headers = parse_headers("<?php\n// plugin name: lower\n// VERSION: 3\n");
        assert_eq!(headers.field(HeaderField::Name), "lower");
        assert_eq!(headers.field(HeaderField::Version), "3");
    }

    #[test]
    fn test_parse_headers_same_line_as_php_tag() {
        let headers = parse_headers("<?php /* Plugin Name: Inline */ ?>");
        assert_eq!(headers.field(HeaderField::Name), "Inline");
    }

    #[test]
    fn test_parse_headers_strips_comment_terminators() {
        let headers = parse_headers("/*\nVersion: 1.0.0 */\nAuthor: Jane ?> trailing\n");
        assert_eq!(headers.field(HeaderField::Version), "1.0.0");
        assert_eq!(headers.field(HeaderField::Author), "Jane");
    }

    #[test]
    fn test_parse_headers_carriage_returns() {
        let headers = parse_headers("<?php\r/*\rPlugin Name: Old Mac\rVersion: 9\r*/\r");
        assert_eq!(headers.field(HeaderField::Name), "Old Mac");
        assert_eq!(headers.field(HeaderField::Version), "9");

        let headers = parse_headers("<?php\r\n/*\r\nPlugin Name: Windows\r\n*/\r\n");
        assert_eq!(headers.field(HeaderField::Name), "Windows");
    }

    #[test]
    fn test_parse_headers_author_does_not_match_author_uri() {
        let headers = parse_headers("/*\nAuthor URI: https://a.example\n*/\n");
        assert_eq!(headers.field(HeaderField::Author), "");
        assert_eq!(headers.field(HeaderField::AuthorUri), "https://a.example");
    }

    #[test]
    fn test_parse_headers_first_match_wins() {
        let headers = parse_headers("/*\nVersion: 1\nVersion: 2\n*/\n");
        assert_eq!(headers.field(HeaderField::Version), "1");
    }

    #[test]
    fn test_parse_headers_no_header_block() {
        let headers = parse_headers("<?php\necho 'hello';\n");
        assert!(HeaderField::ALL.iter().all(|f| headers.field(*f).is_empty()));
    }

    #[test]
    fn test_plugin_headers_lookup() {
        let headers: PluginHeaders = [("Name", "Demo"), ("Version", "")].into_iter().collect();

        assert_eq!(headers.value("Name"), "Demo");
        assert_eq!(headers.get("Version"), Some(""));
        assert_eq!(headers.get("Author"), None);
        assert_eq!(headers.value("Author"), "");
        assert_eq!(headers.len(), 2);
        assert!(!headers.is_empty());
        assert!(PluginHeaders::new().is_empty());
    }

    #[test]
    fn test_header_field_keys_roundtrip() {
        for field in HeaderField::ALL {
            assert_eq!(HeaderField::from_key(field.key()), Some(field));
            assert_eq!(field.to_string(), field.key());
        }
        assert_eq!(HeaderField::from_key("name"), None);
    }

    #[test]
    fn test_file_reader_reads_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("hello.php");
        fs::write(&file, HELLO_DOLLY).unwrap();

        let headers = FileHeaderReader::new().read_headers(&file);
        assert_eq!(headers.field(HeaderField::Name), "Hello Dolly");
    }

    #[test]
    fn test_file_reader_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let headers = FileHeaderReader::new().read_headers(&temp.path().join("nope.php"));
        assert!(headers.is_empty());
        assert_eq!(headers.field(HeaderField::Name), "");
    }

    #[test]
    fn test_file_reader_respects_byte_limit() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("late.php");
        let content = format!("<?php\n{}\n/*\nPlugin Name: Late\n*/\n", "//\n".repeat(64));
        fs::write(&file, content).unwrap();

        let short = FileHeaderReader::new().with_max_bytes(32).read_headers(&file);
        assert_eq!(short.field(HeaderField::Name), "");

        let full = FileHeaderReader::new().read_headers(&file);
        assert_eq!(full.field(HeaderField::Name), "Late");
    }

    #[test]
    fn test_plugin_headers_serialize_as_map() {
        let headers: PluginHeaders = [("Name", "Demo")].into_iter().collect();
        let json = serde_json::to_string(&headers).unwrap();
        assert_eq!(json, r#"{"Name":"Demo"}"#);
    }
}
