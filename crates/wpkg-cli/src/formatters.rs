//! Output formatters for CLI commands.
//!
//! Every command builds a serializable result and hands it to
//! [`format_output`], so the three output modes stay consistent.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use wpkg_core::cli::OutputFormat;

/// Format data according to the specified output format.
///
/// # Errors
///
/// Returns an error if the data cannot be serialized.
///
/// # Examples
///
/// ```
/// use serde::Serialize;
/// use wpkg_cli::formatters::format_output;
/// use wpkg_core::cli::OutputFormat;
///
/// #[derive(Serialize)]
/// struct Summary {
///     slug: String,
///     version: String,
/// }
///
/// let summary = Summary {
///     slug: "akismet".to_string(),
///     version: "5.3".to_string(),
/// };
///
/// let output = format_output(&summary, OutputFormat::Text)?;
/// assert_eq!(output, "slug: akismet\nversion: 5.3");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Format data as pretty-printed JSON.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}

/// Plain text output formatting.
///
/// One `key: value` line per leaf. Nested keys are joined with `.` and array
/// elements are addressed by index, which keeps the output `grep`-friendly.
pub mod text {
    use super::{Result, Serialize, Value};

    /// Format data as `key: value` lines.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut lines = Vec::new();
        flatten(&value, "", &mut lines);
        Ok(lines.join("\n"))
    }

    fn flatten(value: &Value, prefix: &str, lines: &mut Vec<String>) {
        match value {
            Value::Object(map) => {
                for (key, val) in map {
                    flatten(val, &join_key(prefix, key), lines);
                }
            }
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    flatten(item, &join_key(prefix, &i.to_string()), lines);
                }
            }
            Value::String(s) => lines.push(leaf(prefix, s)),
            Value::Null => lines.push(leaf(prefix, "")),
            other => lines.push(leaf(prefix, &other.to_string())),
        }
    }

    fn join_key(prefix: &str, key: &str) -> String {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        }
    }

    fn leaf(key: &str, value: &str) -> String {
        if key.is_empty() {
            value.to_string()
        } else {
            format!("{key}: {value}")
        }
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use super::{Colorize, Result, Serialize, Value};

    /// Format data as colorized, indented output.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut out = String::new();
        write_value(&value, 0, &mut out);
        Ok(out.trim_end().to_string())
    }

    fn write_value(value: &Value, indent: usize, out: &mut String) {
        let pad = "  ".repeat(indent);

        match value {
            Value::Object(map) => {
                for (key, val) in map {
                    match val {
                        Value::Object(inner) if !inner.is_empty() => {
                            out.push_str(&format!("{pad}{}:\n", key.blue().bold()));
                            write_value(val, indent + 1, out);
                        }
                        Value::Array(items) if !items.is_empty() => {
                            out.push_str(&format!("{pad}{}:\n", key.blue().bold()));
                            write_value(val, indent + 1, out);
                        }
                        _ => out.push_str(&format!(
                            "{pad}{}: {}\n",
                            key.blue().bold(),
                            scalar(val)
                        )),
                    }
                }
            }
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if item.is_object() {
                        if i > 0 {
                            out.push('\n');
                        }
                        write_value(item, indent, out);
                    } else {
                        out.push_str(&format!("{pad}- {}\n", scalar(item)));
                    }
                }
            }
            other => out.push_str(&format!("{pad}{}\n", scalar(other))),
        }
    }

    fn scalar(value: &Value) -> String {
        match value {
            Value::Null => "-".dimmed().to_string(),
            Value::Bool(b) => b.to_string().yellow().to_string(),
            Value::Number(n) => n.to_string().cyan().to_string(),
            Value::String(s) if s.is_empty() => "-".dimmed().to_string(),
            Value::String(s) => s.green().to_string(),
            Value::Array(_) => "[]".to_string(),
            Value::Object(_) => "{}".to_string(),
        }
    }
}
