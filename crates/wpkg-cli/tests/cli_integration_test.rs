//! Integration tests for the config, list and show workflow.

use std::fs;
use tempfile::TempDir;
use wpkg_cli::commands::{config, list, show};
use wpkg_cli::formatters::format_output;
use wpkg_core::cli::OutputFormat;

fn site() -> TempDir {
    let temp = TempDir::new().unwrap();
    let plugins = temp.path().join("plugins");
    fs::create_dir_all(plugins.join("akismet")).unwrap();
    fs::write(
        plugins.join("akismet/akismet.php"),
        "<?php\n/**\n * Plugin Name: Akismet Anti-spam\n * Version: 5.3\n * Author: Automattic\n */\n",
    )
    .unwrap();
    fs::write(
        plugins.join("hello.php"),
        "<?php\n/*\nPlugin Name: Hello Dolly\nVersion: 1.7.2\n*/\n",
    )
    .unwrap();
    fs::write(
        temp.path().join("config.toml"),
        format!(
            "plugins_dir = \"{}\"\nvendor = \"acme\"\n",
            plugins.display()
        ),
    )
    .unwrap();
    temp
}

/// Configuration from a file drives the vendor used in package names.
#[test]
fn test_list_uses_config_file() {
    let temp = site();
    let cfg = config::resolve_config(&temp.path().join("config.toml"), None).unwrap();

    let result = list::list_plugins(&cfg).unwrap();
    let packages: Vec<_> = result.plugins.iter().map(|p| p.package.as_str()).collect();
    assert_eq!(packages, vec!["acme/akismet", "acme/hello"]);
}

/// `--plugins-dir` wins over the file.
#[test]
fn test_plugins_dir_override() {
    let temp = site();
    let other = TempDir::new().unwrap();
    let cfg = config::resolve_config(
        &temp.path().join("config.toml"),
        Some(other.path().to_path_buf()),
    )
    .unwrap();

    let result = list::list_plugins(&cfg).unwrap();
    assert_eq!(result.plugin_count, 0);
    assert_eq!(cfg.vendor, "acme");
}

#[test]
fn test_show_json_output() {
    let temp = site();
    let cfg = config::resolve_config(&temp.path().join("config.toml"), None).unwrap();

    let result = show::show_plugin(&cfg, "akismet").unwrap().unwrap();
    let output = format_output(&result, OutputFormat::Json).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(json["basename"], "akismet/akismet.php");
    assert_eq!(json["name"], "Akismet Anti-spam");
    assert_eq!(json["author"], "Automattic");
    assert_eq!(json["homepage"], "");
    assert_eq!(json["installed"], true);
    assert!(json["path"].as_str().unwrap().ends_with("akismet"));
}

#[test]
fn test_show_text_output() {
    let temp = site();
    let cfg = config::resolve_config(&temp.path().join("config.toml"), None).unwrap();

    let result = show::show_plugin(&cfg, "hello.php").unwrap().unwrap();
    let output = format_output(&result, OutputFormat::Text).unwrap();

    assert!(output.contains("slug: hello"));
    assert!(output.contains("headers.Version: 1.7.2"));
}
