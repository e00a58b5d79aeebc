//! Integration tests for Settings config loading.
//!
//! These tests pass an explicit global config path (temp directories only),
//! so the user's real config is never read.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use xmldoc::config::{ConfigLoadError, Settings};

#[test]
fn given_global_config_when_load_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("xmldoc.toml");
    fs::write(&path, "source_file = \"docs/main.xml\"\nrender_tree = true\n").unwrap();

    // Act
    let settings = Settings::load_from(Some(&path)).expect("load settings");

    // Assert
    assert_eq!(settings.source_file, PathBuf::from("docs/main.xml"));
    assert!(settings.render_tree);
}

#[test]
fn given_partial_global_config_when_load_then_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("xmldoc.toml");
    fs::write(&path, "render_tree = true\n").unwrap();

    let settings = Settings::load_from(Some(&path)).unwrap();

    assert_eq!(settings.source_file, PathBuf::from("test_xml.xml"));
    assert!(settings.render_tree);
}

#[test]
fn given_nonexistent_global_config_when_load_then_uses_defaults() {
    let dir = TempDir::new().unwrap();

    let settings = Settings::load_from(Some(&dir.path().join("missing.toml"))).unwrap();

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_invalid_toml_when_load_then_parse_error_names_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("xmldoc.toml");
    fs::write(&path, "render_tree = [not toml").unwrap();

    let err = Settings::load_from(Some(&path)).unwrap_err();

    assert!(matches!(err, ConfigLoadError::Parse { .. }));
    assert!(err.to_string().contains("xmldoc.toml"));
}
