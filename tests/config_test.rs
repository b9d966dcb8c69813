//! Integration tests for Settings config loading.
//!
//! These tests run without a global config (temp directories only), so they
//! exercise the explicit config file and env var layers over the defaults.

use std::fs;

use tempfile::TempDir;

use argresolve::config::Settings;

#[test]
fn given_explicit_config_when_load_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("argresolve.toml");
    fs::write(
        &path,
        r#"
env_prefix = "E2E"

[join]
joiner = "="
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(&path)).expect("load settings");

    // Assert
    assert_eq!(settings.env_prefix, "E2E");
    assert_eq!(settings.join.joiner, "=");
    assert_eq!(settings.join.prefix, "--", "unspecified keys keep defaults");
}

#[test]
fn given_missing_explicit_config_when_load_then_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.toml");

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(err.to_string().contains("config file not found"));
}

#[test]
fn given_malformed_config_when_load_then_errors_with_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "env_prefix = [unterminated").unwrap();

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn given_env_override_when_load_then_env_beats_file() {
    // Only this test touches ARGRESOLVE_UNDEFINED_SENTINEL
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("argresolve.toml");
    fs::write(&path, r#"undefined_sentinel = "from-file""#).unwrap();
    std::env::set_var("ARGRESOLVE_UNDEFINED_SENTINEL", "null");

    let settings = Settings::load(Some(&path)).expect("load settings");
    std::env::remove_var("ARGRESOLVE_UNDEFINED_SENTINEL");

    assert_eq!(settings.undefined_sentinel, "null");
}

#[test]
fn given_template_when_written_and_loaded_then_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("argresolve.toml");
    fs::write(&path, Settings::template()).unwrap();

    let settings = Settings::load(Some(&path)).expect("load template");

    assert_eq!(settings.env_prefix, "DETOX");
    assert!(settings.legacy_env_lookup);
}
