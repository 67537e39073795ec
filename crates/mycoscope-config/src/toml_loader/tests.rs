//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_mycoscope_config.toml"));
    let err = result.unwrap_err();
    assert!(matches!(err, mycoscope_common::ConfigError::FileNotFound(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[backend]
base_url = "https://research.example.org"

[research]
filters = ["mycology", "medical"]
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.backend.base_url, "https://research.example.org");
    assert_eq!(config.research.filters, vec!["mycology", "medical"]);
    // Defaults preserved
    assert_eq!(config.research.tone, "objective");
    assert_eq!(config.session.keepalive_interval, 30);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, mycoscope_common::ConfigError::ParseError(_)));
}

#[test]
fn load_config_with_invalid_values_is_returned_as_parsed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[session]
keepalive_interval = 0
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.session.keepalive_interval, 0);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mycoscope").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.backend.base_url, "http://localhost:8000");
    assert_eq!(config.session.wire_format, "envelope");
}

#[test]
fn default_config_toml_is_valid() {
    use super::template::default_config_toml;
    use crate::schema::MycoscopeConfig;

    let config: MycoscopeConfig = toml::from_str(&default_config_toml()).unwrap();
    assert!(crate::validation::validate(&config).is_ok());
}

#[test]
fn default_config_path_is_reasonable() {
    // Not every CI environment has a config dir.
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("mycoscope"));
        assert!(path_str.ends_with("config.toml"));
    }
}

#[test]
fn directory_in_place_of_file_is_not_reported_missing() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_from_path(dir.path()).unwrap_err();
    assert!(matches!(err, mycoscope_common::ConfigError::ParseError(_)));
}
