// tests/config_test.rs
use std::io::Write;

use conventional_gate::config::{load_config, ClassificationConfig, Config, CONFIG_FILE_NAME};
use serial_test::serial;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert!(config.commits.types.contains(&"feat".to_string()));
    assert_eq!(config.commits.feature_types, vec!["feat"]);
    assert_eq!(config.commits.fix_types, vec!["fix"]);
    assert_eq!(config.commits.commit_limit, 250);
    assert!(config.commits.strict);
    assert!(config.title.scopes.is_none());
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[commits]
types = ["feat", "fix", "chore"]
fix_types = ["fix", "perf"]
commit_limit = 100
strict = false

[title]
scopes = ["core", "ui"]
require_scope = true
subject_pattern = "^[A-Z].*$"
subject_pattern_error = "Subject '{subject}' must start with a capital letter"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.commits.types, vec!["feat", "fix", "chore"]);
    assert_eq!(config.commits.fix_types, vec!["fix", "perf"]);
    assert_eq!(config.commits.feature_types, vec!["feat"]);
    assert_eq!(config.commits.commit_limit, 100);
    assert!(!config.commits.strict);
    assert_eq!(
        config.title.scopes,
        Some(vec!["core".to_string(), "ui".to_string()])
    );
    assert!(config.title.require_scope);

    let resolved = ClassificationConfig::from_config(&config).unwrap();
    assert!(resolved.subject_pattern.is_some());
    assert!(resolved.is_recognized_type("chore"));
    assert!(!resolved.is_recognized_type("docs"));
}

#[test]
fn test_invalid_toml_is_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[commits\nstrict = ").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn test_missing_explicit_path_is_error() {
    assert!(load_config(Some("/nonexistent/conventional-gate.toml")).is_err());
}

#[test]
fn test_invalid_subject_pattern_rejected() {
    let mut config = Config::default();
    config.title.subject_pattern = Some("([unclosed".to_string());
    let err = ClassificationConfig::from_config(&config).unwrap_err();
    assert!(err.to_string().contains("Invalid subject_pattern"));
}

#[test]
fn test_zero_commit_limit_rejected() {
    let mut config = Config::default();
    config.commits.commit_limit = 0;
    assert!(ClassificationConfig::from_config(&config).is_err());
}

#[test]
#[serial]
fn test_discovers_config_in_working_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[commits]\ncommit_limit = 42\n",
    )
    .unwrap();

    let original = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let loaded = load_config(None);
    std::env::set_current_dir(original).unwrap();

    assert_eq!(loaded.unwrap().commits.commit_limit, 42);
}
