use hearth_storage::{StorageConfig, StorageError};
use std::path::PathBuf;

#[test]
fn defaults() {
    let config = StorageConfig::default();
    assert_eq!(config.file_path, PathBuf::from("file.json"));
    assert!(!config.pretty);
}

#[test]
fn parses_storage_table() {
    let config = StorageConfig::from_toml_str(
        r#"
[storage]
file_path = "/var/lib/hearth/objects.json"
pretty = true
"#,
    )
    .unwrap();
    assert_eq!(config.file_path, PathBuf::from("/var/lib/hearth/objects.json"));
    assert!(config.pretty);
}

#[test]
fn missing_keys_keep_defaults() {
    let config = StorageConfig::from_toml_str("[storage]\npretty = true\n").unwrap();
    assert_eq!(config.file_path, PathBuf::from("file.json"));
    assert!(config.pretty);

    assert_eq!(StorageConfig::from_toml_str("").unwrap(), StorageConfig::default());
}

#[test]
fn malformed_toml_is_a_config_error() {
    let err = StorageConfig::from_toml_str("[storage\npretty = yes").unwrap_err();
    assert!(matches!(err, StorageError::Config(_)));
}

#[test]
fn wrong_type_is_a_config_error() {
    let err = StorageConfig::from_toml_str("[storage]\npretty = \"very\"\n").unwrap_err();
    assert!(matches!(err, StorageError::Config(_)));
}

#[test]
fn load_from_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig::load_from(dir.path().join("hearth.toml")).unwrap();
    assert_eq!(config, StorageConfig::default());
}

#[test]
fn load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hearth.toml");
    std::fs::write(&path, "[storage]\nfile_path = \"objects.json\"\n").unwrap();

    let config = StorageConfig::load_from(&path).unwrap();
    assert_eq!(config.file_path, PathBuf::from("objects.json"));
}
