//! Integration tests for configuration loading.

use ollama_sentinel::models::config::{MonitorConfig, Settings};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_settings_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
host = "http://gpu-box.lan:11434"
model = "llama3:3b"
check_interval_secs = 30
"#,
    )
    .unwrap();

    let settings = Settings::from_file(&path).unwrap();
    assert_eq!(settings.host.as_deref(), Some("http://gpu-box.lan:11434"));
    assert_eq!(settings.model.as_deref(), Some("llama3:3b"));
    assert_eq!(settings.check_interval_secs, Some(30));
    assert_eq!(settings.prompt, None);

    let config = MonitorConfig::from_settings(&settings).unwrap();
    assert_eq!(config.api_base_url, "http://gpu-box.lan:11434/api");
    assert_eq!(config.target_model, "llama3:3b");
    assert_eq!(config.check_interval_secs, 30);
}

#[test]
fn test_settings_from_invalid_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "check_interval_secs = \"often\"").unwrap();

    assert!(Settings::from_file(&path).is_err());
}

#[test]
fn test_settings_from_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    assert!(Settings::from_file(&temp_dir.path().join("missing.toml")).is_err());
}

#[test]
fn test_bare_host_config_targets_default_port() {
    let settings = Settings {
        host: Some("192.168.1.50".to_string()),
        ..Default::default()
    };

    let config = MonitorConfig::from_settings(&settings).unwrap();
    assert_eq!(config.listen_host, "192.168.1.50");
    assert_eq!(config.api_base_url, "http://192.168.1.50:11434/api");
}
