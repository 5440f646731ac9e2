//! Tests for configuration loading.

use std::collections::HashMap;
use std::io::Write;

use super::*;

fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> =
        vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults() {
    let config = load_with(env(&[])).unwrap();
    assert_eq!(config, GuardConfig::default());
    assert_eq!(config.mode, ValidationMode::Permissive);
    assert!(config.medical.enabled);
    assert_eq!(config.pubmed.url, "http://pubmed-mcp:8000/sse");
}

#[test]
fn test_env_mode_override() {
    let config = load_with(env(&[(MODE_ENV, "strict")])).unwrap();
    assert_eq!(config.mode, ValidationMode::Strict);
}

#[test]
fn test_invalid_env_mode_fails() {
    let err = load_with(env(&[(MODE_ENV, "relaxed")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidMode(_)));
}

#[test]
fn test_invalid_bool_fails() {
    let err = load_with(env(&[(MEDICAL_ENV, "maybe")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));

    let config = load_with(env(&[(MEDICAL_ENV, "off")])).unwrap();
    assert!(!config.medical.enabled);
}

#[test]
fn test_toml_partial_uses_defaults() {
    let config = GuardConfig::from_toml_str(
        r#"
mode = "strict"

[medical]
auto_enable_tools = false
"#,
    )
    .unwrap();
    assert_eq!(config.mode, ValidationMode::Strict);
    assert!(!config.medical.auto_enable_tools);
    assert!(config.medical.inject_system_prompt);
    assert_eq!(config.pubmed, PubMedConfig::default());
}

#[test]
fn test_toml_invalid_mode_fails() {
    let err = GuardConfig::from_toml_str(r#"mode = "sometimes""#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_quality_threshold_range() {
    let err = GuardConfig::from_toml_str("[pubmed]\nquality_threshold = 1.5").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "pubmed.quality_threshold"));
}

#[test]
fn test_file_then_env() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "mode = \"strict\"\n[pubmed]\nmax_results = 25").unwrap();
    let path = file.path().to_string_lossy().to_string();

    let config = load_with(env(&[
        (CONFIG_PATH_ENV, path.as_str()),
        (MODE_ENV, "permissive"),
        (LOG_FORMAT_ENV, "json"),
    ]))
    .unwrap();
    assert_eq!(config.mode, ValidationMode::Permissive);
    assert_eq!(config.pubmed.max_results, 25);
    assert_eq!(config.log_format, LogFormat::Json);
}

#[test]
fn test_missing_file_fails() {
    let err = load_with(env(&[(CONFIG_PATH_ENV, "/nonexistent/phi-guard.toml")])).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_toml_round_trip_of_defaults() {
    let rendered = GuardConfig::default().to_toml().unwrap();
    assert!(rendered.contains("mode = \"permissive\""));
    assert_eq!(GuardConfig::from_toml_str(&rendered).unwrap(), GuardConfig::default());
}
