//! Tests for CLI command reports and argument parsing.

use serde_json::json;

use super::*;
use crate::cli::input::{InputError, InputSource};
use crate::config::MedicalConfig;
use crate::security::ValidationMode;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_parse_text_and_mode() {
    let parsed = parse_args(&args(&["--text", "hello", "--mode", "strict", "--json"])).unwrap();
    assert_eq!(parsed.input, InputSource::Text("hello".into()));
    assert_eq!(parsed.mode, Some(ValidationMode::Strict));
    assert!(parsed.json);
}

#[test]
fn test_parse_defaults_to_stdin() {
    let parsed = parse_args(&[]).unwrap();
    assert_eq!(parsed.input, InputSource::Stdin);
    assert_eq!(parsed.mode, None);
    assert!(!parsed.json);

    let parsed = parse_args(&args(&["--file", "-"])).unwrap();
    assert_eq!(parsed.input, InputSource::Stdin);
}

#[test]
fn test_parse_errors() {
    assert!(matches!(parse_args(&args(&["--text"])), Err(InputError::MissingValue(_))));
    assert!(matches!(parse_args(&args(&["--bogus"])), Err(InputError::UnknownArgument(_))));
    assert!(matches!(parse_args(&args(&["--mode", "lenient"])), Err(InputError::Mode(_))));
}

#[test]
fn test_file_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("note.txt");
    std::fs::write(&path, "contato: ana@example.com").unwrap();
    let text = InputSource::File(path).read().unwrap();
    assert_eq!(text, "contato: ana@example.com");

    let missing = InputSource::File(dir.path().join("absent.txt")).read();
    assert!(matches!(missing, Err(InputError::Read { .. })));
}

#[test]
fn test_scan_report_contains_audit_without_raw_text() {
    let validator = PIIValidator::new(ValidationMode::Permissive);
    let text = "Email: patient@example.com";
    let report = scan_report(text, &validator);

    assert_eq!(report["detection"]["is_safe"], json!(false));
    assert_eq!(report["detection"]["risk_level"], json!("medium"));
    assert_eq!(report["audit"]["detected_pii_types"], json!(["email"]));
    assert_eq!(report["audit"]["query_length"], json!(text.chars().count()));
    assert!(!report["audit"].to_string().contains("patient@example.com"));
}

#[test]
fn test_validation_report_by_mode() {
    let text = "CPF 123.456.789-10";
    let strict = validation_report(text, &PIIValidator::new(ValidationMode::Strict));
    assert_eq!(strict["accepted"], json!(false));
    assert_eq!(strict["mode"], json!("strict"));
    assert!(strict["message"].as_str().unwrap().starts_with("BLOCKED"));

    let permissive = validation_report(text, &PIIValidator::new(ValidationMode::Permissive));
    assert_eq!(permissive["accepted"], json!(true));
    assert!(permissive["message"].as_str().unwrap().starts_with("WARNING"));
    assert_eq!(permissive["categories"], json!(["cpf"]));
}

#[test]
fn test_intercept_report_outcomes() {
    let medical = MedicalConfig { enabled: false, ..Default::default() };
    let interceptor = ChatInterceptor::new(ValidationMode::Permissive, medical);

    let body = json!({ "messages": [{ "role": "user", "content": "mail a@example.com" }] });
    let report = intercept_report(body.to_string().as_bytes(), &interceptor);
    assert_eq!(report["outcome"], json!("rewritten"));
    assert_eq!(report["headers"]["X-PII-Types"], json!("email"));
    assert_eq!(report["body"]["messages"][0]["content"], json!("mail [EMAIL REMOVED]"));

    let report = intercept_report(b"not json", &interceptor);
    assert_eq!(report["outcome"], json!("pass_through"));
    assert_eq!(report["reason"], json!("not_json"));
}

#[test]
fn test_intercept_report_blocked() {
    let medical = MedicalConfig { enabled: false, ..Default::default() };
    let interceptor = ChatInterceptor::new(ValidationMode::Strict, medical);
    let body = json!({ "messages": [{ "role": "user", "content": "mail a@example.com" }] });
    let report = intercept_report(body.to_string().as_bytes(), &interceptor);
    assert_eq!(report["outcome"], json!("blocked"));
    assert_eq!(report["categories"], json!(["email"]));
}

#[test]
fn test_config_defaults_exit_code() {
    assert_eq!(run_config_defaults(), EXIT_OK);
}
