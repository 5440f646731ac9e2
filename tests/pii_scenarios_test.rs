//! End-to-end PII Scenarios
//!
//! Drives the public API with the reference inputs: detection, risk,
//! sanitization and the strict/permissive gate.

use std::thread;

use phi_guard::security::detect_patient_data_leak;
use phi_guard::{
    has_patient_context, PIICategory, PIIDetector, PIISanitizer, PIIValidator, RiskLevel,
    ValidationMode,
};

const PATIENT_NOTE: &str = "Paciente João Silva, CPF 123.456.789-10, nascido em 15/05/1980";
const RESEARCH_QUERY: &str = "Pesquisa sobre COVID-19 em pacientes idosos";
const CONTACT_LINE: &str = "Email: patient@example.com, telefone (11) 98765-4321";
const TREATMENT_QUERY: &str = "Qual é o tratamento mais recente para diabetes?";

fn strict() -> PIIValidator {
    PIIValidator::new(ValidationMode::Strict)
}

fn permissive() -> PIIValidator {
    PIIValidator::new(ValidationMode::Permissive)
}

#[test]
fn test_patient_note_is_high_risk_and_blocked() {
    let result = PIIDetector::new().detect(PATIENT_NOTE);
    assert!(!result.is_safe());
    assert_eq!(result.categories(), vec![PIICategory::Cpf, PIICategory::DateOfBirth]);
    assert_eq!(result.risk_level(), RiskLevel::High);
    assert_eq!(result.matches_for(PIICategory::Cpf), Some(&["123.456.789-10".to_string()][..]));

    let outcome = strict().validate(PATIENT_NOTE);
    assert!(!outcome.accepted);
    assert_eq!(
        outcome.message,
        "BLOCKED: Multiple PII types detected. Detected: cpf, date_of_birth"
    );

    let outcome = permissive().validate(PATIENT_NOTE);
    assert!(outcome.accepted);
    assert!(outcome.message.starts_with("WARNING: "));
}

#[test]
fn test_research_query_is_safe() {
    let result = PIIDetector::new().detect(RESEARCH_QUERY);
    assert!(result.is_safe());
    assert_eq!(result.risk_level(), RiskLevel::Low);
    assert_eq!(result.message(), "No PII detected");

    let outcome = strict().validate(RESEARCH_QUERY);
    assert!(outcome.accepted);
    assert_eq!(outcome.message, "Query is safe - no PII detected");
}

#[test]
fn test_contact_line_is_redacted() {
    let result = PIIDetector::new().detect(CONTACT_LINE);
    assert_eq!(result.categories(), vec![PIICategory::Email, PIICategory::Phone]);
    assert_eq!(result.risk_level(), RiskLevel::High);

    let sanitized = PIISanitizer::default_sanitizer().sanitize(CONTACT_LINE);
    assert!(sanitized.contains("[EMAIL REMOVED]"));
    assert!(sanitized.contains("[PHONE REMOVED]"));
    assert!(!sanitized.contains("patient@example.com"));
    assert!(!sanitized.contains("98765-4321"));
}

#[test]
fn test_treatment_query_has_context_but_no_pii() {
    assert!(strict().validate(TREATMENT_QUERY).accepted);
    assert!(permissive().validate(TREATMENT_QUERY).accepted);
    assert!(has_patient_context(TREATMENT_QUERY));
    assert!(!has_patient_context("Write a haiku about autumn"));
}

#[test]
fn test_empty_input_is_accepted_everywhere() {
    let result = PIIDetector::new().detect("");
    assert!(result.is_safe());
    assert_eq!(result.risk_level(), RiskLevel::Low);
    assert_eq!(PIISanitizer::default_sanitizer().sanitize(""), "");
    assert!(strict().validate("").accepted);
    assert!(permissive().validate("").accepted);
}

#[test]
fn test_safe_text_is_returned_unchanged() {
    let sanitizer = PIISanitizer::default_sanitizer();
    for text in [RESEARCH_QUERY, TREATMENT_QUERY, "  spaces\tand\nnewlines  "] {
        assert_eq!(sanitizer.sanitize(text), text);
    }
}

#[test]
fn test_sanitizing_twice_changes_nothing() {
    let sanitizer = PIISanitizer::default_sanitizer();
    for text in [PATIENT_NOTE, CONTACT_LINE] {
        let once = sanitizer.sanitize(text);
        assert_eq!(sanitizer.sanitize(&once), once);
        assert!(PIIDetector::new().detect(&once).is_safe(), "residue in {:?}", once);
    }
}

#[test]
fn test_leak_report_matches_detection() {
    let report = detect_patient_data_leak(CONTACT_LINE);
    assert!(!report.is_safe);
    assert_eq!(report.leaked_types, vec!["email", "phone"]);

    let report = detect_patient_data_leak(RESEARCH_QUERY);
    assert!(report.is_safe);
    assert!(report.leaked_types.is_empty());
}

#[test]
fn test_detector_is_shareable_across_threads() {
    let detector = PIIDetector::new();
    thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let detector = &detector;
                s.spawn(move || detector.detect(PATIENT_NOTE).categories())
            })
            .collect();
        for handle in handles {
            assert_eq!(
                handle.join().unwrap(),
                vec![PIICategory::Cpf, PIICategory::DateOfBirth]
            );
        }
    });
}
