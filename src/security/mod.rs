//! PII detection and redaction engine.
//!
//! - `pii_patterns`: category -> rule catalog and patient-context keywords
//! - `pii_detector`: detection pass and risk scoring
//! - `pii_sanitizer`: placeholder masking
//! - `pii_validator`: strict/permissive gate
//! - `audit_types`: per-decision audit record

pub mod audit_types;
pub mod keywords;
pub mod pii_detector;
pub mod pii_patterns;
pub mod pii_sanitizer;
pub mod pii_validator;

pub use audit_types::{build_audit_record, AuditRecord};
pub use keywords::KeywordSet;
pub use pii_detector::{DetectionResult, PIICategory, PIIDetector, RiskLevel};
pub use pii_patterns::{PatternCatalog, PatternError, Rule};
pub use pii_sanitizer::{PIISanitizer, SanitizationResult, SanitizerConfig};
pub use pii_validator::{
    detect_patient_data_leak, has_patient_context, LeakReport, PIIValidator, ValidationMode,
    ValidationOutcome,
};
