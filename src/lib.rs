//! PHI-GUARD
//!
//! Pattern-table PII/PHI detection and redaction for chat payloads, plus
//! medical-query routing (system prompt injection, literature tool
//! enablement). Everything is synchronous and deterministic; the catalog is
//! compiled once and shared read-only across threads.

pub mod cli;
pub mod config;
pub mod intercept;
pub mod logging;
pub mod medical;
pub mod security;

pub use config::{ConfigError, GuardConfig};
pub use intercept::{ChatInterceptor, InterceptOutcome, PassThroughReason, PiiSignal};
pub use security::{
    build_audit_record, has_patient_context, AuditRecord, DetectionResult, PIICategory,
    PIIDetector, PIISanitizer, PIIValidator, RiskLevel, ValidationMode, ValidationOutcome,
};
