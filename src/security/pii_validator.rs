//! Query validation gate.
//!
//! Combines a detection pass with the configured policy mode. A strict
//! rejection is a normal return value; callers decide how to surface it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

use super::audit_types::{build_audit_record, AuditRecord};
use super::pii_detector::{DetectionResult, PIIDetector};
use super::pii_patterns::patient_context_keywords;
use super::pii_sanitizer::PIISanitizer;

/// Policy applied when PII is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Reject any query containing PII.
    Strict,
    /// Accept, but report what was found.
    #[default]
    Permissive,
}

impl ValidationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationMode::Strict => "strict",
            ValidationMode::Permissive => "permissive",
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ValidationMode::Strict),
            "permissive" => Ok(ValidationMode::Permissive),
            _ => Err(ConfigError::InvalidMode(s.to_string())),
        }
    }
}

/// Accept/reject decision with the detection behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationOutcome {
    pub accepted: bool,
    pub message: String,
    pub result: DetectionResult,
}

pub const SAFE_QUERY_MESSAGE: &str = "Query is safe - no PII detected";

/// Validator with a mode fixed at construction.
#[derive(Debug, Clone)]
pub struct PIIValidator {
    mode: ValidationMode,
    detector: PIIDetector,
    sanitizer: PIISanitizer,
}

impl PIIValidator {
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            mode,
            detector: PIIDetector::new(),
            sanitizer: PIISanitizer::default_sanitizer(),
        }
    }

    /// Build from a textual mode. Unknown values are an error, never a default.
    pub fn from_mode_str(mode: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(mode.parse()?))
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    pub fn detector(&self) -> &PIIDetector {
        &self.detector
    }

    pub fn detect(&self, text: &str) -> DetectionResult {
        self.detector.detect(text)
    }

    pub fn sanitize(&self, text: &str) -> String {
        self.sanitizer.sanitize(text)
    }

    pub fn validate(&self, text: &str) -> ValidationOutcome {
        let result = self.detector.detect(text);

        if result.is_safe() {
            return ValidationOutcome {
                accepted: true,
                message: SAFE_QUERY_MESSAGE.to_string(),
                result,
            };
        }

        let detected = result.category_names().join(", ");
        let (accepted, prefix) = match self.mode {
            ValidationMode::Strict => (false, "BLOCKED"),
            ValidationMode::Permissive => (true, "WARNING"),
        };
        let message = format!("{}: {}. Detected: {}", prefix, result.message(), detected);

        ValidationOutcome { accepted, message, result }
    }

    pub fn has_patient_context(&self, text: &str) -> bool {
        has_patient_context(text)
    }

    pub fn audit_record(&self, text: &str, result: &DetectionResult) -> AuditRecord {
        build_audit_record(text, result)
    }
}

impl Default for PIIValidator {
    fn default() -> Self {
        Self::new(ValidationMode::default())
    }
}

/// True if the text mentions patient, record or demographic terms.
/// Informational only; never blocks by itself.
pub fn has_patient_context(text: &str) -> bool {
    patient_context_keywords().contains_any(text)
}

/// Quick leak check used by callers that only need a yes/no plus types.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeakReport {
    pub is_safe: bool,
    pub leaked_types: Vec<String>,
    pub reason: String,
}

pub fn detect_patient_data_leak(text: &str) -> LeakReport {
    let result = PIIDetector::new().detect(text);
    if result.is_safe() {
        return LeakReport {
            is_safe: true,
            leaked_types: Vec::new(),
            reason: "No patient data detected".to_string(),
        };
    }
    LeakReport {
        is_safe: false,
        leaked_types: result.category_names(),
        reason: result.message().to_string(),
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
