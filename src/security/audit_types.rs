//! Audit record for one filter decision.
//!
//! The record never carries the query text itself; a SHA-256 fingerprint
//! lets auditors correlate repeated submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::pii_detector::{DetectionResult, RiskLevel};
use super::pii_validator::has_patient_context;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: String,
    /// Serialized as ISO-8601 UTC.
    pub timestamp: DateTime<Utc>,
    /// Length of the query in characters.
    pub query_length: usize,
    pub query_sha256: String,
    pub is_safe: bool,
    pub risk_level: RiskLevel,
    pub detected_pii_types: Vec<String>,
    pub detected_pii_count: usize,
    pub message: String,
    pub patient_context_detected: bool,
}

impl AuditRecord {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_log_string(&self) -> String {
        format!(
            "[{}] risk={} safe={} types=[{}] count={} patient_context={} - {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.risk_level,
            self.is_safe,
            self.detected_pii_types.join(","),
            self.detected_pii_count,
            self.patient_context_detected,
            self.message
        )
    }
}

/// Build the audit record for a query and the detection run over it.
pub fn build_audit_record(text: &str, result: &DetectionResult) -> AuditRecord {
    AuditRecord {
        id: uuid::Uuid::new_v4().to_string(),
        timestamp: Utc::now(),
        query_length: text.chars().count(),
        query_sha256: fingerprint(text),
        is_safe: result.is_safe(),
        risk_level: result.risk_level(),
        detected_pii_types: result.category_names(),
        detected_pii_count: result.match_count(),
        message: result.message().to_string(),
        patient_context_detected: has_patient_context(text),
    }
}

/// Hex SHA-256 of the text.
pub fn fingerprint(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

#[cfg(test)]
#[path = "audit_tests.rs"]
mod tests;
