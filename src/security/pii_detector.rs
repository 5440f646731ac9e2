//! PII (Personally Identifiable Information) Detector
//!
//! Runs every catalog rule against an input text and collects the matched
//! substrings per category. Rules are independent: one span may satisfy
//! several rules and every hit is recorded.
//!
//! Risk is derived from the number of distinct categories found, never
//! from the number of occurrences.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::pii_patterns::PatternCatalog;

/// Sensitive data categories.
///
/// Declaration order is the catalog iteration order and drives both the
/// ordering of detection results and the sanitizer's replacement order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PIICategory {
    /// Brazilian national ID.
    Cpf,
    Email,
    Phone,
    CreditCard,
    Ssn,
    Passport,
    MedicalRecord,
    /// Only signalled through the patient-context keywords; no pattern.
    PatientName,
    Address,
    DateOfBirth,
    InsuranceId,
    BankAccount,
    IpAddress,
}

impl PIICategory {
    pub const ALL: [PIICategory; 13] = [
        PIICategory::Cpf,
        PIICategory::Email,
        PIICategory::Phone,
        PIICategory::CreditCard,
        PIICategory::Ssn,
        PIICategory::Passport,
        PIICategory::MedicalRecord,
        PIICategory::PatientName,
        PIICategory::Address,
        PIICategory::DateOfBirth,
        PIICategory::InsuranceId,
        PIICategory::BankAccount,
        PIICategory::IpAddress,
    ];

    /// Stable machine name, used in messages, headers and audit records.
    pub fn as_str(&self) -> &'static str {
        match self {
            PIICategory::Cpf => "cpf",
            PIICategory::Email => "email",
            PIICategory::Phone => "phone",
            PIICategory::CreditCard => "credit_card",
            PIICategory::Ssn => "ssn",
            PIICategory::Passport => "passport",
            PIICategory::MedicalRecord => "medical_record",
            PIICategory::PatientName => "patient_name",
            PIICategory::Address => "address",
            PIICategory::DateOfBirth => "date_of_birth",
            PIICategory::InsuranceId => "insurance_id",
            PIICategory::BankAccount => "bank_account",
            PIICategory::IpAddress => "ip_address",
        }
    }

    /// Display label used inside redaction placeholders.
    pub fn label(&self) -> String {
        match self {
            PIICategory::Cpf => "CPF".to_string(),
            PIICategory::Email => "EMAIL".to_string(),
            PIICategory::Phone => "PHONE".to_string(),
            PIICategory::CreditCard => "CARD".to_string(),
            PIICategory::PatientName => "NAME".to_string(),
            PIICategory::Address => "ADDRESS".to_string(),
            PIICategory::MedicalRecord => "MRN".to_string(),
            other => other.as_str().to_uppercase(),
        }
    }

    /// Replacement token, e.g. `[EMAIL REMOVED]`.
    pub fn placeholder(&self) -> String {
        format!("[{} REMOVED]", self.label())
    }
}

impl fmt::Display for PIICategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse severity derived from the count of distinct categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// 0 categories is low, exactly 1 is medium, 2 or more is high.
    pub fn from_category_count(count: usize) -> Self {
        match count {
            0 => RiskLevel::Low,
            1 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    fn summary(&self) -> &'static str {
        match self {
            RiskLevel::Low => "No PII detected",
            RiskLevel::Medium => "Single PII type detected",
            RiskLevel::High => "Multiple PII types detected",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one detection pass.
///
/// Built empty, filled by `add_pii` during the pass and sealed by
/// `finalize`. Callers only get read access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    found_pii: BTreeMap<PIICategory, Vec<String>>,
    is_safe: bool,
    risk_level: RiskLevel,
    message: String,
}

impl DetectionResult {
    pub(crate) fn new() -> Self {
        Self {
            found_pii: BTreeMap::new(),
            is_safe: true,
            risk_level: RiskLevel::Low,
            message: String::new(),
        }
    }

    pub(crate) fn add_pii(&mut self, category: PIICategory, values: Vec<String>) {
        self.found_pii.entry(category).or_default().extend(values);
        self.is_safe = false;
    }

    pub(crate) fn finalize(&mut self) {
        self.risk_level = RiskLevel::from_category_count(self.found_pii.len());
        self.message = self.risk_level.summary().to_string();
    }

    pub fn is_safe(&self) -> bool {
        self.is_safe
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Matched substrings per category, in catalog order.
    pub fn found_pii(&self) -> &BTreeMap<PIICategory, Vec<String>> {
        &self.found_pii
    }

    pub fn matches_for(&self, category: PIICategory) -> Option<&[String]> {
        self.found_pii.get(&category).map(Vec::as_slice)
    }

    pub fn categories(&self) -> Vec<PIICategory> {
        self.found_pii.keys().copied().collect()
    }

    pub fn category_names(&self) -> Vec<String> {
        self.found_pii.keys().map(|c| c.as_str().to_string()).collect()
    }

    /// Total number of matched occurrences across all categories.
    pub fn match_count(&self) -> usize {
        self.found_pii.values().map(Vec::len).sum()
    }
}

impl Default for DetectionResult {
    fn default() -> Self {
        let mut result = Self::new();
        result.finalize();
        result
    }
}

/// PII detector over the shared pattern catalog.
#[derive(Clone)]
pub struct PIIDetector {
    catalog: Arc<PatternCatalog>,
}

impl PIIDetector {
    pub fn new() -> Self {
        Self { catalog: PatternCatalog::shared() }
    }

    pub fn with_catalog(catalog: Arc<PatternCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    /// Detect PII in text. Empty input is safe without running any rule.
    pub fn detect(&self, text: &str) -> DetectionResult {
        let mut result = DetectionResult::new();

        if !text.is_empty() {
            for (category, regex) in self.catalog.patterns() {
                let matches: Vec<String> =
                    regex.find_iter(text).map(|m| m.as_str().to_string()).collect();
                if matches.is_empty() {
                    continue;
                }
                tracing::warn!(
                    category = category.as_str(),
                    matches = matches.len(),
                    "Detected PII in query"
                );
                metrics::counter!(
                    "phi_guard_pii_detections_total",
                    "category" => category.as_str()
                )
                .increment(1);
                result.add_pii(category, matches);
            }
        }

        result.finalize();
        result
    }

    /// Check if text contains any PII without collecting matches.
    pub fn contains_pii(&self, text: &str) -> bool {
        !text.is_empty() && self.catalog.patterns().any(|(_, regex)| regex.is_match(text))
    }
}

impl Default for PIIDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PIIDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PIIDetector")
            .field("rules", &self.catalog.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "pii_tests.rs"]
mod tests;
