//! PII Sanitizer
//!
//! Replaces every catalog match with the category placeholder, e.g.
//! `[EMAIL REMOVED]`.
//!
//! Rules are applied one after another in catalog order, each on the text
//! already rewritten by the previous ones. When two rules overlap the
//! earlier category wins the shared span.

use std::sync::Arc;

use regex::NoExpand;

use super::pii_detector::PIICategory;
use super::pii_patterns::PatternCatalog;

/// Sanitizer configuration
#[derive(Debug, Clone)]
pub struct SanitizerConfig {
    /// Categories to redact. Anything else is left in place.
    pub redact_categories: Vec<PIICategory>,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self { redact_categories: PIICategory::ALL.to_vec() }
    }
}

/// Sanitization result
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizationResult {
    /// Sanitized text
    pub output: String,
    /// Whether any replacement was made
    pub modified: bool,
    /// Number of spans replaced
    pub pii_redacted: usize,
    /// Categories that produced at least one replacement, in catalog order
    pub categories: Vec<PIICategory>,
}

/// PII sanitizer over the shared pattern catalog.
#[derive(Debug, Clone)]
pub struct PIISanitizer {
    catalog: Arc<PatternCatalog>,
    config: SanitizerConfig,
}

impl PIISanitizer {
    pub fn new(config: SanitizerConfig) -> Self {
        Self { catalog: PatternCatalog::shared(), config }
    }

    pub fn with_catalog(catalog: Arc<PatternCatalog>, config: SanitizerConfig) -> Self {
        Self { catalog, config }
    }

    pub fn default_sanitizer() -> Self {
        Self::new(SanitizerConfig::default())
    }

    /// Mask PII in text. Text without PII comes back byte-for-byte.
    pub fn sanitize(&self, text: &str) -> String {
        self.sanitize_detailed(text).output
    }

    /// Mask PII and report what was replaced.
    pub fn sanitize_detailed(&self, text: &str) -> SanitizationResult {
        let mut output = text.to_string();
        let mut pii_redacted = 0;
        let mut categories = Vec::new();

        if !text.is_empty() {
            for (category, regex) in self.catalog.patterns() {
                if !self.config.redact_categories.contains(&category) {
                    continue;
                }
                let count = regex.find_iter(&output).count();
                if count == 0 {
                    continue;
                }
                let placeholder = category.placeholder();
                output = regex.replace_all(&output, NoExpand(&placeholder)).into_owned();
                pii_redacted += count;
                categories.push(category);
            }
        }

        if pii_redacted > 0 {
            tracing::debug!(
                replaced = pii_redacted,
                categories = categories.len(),
                "Sanitized query"
            );
        }

        SanitizationResult {
            modified: pii_redacted > 0,
            output,
            pii_redacted,
            categories,
        }
    }
}

impl Default for PIISanitizer {
    fn default() -> Self {
        Self::default_sanitizer()
    }
}

#[cfg(test)]
#[path = "sanitizer_tests.rs"]
mod tests;
