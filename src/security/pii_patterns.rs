//! PII pattern catalog and patient-context keywords.
//!
//! One rule per category, compiled case-insensitively once per process and
//! read-only afterwards.

use std::sync::{Arc, OnceLock};

use regex::{Regex, RegexBuilder};
use thiserror::Error;

use super::keywords::KeywordSet;
use super::pii_detector::PIICategory;

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Pattern for {category} failed to compile: {source}")]
    Compile {
        category: PIICategory,
        #[source]
        source: regex::Error,
    },
}

/// Pattern source for a category. `None` for categories without a pattern.
pub fn pattern_source(category: PIICategory) -> Option<&'static str> {
    let source = match category {
        PIICategory::Cpf => r"\d{3}\.\d{3}\.\d{3}-\d{2}|\d{11}",
        PIICategory::Email => r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}",
        PIICategory::Phone => r"\(?\d{2}\)?\s?9?\d{4}-?\d{4}|\+55\s?\d{2}\s?\d{4,5}-?\d{4}",
        PIICategory::CreditCard => r"\b\d{4}[\s-]?\d{4}[\s-]?\d{4}[\s-]?\d{4}\b",
        PIICategory::Ssn => r"\d{3}-\d{2}-\d{4}",
        PIICategory::Passport => r"[A-Z]{2}\d{6,9}",
        PIICategory::MedicalRecord => r"(?:MRN|record number|prontuário)[\s:]*\d+",
        PIICategory::PatientName => return None,
        PIICategory::Address => {
            r"\d+\s+[\w\s]+(?:street|avenue|road|st|ave|rd|rua|avenida)"
        }
        PIICategory::DateOfBirth => r"\d{2}[/-]\d{2}[/-]\d{4}|\d{4}[/-]\d{2}[/-]\d{2}",
        PIICategory::InsuranceId => r"(?:insurance|apólice)[\s:]*[A-Z0-9]{6,}",
        PIICategory::BankAccount => r"(?:account|conta)[\s:]*\d{8,17}",
        PIICategory::IpAddress => r"\b(?:\d{1,3}\.){3}\d{1,3}\b",
    };
    Some(source)
}

/// Compile the rule for one category.
pub fn compile_rule(category: PIICategory, source: &str) -> Result<Regex, PatternError> {
    RegexBuilder::new(source)
        .case_insensitive(true)
        .build()
        .map_err(|source| PatternError::Compile { category, source })
}

/// Matching rule attached to a category.
#[derive(Debug)]
pub enum Rule {
    Pattern(Regex),
    /// No automated pattern; surfaced only through `has_patient_context`.
    PatientContext,
}

#[derive(Debug)]
pub struct CatalogEntry {
    pub category: PIICategory,
    pub rule: Rule,
}

/// Immutable category -> rule table, in `PIICategory::ALL` order.
#[derive(Debug)]
pub struct PatternCatalog {
    entries: Vec<CatalogEntry>,
}

impl PatternCatalog {
    /// Build the catalog. Rules that fail to compile are logged and left out
    /// so detection over the remaining categories still runs.
    pub fn build() -> Self {
        let mut entries = Vec::with_capacity(PIICategory::ALL.len());
        for category in PIICategory::ALL {
            let rule = match pattern_source(category) {
                None => Rule::PatientContext,
                Some(source) => match compile_rule(category, source) {
                    Ok(regex) => Rule::Pattern(regex),
                    Err(e) => {
                        tracing::error!(category = category.as_str(), error = %e, "Skipping PII rule");
                        continue;
                    }
                },
            };
            entries.push(CatalogEntry { category, rule });
        }
        Self { entries }
    }

    /// Process-wide catalog, built on first use.
    pub fn shared() -> Arc<PatternCatalog> {
        static CATALOG: OnceLock<Arc<PatternCatalog>> = OnceLock::new();
        CATALOG.get_or_init(|| Arc::new(PatternCatalog::build())).clone()
    }

    pub fn rule_for(&self, category: PIICategory) -> Option<&Rule> {
        self.entries
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| &entry.rule)
    }

    /// Compiled patterns in catalog order, skipping keyword-only categories.
    pub fn patterns(&self) -> impl Iterator<Item = (PIICategory, &Regex)> + '_ {
        self.entries.iter().filter_map(|entry| match &entry.rule {
            Rule::Pattern(regex) => Some((entry.category, regex)),
            Rule::PatientContext => None,
        })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Terms that suggest the text is about a specific patient.
pub const PATIENT_CONTEXT_KEYWORDS: &[&str] = &[
    "paciente", "patient", "nome", "name", "data de nascimento",
    "date of birth", "endereço", "address", "telefone", "phone",
    "cpf", "rg", "prontuário", "medical record", "histórico médico",
    "medical history", "diagnóstico", "diagnosis", "tratamento",
    "treatment", "medicação", "medication", "alergia", "allergy",
];

pub fn patient_context_keywords() -> &'static KeywordSet {
    static KEYWORDS: OnceLock<KeywordSet> = OnceLock::new();
    KEYWORDS.get_or_init(|| KeywordSet::new(PATIENT_CONTEXT_KEYWORDS))
}
