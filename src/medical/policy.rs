//! Content policy for medical chat: emergency and blocked-term checks,
//! disclaimer handling and citation validation.

use std::sync::OnceLock;

use regex::Regex;

use crate::security::KeywordSet;

pub const MEDICAL_DISCLAIMER: &str = "⚠️ AVISO IMPORTANTE: Esta informação é baseada em literatura científica e tem propósito exclusivamente educacional.
Não substitui aconselhamento médico profissional. Sempre consulte profissionais de saúde qualificados para decisões médicas.";

pub const WELCOME_MESSAGE: &str = "Bem-vindo! Sou um assistente de pesquisa médica baseado em evidências. Como posso ajudar você hoje?";
pub const EMERGENCY_MESSAGE: &str = "⚠️ SE ESTA É UMA EMERGÊNCIA MÉDICA, LIGUE IMEDIATAMENTE PARA O SAMU (192) OU PROCURE O PRONTO-SOCORRO MAIS PRÓXIMO!";
pub const NO_DIAGNOSIS_MESSAGE: &str = "Não posso fornecer diagnósticos pessoais. Por favor, consulte um profissional de saúde.";
pub const BLOCKED_TOPIC_MESSAGE: &str = "Não posso ajudar com este assunto. Se você estiver pensando em se machucar, ligue para o CVV (188) ou procure ajuda imediatamente.";
pub const CITATION_REQUIRED_MESSAGE: &str = "Todas as informações médicas devem ser baseadas em literatura científica com citações adequadas.";

pub const EMERGENCY_KEYWORDS: &[&str] = &[
    "chest pain", "dor no peito",
    "can't breathe", "não consigo respirar",
    "stroke", "derrame", "avc",
    "heart attack", "infarto",
    "overdose",
    "severe bleeding", "sangramento grave",
    "unconscious", "inconsciente",
];

pub const BLOCKED_TERMS: &[&str] = &[
    "how to make drugs",
    "suicide methods",
    "self harm",
    "illegal substances",
];

const CITATION_PATTERN: &str = r"\[[\w\s]+et al\.,\s+\d{4},\s+PMID:\s+\d+\]";

fn emergency_keywords() -> &'static KeywordSet {
    static SET: OnceLock<KeywordSet> = OnceLock::new();
    SET.get_or_init(|| KeywordSet::new(EMERGENCY_KEYWORDS))
}

fn blocked_terms() -> &'static KeywordSet {
    static SET: OnceLock<KeywordSet> = OnceLock::new();
    SET.get_or_init(|| KeywordSet::new(BLOCKED_TERMS))
}

fn citation_regex() -> Option<&'static Regex> {
    static REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    REGEX
        .get_or_init(|| match Regex::new(CITATION_PATTERN) {
            Ok(regex) => Some(regex),
            Err(e) => {
                tracing::error!(error = %e, "Citation pattern failed to compile");
                None
            }
        })
        .as_ref()
}

/// True if the query describes a medical emergency.
pub fn is_emergency(query: &str) -> bool {
    emergency_keywords().contains_any(query)
}

/// True if the query asks about a blocked topic.
pub fn is_blocked(query: &str) -> bool {
    blocked_terms().contains_any(query)
}

/// Append the disclaimer unless the response already carries it.
pub fn add_medical_disclaimer(response: &str) -> String {
    if response.contains(MEDICAL_DISCLAIMER) {
        return response.to_string();
    }
    format!("{}\n\n{}", response, MEDICAL_DISCLAIMER)
}

/// True if the response cites at least one `[Author et al., YYYY, PMID: N]`.
pub fn validate_citations(response: &str) -> bool {
    citation_regex().is_some_and(|regex| regex.is_match(response))
}

/// Combined pre-check for a user query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPolicy {
    Allowed,
    Emergency,
    Blocked,
}

impl QueryPolicy {
    /// Message to show the user, if any.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            QueryPolicy::Allowed => None,
            QueryPolicy::Emergency => Some(EMERGENCY_MESSAGE),
            QueryPolicy::Blocked => Some(BLOCKED_TOPIC_MESSAGE),
        }
    }
}

/// Blocked terms take precedence over emergencies.
pub fn classify_query(query: &str) -> QueryPolicy {
    if is_blocked(query) {
        QueryPolicy::Blocked
    } else if is_emergency(query) {
        QueryPolicy::Emergency
    } else {
        QueryPolicy::Allowed
    }
}
