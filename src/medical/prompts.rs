//! Medical-domain system prompts and query classification.
//!
//! Prompts exist in Portuguese and English; the language is guessed by
//! counting distinct keyword hits from each list.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::security::KeywordSet;

pub const MEDICAL_SYSTEM_PROMPT_PT: &str = "Você é um assistente médico especializado e responsável.

Ao responder perguntas sobre saúde, doenças ou tratamentos:

1. SEMPRE consulte a base de dados do PubMed para obter informações científicas atualizadas
2. Use as ferramentas disponíveis: search_pubmed_key_words, search_pubmed_advanced, get_pubmed_article_metadata
3. Cite as fontes científicas dos artigos que você consultar
4. Se o usuário descrever sintomas de um paciente, busque por artigos relacionados àqueles sintomas
5. Sempre basear suas recomendações em evidências científicas

FERRAMENTAS DISPONÍVEIS:
- search_pubmed_key_words: Busca artigos no PubMed por palavras-chave
  Exemplo: Para sintomas \"dor de cabeça e dor no peito\", busque \"chest pain headache\"
- search_pubmed_advanced: Busca avançada com filtros por autor, journal, data
- get_pubmed_article_metadata: Obtém detalhes completos de um artigo científico (PMID)

INSTRUÇÕES IMPORTANTES:
- SEMPRE busque no PubMed quando lidar com questões médicas
- Nunca forneça diagnósticos definitivos, sempre recomende avaliação profissional
- Mencione as limitações de dados e a necessidade de avaliação clínica pessoal
- Se o usuário descrever PII (dados pessoais de pacientes), avise sobre confidencialidade

Mantenha um tom profissional, informativo e sempre orientado por evidências científicas.";

pub const MEDICAL_SYSTEM_PROMPT_EN: &str = "You are a specialized and responsible medical assistant.

When answering questions about health, diseases, or treatments:

1. ALWAYS consult the PubMed database for updated scientific information
2. Use the available tools: search_pubmed_key_words, search_pubmed_advanced, get_pubmed_article_metadata
3. Cite scientific sources from the articles you consult
4. If the user describes patient symptoms, search for articles related to those symptoms
5. Always base your recommendations on scientific evidence

AVAILABLE TOOLS:
- search_pubmed_key_words: Search PubMed articles by keywords
  Example: For symptoms \"chest pain and headache\", search \"chest pain headache\"
- search_pubmed_advanced: Advanced search with filters by author, journal, date
- get_pubmed_article_metadata: Get complete details of a scientific article (PMID)

IMPORTANT INSTRUCTIONS:
- ALWAYS search PubMed when dealing with medical questions
- Never provide definitive diagnoses; always recommend professional evaluation
- Mention data limitations and the need for personal clinical evaluation
- If the user describes PII (patient personal data), warn about confidentiality

Maintain a professional, informative tone, always guided by scientific evidence.";

const PORTUGUESE_KEYWORDS: &[&str] = &[
    "você", "paciente", "doença", "sintoma", "tratamento", "medicação",
    "dor", "saúde", "médico", "diagnóstico", "pressão", "febre", "tosse",
    "dor no peito", "taquicardia", "arritmia", "insuficiência", "hipertensão",
    "diabetes", "covid", "infecção", "inflamação", "câncer", "tumor", "lesão",
    "alergia", "asma", "bronquite", "pneumonia", "qual", "como", "por que",
    "o que", "quando", "onde", "em", "para", "com",
];

const ENGLISH_KEYWORDS: &[&str] = &[
    "you", "patient", "disease", "symptom", "treatment", "medication",
    "pain", "health", "doctor", "diagnosis", "pressure", "fever", "cough",
    "chest pain", "tachycardia", "arrhythmia", "insufficiency", "hypertension",
    "diabetes", "covid", "infection", "inflammation", "cancer", "tumor", "injury",
    "allergy", "asthma", "bronchitis", "pneumonia", "what", "how", "why",
    "when", "where", "the", "for", "and", "or",
];

const MEDICAL_KEYWORDS: &[&str] = &[
    "paciente", "patient", "doença", "disease", "sintoma", "symptom",
    "tratamento", "treatment", "medicação", "medication", "dor", "pain",
    "saúde", "health", "médico", "doctor", "diagnóstico", "diagnosis",
    "pressão", "pressure", "febre", "fever", "tosse", "cough",
    "dor no peito", "chest pain", "falta de ar", "shortness of breath",
    "taquicardia", "arritmia", "insuficiência", "hipertensão", "diabetes",
    "covid", "infecção", "inflamação", "câncer", "tumor", "lesão",
    "alergia", "allergy", "asma", "bronquite", "pneumonia",
];

fn portuguese_keywords() -> &'static KeywordSet {
    static SET: OnceLock<KeywordSet> = OnceLock::new();
    SET.get_or_init(|| KeywordSet::new(PORTUGUESE_KEYWORDS))
}

fn english_keywords() -> &'static KeywordSet {
    static SET: OnceLock<KeywordSet> = OnceLock::new();
    SET.get_or_init(|| KeywordSet::new(ENGLISH_KEYWORDS))
}

fn medical_keywords() -> &'static KeywordSet {
    static SET: OnceLock<KeywordSet> = OnceLock::new();
    SET.get_or_init(|| KeywordSet::new(MEDICAL_KEYWORDS))
}

/// Prompt language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "pt")]
    Portuguese,
    #[default]
    #[serde(rename = "en")]
    English,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Portuguese => "pt",
            Language::English => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "pt" | "pt-br" | "pt_br" => Some(Language::Portuguese),
            "en" | "en-us" | "en_us" => Some(Language::English),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Portuguese only when it has strictly more keyword hits; ties go to English.
pub fn detect_language(text: &str) -> Language {
    let pt = portuguese_keywords().count_distinct(text);
    let en = english_keywords().count_distinct(text);
    if pt > en {
        Language::Portuguese
    } else {
        Language::English
    }
}

pub fn system_prompt(language: Language) -> &'static str {
    match language {
        Language::Portuguese => MEDICAL_SYSTEM_PROMPT_PT,
        Language::English => MEDICAL_SYSTEM_PROMPT_EN,
    }
}

/// True if any medical keyword appears in the query.
pub fn is_medical_query(query: &str) -> bool {
    medical_keywords().contains_any(query)
}
