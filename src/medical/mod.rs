//! Medical-domain routing for chat requests.
//!
//! - `prompts`: bilingual system prompts, language guess, medical-query check
//! - `integration`: system prompt and literature tool injection into chat bodies
//! - `policy`: emergency/blocked checks, disclaimer, citations
//! - `pubmed`: literature tool server descriptor and registration

pub mod integration;
pub mod policy;
pub mod prompts;
pub mod pubmed;

pub use integration::{enhance_medical_request, latest_user_message, MedicalEnhancement};
pub use policy::{classify_query, is_blocked, is_emergency, QueryPolicy};
pub use prompts::{detect_language, is_medical_query, system_prompt, Language};
pub use pubmed::{pubmed_connection, register_pubmed, ToolServerConnection, ToolServerInfo};
