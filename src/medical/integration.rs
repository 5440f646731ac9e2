//! Medical enhancement of chat-completion request bodies.
//!
//! Works on the decoded JSON body. Malformed shapes are left untouched.

use serde::Serialize;
use serde_json::{json, Value};

use crate::config::MedicalConfig;

use super::prompts::{detect_language, is_medical_query, system_prompt, Language};

/// What the enhancement did to a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MedicalEnhancement {
    pub medical: bool,
    pub language: Option<Language>,
    pub prompt_injected: bool,
    pub tool_enabled: bool,
}

impl MedicalEnhancement {
    pub fn changed(&self) -> bool {
        self.prompt_injected || self.tool_enabled
    }
}

/// Flatten message content: a string, or a list of parts whose `text`
/// fields are joined with spaces.
pub fn content_text(content: &Value) -> Option<String> {
    match content {
        Value::String(s) => Some(s.clone()),
        Value::Array(parts) => {
            let texts: Vec<&str> = parts
                .iter()
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect();
            Some(texts.join(" "))
        }
        _ => None,
    }
}

/// Index and flattened text of the last message with role `user`.
pub fn latest_user_message(body: &Value) -> Option<(usize, String)> {
    let messages = body.get("messages")?.as_array()?;
    let (idx, message) = messages
        .iter()
        .enumerate()
        .rev()
        .find(|(_, m)| m.get("role").and_then(Value::as_str) == Some("user"))?;
    let text = message.get("content").and_then(content_text).unwrap_or_default();
    Some((idx, text))
}

/// Add the medical system prompt and literature tool to a chat body when
/// the query is medical.
///
/// An existing system message is never replaced.
pub fn enhance_medical_request(
    body: &mut Value,
    query: Option<&str>,
    config: &MedicalConfig,
) -> MedicalEnhancement {
    let mut enhancement = MedicalEnhancement::default();
    if !config.enabled || !body.is_object() {
        return enhancement;
    }

    let query = match query {
        Some(q) if !q.is_empty() => q.to_string(),
        _ => match latest_user_message(body) {
            Some((_, text)) => text,
            None => return enhancement,
        },
    };
    if query.is_empty() || !is_medical_query(&query) {
        return enhancement;
    }

    let language = detect_language(&query);
    enhancement.medical = true;
    enhancement.language = Some(language);
    tracing::info!(language = language.code(), "Medical query detected");

    if config.inject_system_prompt {
        enhancement.prompt_injected = inject_system_prompt(body, language);
        if !enhancement.prompt_injected {
            tracing::debug!("System message already present, prompt not injected");
        }
    }

    if config.auto_enable_tools {
        enhancement.tool_enabled = enable_tool(body, &config.literature_tool_id);
    }

    enhancement
}

fn inject_system_prompt(body: &mut Value, language: Language) -> bool {
    let Some(object) = body.as_object_mut() else {
        return false;
    };
    let messages = object
        .entry("messages")
        .or_insert_with(|| Value::Array(Vec::new()));
    let Some(messages) = messages.as_array_mut() else {
        return false;
    };

    let has_system = messages
        .iter()
        .any(|m| m.get("role").and_then(Value::as_str) == Some("system"));
    if has_system {
        return false;
    }

    messages.insert(0, json!({ "role": "system", "content": system_prompt(language) }));
    true
}

fn enable_tool(body: &mut Value, tool_id: &str) -> bool {
    let Some(object) = body.as_object_mut() else {
        return false;
    };
    let tool_ids = object
        .entry("tool_ids")
        .or_insert_with(|| Value::Array(Vec::new()));
    let Some(tool_ids) = tool_ids.as_array_mut() else {
        return false;
    };

    if tool_ids.iter().any(|t| t.as_str() == Some(tool_id)) {
        return false;
    }
    tool_ids.push(Value::String(tool_id.to_string()));
    true
}

#[cfg(test)]
#[path = "integration_tests.rs"]
mod tests;
