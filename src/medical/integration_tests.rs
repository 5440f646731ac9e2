//! Tests for medical request enhancement.

use super::*;
use crate::medical::prompts::{MEDICAL_SYSTEM_PROMPT_EN, MEDICAL_SYSTEM_PROMPT_PT};

fn body(messages: Value) -> Value {
    json!({ "model": "llama3", "messages": messages })
}

#[test]
fn test_injects_portuguese_prompt() {
    let mut body = body(json!([
        { "role": "user", "content": "Qual é o tratamento mais recente para diabetes?" }
    ]));
    let result = enhance_medical_request(&mut body, None, &MedicalConfig::default());

    assert!(result.medical);
    assert!(result.prompt_injected);
    assert_eq!(result.language, Some(Language::Portuguese));
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], MEDICAL_SYSTEM_PROMPT_PT);
    assert_eq!(body["messages"].as_array().unwrap().len(), 2);
}

#[test]
fn test_injects_english_prompt() {
    let mut body = body(json!([
        { "role": "user", "content": "What is the first-line treatment for hypertension?" }
    ]));
    enhance_medical_request(&mut body, None, &MedicalConfig::default());
    assert_eq!(body["messages"][0]["content"], MEDICAL_SYSTEM_PROMPT_EN);
}

#[test]
fn test_existing_system_message_kept() {
    let mut body = body(json!([
        { "role": "system", "content": "Be brief." },
        { "role": "user", "content": "chest pain causes" }
    ]));
    let result = enhance_medical_request(&mut body, None, &MedicalConfig::default());

    assert!(result.medical);
    assert!(!result.prompt_injected);
    assert_eq!(body["messages"][0]["content"], "Be brief.");
    assert_eq!(body["messages"].as_array().unwrap().len(), 2);
}

#[test]
fn test_tool_enabled_once() {
    let mut body = body(json!([{ "role": "user", "content": "fever in children" }]));
    let config = MedicalConfig::default();

    let first = enhance_medical_request(&mut body, None, &config);
    assert!(first.tool_enabled);
    assert_eq!(body["tool_ids"], json!(["pubmed-mcp"]));

    let second = enhance_medical_request(&mut body, None, &config);
    assert!(!second.tool_enabled);
    assert!(!second.prompt_injected);
    assert!(!second.changed());
    assert_eq!(body["tool_ids"], json!(["pubmed-mcp"]));
}

#[test]
fn test_non_medical_untouched() {
    let mut body = body(json!([{ "role": "user", "content": "Write a poem about the sea" }]));
    let before = body.clone();
    let result = enhance_medical_request(&mut body, None, &MedicalConfig::default());

    assert!(!result.medical);
    assert!(!result.changed());
    assert_eq!(body, before);
}

#[test]
fn test_disabled_config_untouched() {
    let mut body = body(json!([{ "role": "user", "content": "diabetes" }]));
    let before = body.clone();
    let config = MedicalConfig { enabled: false, ..Default::default() };
    let result = enhance_medical_request(&mut body, None, &config);
    assert!(!result.medical);
    assert_eq!(body, before);
}

#[test]
fn test_latest_user_message_wins() {
    let messages = json!([
        { "role": "user", "content": "tell me about diabetes" },
        { "role": "assistant", "content": "Sure." },
        { "role": "user", "content": "Write a poem about the sea" }
    ]);
    let mut body = body(messages);
    let result = enhance_medical_request(&mut body, None, &MedicalConfig::default());
    assert!(!result.medical);
    assert_eq!(latest_user_message(&body).map(|(i, _)| i), Some(2));
}

#[test]
fn test_content_parts_joined() {
    let mut body = body(json!([{
        "role": "user",
        "content": [
            { "type": "text", "text": "persistent" },
            { "type": "image_url", "image_url": { "url": "data:..." } },
            { "type": "text", "text": "cough" }
        ]
    }]));
    assert_eq!(latest_user_message(&body), Some((0, "persistent cough".to_string())));
    let result = enhance_medical_request(&mut body, None, &MedicalConfig::default());
    assert!(result.medical);
}

#[test]
fn test_explicit_query_used() {
    let mut body = json!({ "model": "llama3" });
    let result = enhance_medical_request(&mut body, Some("pneumonia"), &MedicalConfig::default());
    assert!(result.prompt_injected);
    assert_eq!(body["messages"][0]["role"], "system");
}

#[test]
fn test_non_object_body_untouched() {
    let mut body = json!(["not", "an", "object"]);
    let result = enhance_medical_request(&mut body, Some("diabetes"), &MedicalConfig::default());
    assert_eq!(result, MedicalEnhancement::default());
}
