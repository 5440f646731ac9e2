//! Chat-completion request interception.
//!
//! Takes the raw request body, sanitizes the latest user message and
//! applies medical routing. The caller always gets an explicit outcome:
//! a rewritten body, a strict-mode block, or a pass-through with the
//! reason. Failures never surface as errors to the request path.

use serde_json::Value;
use thiserror::Error;

use crate::config::{GuardConfig, MedicalConfig};
use crate::medical::{enhance_medical_request, latest_user_message, MedicalEnhancement};
use crate::security::{PIICategory, PIIValidator, ValidationMode};

/// Paths whose POST bodies are intercepted.
pub const CHAT_COMPLETION_PATHS: [&str; 2] = ["/v1/chat/completions", "/api/chat/completions"];

pub const PII_DETECTED_HEADER: &str = "X-PII-Detected";
pub const PII_TYPES_HEADER: &str = "X-PII-Types";

pub fn is_chat_completion(method: &str, path: &str) -> bool {
    method.eq_ignore_ascii_case("POST") && CHAT_COMPLETION_PATHS.iter().any(|p| path.ends_with(p))
}

#[derive(Error, Debug)]
pub enum InterceptError {
    #[error("Request body is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("Failed to encode rewritten body: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Why a request was forwarded untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassThroughReason {
    EmptyBody,
    NotJson,
    NoUserMessage,
    Unchanged,
    EncodeFailed,
}

impl PassThroughReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            PassThroughReason::EmptyBody => "empty_body",
            PassThroughReason::NotJson => "not_json",
            PassThroughReason::NoUserMessage => "no_user_message",
            PassThroughReason::Unchanged => "unchanged",
            PassThroughReason::EncodeFailed => "encode_failed",
        }
    }
}

impl From<&InterceptError> for PassThroughReason {
    fn from(err: &InterceptError) -> Self {
        match err {
            InterceptError::Decode(_) => PassThroughReason::NotJson,
            InterceptError::Encode(_) => PassThroughReason::EncodeFailed,
        }
    }
}

/// Response-side signal that PII was removed from the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PiiSignal {
    pub categories: Vec<PIICategory>,
}

impl PiiSignal {
    /// Extension headers for the client response.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = vec![(PII_DETECTED_HEADER, "true".to_string())];
        if !self.categories.is_empty() {
            let types: Vec<&str> = self.categories.iter().map(PIICategory::as_str).collect();
            headers.push((PII_TYPES_HEADER, types.join(",")));
        }
        headers
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RewrittenRequest {
    pub body: Vec<u8>,
    pub pii: Option<PiiSignal>,
    pub medical: MedicalEnhancement,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InterceptOutcome {
    Rewritten(RewrittenRequest),
    /// Strict mode found PII; the request must not be forwarded.
    Blocked {
        message: String,
        categories: Vec<PIICategory>,
    },
    PassThrough(PassThroughReason),
}

impl InterceptOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            InterceptOutcome::Rewritten(_) => "rewritten",
            InterceptOutcome::Blocked { .. } => "blocked",
            InterceptOutcome::PassThrough(_) => "pass_through",
        }
    }
}

/// Request interceptor holding the validator and medical routing settings.
#[derive(Debug, Clone)]
pub struct ChatInterceptor {
    validator: PIIValidator,
    medical: MedicalConfig,
}

impl ChatInterceptor {
    pub fn new(mode: ValidationMode, medical: MedicalConfig) -> Self {
        Self { validator: PIIValidator::new(mode), medical }
    }

    pub fn from_config(config: &GuardConfig) -> Self {
        Self::new(config.mode, config.medical.clone())
    }

    pub fn validator(&self) -> &PIIValidator {
        &self.validator
    }

    pub fn intercept(&self, body: &[u8]) -> InterceptOutcome {
        let outcome = match self.try_intercept(body) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(error = %e, "Passing request through unmodified");
                InterceptOutcome::PassThrough(PassThroughReason::from(&e))
            }
        };
        metrics::counter!("phi_guard_intercepts_total", "outcome" => outcome.label()).increment(1);
        outcome
    }

    /// Same as `intercept`, but surfaces decode/encode failures.
    pub fn try_intercept(&self, body: &[u8]) -> Result<InterceptOutcome, InterceptError> {
        if body.is_empty() {
            return Ok(InterceptOutcome::PassThrough(PassThroughReason::EmptyBody));
        }
        let mut data: Value = serde_json::from_slice(body).map_err(InterceptError::Decode)?;

        let Some((idx, text)) = latest_user_message(&data) else {
            return Ok(InterceptOutcome::PassThrough(PassThroughReason::NoUserMessage));
        };
        if text.is_empty() {
            return Ok(InterceptOutcome::PassThrough(PassThroughReason::NoUserMessage));
        }

        let mut pii = None;
        let outcome = self.validator.validate(&text);
        if outcome.result.is_safe() {
            tracing::debug!("Message passed PII validation");
        } else {
            let categories = outcome.result.categories();
            tracing::warn!(
                types = %outcome.result.category_names().join(","),
                risk = %outcome.result.risk_level(),
                "Sensitive data in user message"
            );
            if !outcome.accepted {
                return Ok(InterceptOutcome::Blocked { message: outcome.message, categories });
            }
            self.sanitize_message(&mut data, idx);
            pii = Some(PiiSignal { categories });
        }

        let query = latest_user_message(&data).map(|(_, text)| text);
        let medical = enhance_medical_request(&mut data, query.as_deref(), &self.medical);

        if pii.is_none() && !medical.changed() {
            return Ok(InterceptOutcome::PassThrough(PassThroughReason::Unchanged));
        }

        let body = serde_json::to_vec(&data).map_err(InterceptError::Encode)?;
        Ok(InterceptOutcome::Rewritten(RewrittenRequest { body, pii, medical }))
    }

    /// Rewrite the message content in place: plain string, or every `text`
    /// field of a parts list.
    fn sanitize_message(&self, data: &mut Value, idx: usize) {
        let Some(content) = data
            .get_mut("messages")
            .and_then(|m| m.get_mut(idx))
            .and_then(|m| m.get_mut("content"))
        else {
            return;
        };

        match content {
            Value::String(s) => *s = self.validator.sanitize(s),
            Value::Array(parts) => {
                for part in parts.iter_mut() {
                    if let Some(Value::String(s)) = part.get_mut("text") {
                        *s = self.validator.sanitize(s);
                    }
                }
                self.merge_split_matches(parts);
            }
            _ => {}
        }
    }

    /// A match spanning two text parts survives per-part redaction. When the
    /// joined text still has PII, the text parts collapse into the first one
    /// holding the redacted joined text. Non-text parts keep their place.
    fn merge_split_matches(&self, parts: &mut Vec<Value>) {
        let joined = parts
            .iter()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join(" ");
        if !self.validator.detector().contains_pii(&joined) {
            return;
        }

        tracing::debug!("PII spans content parts, merging text parts");
        let mut merged = Some(self.validator.sanitize(&joined));
        parts.retain_mut(|part| {
            if part.get("text").and_then(Value::as_str).is_none() {
                return true;
            }
            match merged.take() {
                Some(text) => {
                    part["text"] = Value::String(text);
                    true
                }
                None => false,
            }
        });
    }
}

impl Default for ChatInterceptor {
    fn default() -> Self {
        Self::from_config(&GuardConfig::default())
    }
}

#[cfg(test)]
#[path = "intercept_tests.rs"]
mod tests;
