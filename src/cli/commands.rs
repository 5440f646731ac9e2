//! CLI command implementations.
//!
//! Each `run_*` returns a process exit code:
//! 0 safe/accepted, 1 PII found/rejected, 2 configuration error, 3 input error.

use serde_json::{json, Value};

use crate::config::{self, GuardConfig};
use crate::intercept::{ChatInterceptor, InterceptOutcome};
use crate::security::{build_audit_record, PIISanitizer, PIIValidator};

use super::input::{parse_args, CommandArgs};

pub const EXIT_OK: i32 = 0;
pub const EXIT_FLAGGED: i32 = 1;
pub const EXIT_CONFIG: i32 = 2;
pub const EXIT_INPUT: i32 = 3;

/// Detection + audit record as one JSON document.
pub fn scan_report(text: &str, validator: &PIIValidator) -> Value {
    let result = validator.detect(text);
    let audit = build_audit_record(text, &result);
    json!({
        "detection": result,
        "audit": audit,
    })
}

/// Validation outcome as JSON.
pub fn validation_report(text: &str, validator: &PIIValidator) -> Value {
    let outcome = validator.validate(text);
    json!({
        "mode": validator.mode(),
        "accepted": outcome.accepted,
        "message": outcome.message,
        "categories": outcome.result.category_names(),
        "risk_level": outcome.result.risk_level(),
    })
}

/// Interception outcome as JSON, with the rewritten body decoded when present.
pub fn intercept_report(body: &[u8], interceptor: &ChatInterceptor) -> Value {
    match interceptor.intercept(body) {
        InterceptOutcome::Rewritten(req) => {
            let headers: serde_json::Map<String, Value> = req
                .pii
                .as_ref()
                .map(|signal| {
                    signal
                        .headers()
                        .into_iter()
                        .map(|(k, v)| (k.to_string(), Value::String(v)))
                        .collect()
                })
                .unwrap_or_default();
            let body: Value = serde_json::from_slice(&req.body).unwrap_or(Value::Null);
            json!({
                "outcome": "rewritten",
                "headers": headers,
                "medical": req.medical,
                "body": body,
            })
        }
        InterceptOutcome::Blocked { message, categories } => json!({
            "outcome": "blocked",
            "message": message,
            "categories": categories,
        }),
        InterceptOutcome::PassThrough(reason) => json!({
            "outcome": "pass_through",
            "reason": reason.as_str(),
        }),
    }
}

fn load_config() -> Result<GuardConfig, i32> {
    config::load().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        EXIT_CONFIG
    })
}

fn prepare(args: &[String]) -> Result<(CommandArgs, GuardConfig, String), i32> {
    let parsed = parse_args(args).map_err(|e| {
        eprintln!("{}", e);
        EXIT_INPUT
    })?;
    let config = load_config()?;
    let text = parsed.input.read().map_err(|e| {
        eprintln!("{}", e);
        EXIT_INPUT
    })?;
    Ok((parsed, config, text))
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to render output: {}", e),
    }
}

pub fn run_scan(args: &[String]) -> i32 {
    let (parsed, config, text) = match prepare(args) {
        Ok(p) => p,
        Err(code) => return code,
    };
    let validator = PIIValidator::new(parsed.mode.unwrap_or(config.mode));
    let report = scan_report(&text, &validator);
    print_json(&report);
    if report["detection"]["is_safe"] == Value::Bool(true) {
        EXIT_OK
    } else {
        EXIT_FLAGGED
    }
}

pub fn run_sanitize(args: &[String]) -> i32 {
    let (parsed, _config, text) = match prepare(args) {
        Ok(p) => p,
        Err(code) => return code,
    };
    let result = PIISanitizer::default_sanitizer().sanitize_detailed(&text);
    if parsed.json {
        let categories: Vec<&str> = result.categories.iter().map(|c| c.as_str()).collect();
        print_json(&json!({
            "output": result.output,
            "modified": result.modified,
            "pii_redacted": result.pii_redacted,
            "categories": categories,
        }));
    } else {
        println!("{}", result.output);
    }
    EXIT_OK
}

pub fn run_validate(args: &[String]) -> i32 {
    let (parsed, config, text) = match prepare(args) {
        Ok(p) => p,
        Err(code) => return code,
    };
    let validator = PIIValidator::new(parsed.mode.unwrap_or(config.mode));
    let report = validation_report(&text, &validator);
    if parsed.json {
        print_json(&report);
    } else {
        println!("{}", report["message"].as_str().unwrap_or_default());
    }
    if report["accepted"] == Value::Bool(true) {
        EXIT_OK
    } else {
        EXIT_FLAGGED
    }
}

pub fn run_intercept(args: &[String]) -> i32 {
    let (parsed, mut config, body) = match prepare(args) {
        Ok(p) => p,
        Err(code) => return code,
    };
    if let Some(mode) = parsed.mode {
        config.mode = mode;
    }
    let report = intercept_report(body.as_bytes(), &ChatInterceptor::from_config(&config));
    print_json(&report);
    if report["outcome"] == "blocked" {
        EXIT_FLAGGED
    } else {
        EXIT_OK
    }
}

pub fn run_config_show() -> i32 {
    let config = match load_config() {
        Ok(c) => c,
        Err(code) => return code,
    };
    print_toml(&config)
}

pub fn run_config_defaults() -> i32 {
    print_toml(&GuardConfig::default())
}

pub fn run_config_validate() -> i32 {
    match config::load() {
        Ok(config) => {
            println!("Configuration OK (mode: {})", config.mode);
            EXIT_OK
        }
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            EXIT_CONFIG
        }
    }
}

fn print_toml(config: &GuardConfig) -> i32 {
    match config.to_toml() {
        Ok(s) => {
            print!("{}", s);
            EXIT_OK
        }
        Err(e) => {
            eprintln!("{}", e);
            EXIT_CONFIG
        }
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
