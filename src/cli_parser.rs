//! Usage and help text for phi-guard-cli.

/// Print general usage information.
pub fn print_usage() {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!(
        "phi-guard - PII/PHI detection and redaction for chat payloads v{}

USAGE:
    phi-guard-cli [COMMAND] [OPTIONS]

COMMANDS:
    scan         Detect PII and print the detection result with an audit record
    sanitize     Replace detected PII with category placeholders
    validate     Accept or reject text according to the validation mode
    intercept    Process a chat-completion request body
    config       Manage configuration (show, defaults, validate)
    version      Show version information
    help         Show this help message

INPUT OPTIONS:
    --text TEXT    Use TEXT as input
    --file PATH    Read input from PATH ('-' for stdin)
    --mode MODE    Override validation mode (strict, permissive)
    --json         JSON output where supported

    Input is read from stdin when neither --text nor --file is given.

EXAMPLES:
    phi-guard-cli scan --text \"CPF 123.456.789-10\"
    echo \"email a@example.com\" | phi-guard-cli sanitize
    phi-guard-cli validate --mode strict --file note.txt
    phi-guard-cli intercept --file request.json
    phi-guard-cli config defaults > phi-guard.toml

ENVIRONMENT:
    PHI_GUARD_CONFIG      Path to a TOML configuration file
    PHI_GUARD_MODE        Validation mode (strict, permissive)
    PHI_GUARD_MEDICAL     Enable medical routing (true, false)
    PHI_GUARD_PUBMED_URL  Literature tool server URL
    PHI_GUARD_LOG_FORMAT  Log output format (pretty, json)
    RUST_LOG              Log filter (debug, info, warn, error)

EXIT CODES:
    0  Success / no PII / accepted
    1  PII found / rejected / blocked
    2  Configuration error
    3  Input error
",
        version
    );
}

/// Print detailed help for a specific command.
pub fn print_command_help(command: &str) {
    match command {
        "scan" => print_scan_help(),
        "sanitize" => print_sanitize_help(),
        "validate" => print_validate_help(),
        "intercept" => print_intercept_help(),
        "config" => print_config_help(),
        _ => {
            eprintln!(
                "No detailed help available for '{}'. Use 'phi-guard-cli help' for general usage.",
                command
            );
        }
    }
}

fn print_scan_help() {
    eprintln!(
        "phi-guard-cli scan - Detect PII

USAGE:
    phi-guard-cli scan [--text TEXT | --file PATH] [--mode MODE]

DESCRIPTION:
    Prints the detection result (matches per category, risk level, message)
    and an audit record. The audit record carries a SHA-256 fingerprint of
    the input, never the input itself.

EXIT CODES:
    0  No PII detected
    1  PII detected
"
    );
}

fn print_sanitize_help() {
    eprintln!(
        "phi-guard-cli sanitize - Redact PII

USAGE:
    phi-guard-cli sanitize [--text TEXT | --file PATH] [--json]

DESCRIPTION:
    Replaces every match with its placeholder, e.g. [CPF REMOVED] or
    [EMAIL REMOVED]. Text without PII is printed unchanged.
"
    );
}

fn print_validate_help() {
    eprintln!(
        "phi-guard-cli validate - Accept or reject input

USAGE:
    phi-guard-cli validate [--text TEXT | --file PATH] [--mode MODE] [--json]

DESCRIPTION:
    strict      Any PII rejects the input (BLOCKED message)
    permissive  PII is reported but the input is accepted (WARNING message)

EXIT CODES:
    0  Accepted
    1  Rejected
"
    );
}

fn print_intercept_help() {
    eprintln!(
        "phi-guard-cli intercept - Process a chat-completion request body

USAGE:
    phi-guard-cli intercept [--file PATH] [--mode MODE]

DESCRIPTION:
    Reads an OpenAI-style request body, sanitizes the latest user message,
    applies medical routing and prints the outcome (rewritten, blocked or
    pass_through) with the response headers that would be attached.

EXIT CODES:
    0  Rewritten or passed through
    1  Blocked in strict mode
"
    );
}

fn print_config_help() {
    eprintln!(
        "phi-guard-cli config - Manage configuration

USAGE:
    phi-guard-cli config [SUBCOMMAND]

SUBCOMMANDS:
    show      Print the effective configuration as TOML (default)
    defaults  Print the default configuration as TOML
    validate  Check the configuration file and environment overrides

EXIT CODES:
    0  Configuration is valid
    2  Configuration error
"
    );
}
