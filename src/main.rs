//! PHI-GUARD command-line entry point.
//!
//! Scans, sanitizes and validates text or chat request bodies against the
//! PII catalog. Output goes to stdout, logs to stderr.

mod cli_parser;

use std::process::ExitCode;

use phi_guard::cli::{
    run_config_defaults, run_config_show, run_config_validate, run_intercept, run_sanitize,
    run_scan, run_validate,
};
use phi_guard::config::{self, LogFormat};
use phi_guard::logging;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("help");
    let rest = args.get(2..).unwrap_or_default();

    init_logging();

    match command {
        "scan" => exit(run_scan(rest)),
        "sanitize" => exit(run_sanitize(rest)),
        "validate" => exit(run_validate(rest)),
        "intercept" => exit(run_intercept(rest)),
        "config" => run_config_cmd(&args),
        "help" | "--help" | "-h" => {
            if let Some(sub) = args.get(2) {
                cli_parser::print_command_help(sub);
            } else {
                cli_parser::print_usage();
            }
            ExitCode::SUCCESS
        }
        "version" | "--version" | "-V" => {
            println!("phi-guard {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            cli_parser::print_usage();
            ExitCode::FAILURE
        }
    }
}

/// Log format comes from config; a broken config still gets pretty logs so
/// the command can report the error.
fn init_logging() {
    let format = config::load().map(|c| c.log_format).unwrap_or(LogFormat::Pretty);
    logging::init(format);
}

fn exit(code: i32) -> ExitCode {
    ExitCode::from(code as u8)
}

fn run_config_cmd(args: &[String]) -> ExitCode {
    let sub = args.get(2).map(|s| s.as_str()).unwrap_or("show");
    match sub {
        "show" => exit(run_config_show()),
        "defaults" => exit(run_config_defaults()),
        "validate" => exit(run_config_validate()),
        _ => {
            eprintln!("Unknown config subcommand: {}", sub);
            cli_parser::print_command_help("config");
            ExitCode::FAILURE
        }
    }
}
