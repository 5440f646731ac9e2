//! CLI Module
//!
//! Command implementations for the `phi-guard-cli` binary. The functions
//! return exit codes so the binary stays a thin dispatcher.

pub mod commands;
pub mod input;

pub use commands::{
    intercept_report, run_config_defaults, run_config_show, run_config_validate, run_intercept,
    run_sanitize, run_scan, run_validate, scan_report, validation_report, EXIT_CONFIG,
    EXIT_FLAGGED, EXIT_INPUT, EXIT_OK,
};
pub use input::{parse_args, CommandArgs, InputError, InputSource};
