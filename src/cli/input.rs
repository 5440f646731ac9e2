//! Argument and input handling shared by the CLI commands.

use std::io::Read;
use std::path::PathBuf;

use thiserror::Error;

use crate::security::ValidationMode;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Missing value for {0}")]
    MissingValue(String),
    #[error("Unknown argument: {0}")]
    UnknownArgument(String),
    #[error("Failed to read {source_name}: {source}")]
    Read {
        source_name: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Mode(#[from] crate::config::ConfigError),
}

/// Where the command reads its text from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputSource {
    Text(String),
    File(PathBuf),
    #[default]
    Stdin,
}

impl InputSource {
    pub fn read(&self) -> Result<String, InputError> {
        match self {
            InputSource::Text(text) => Ok(text.clone()),
            InputSource::File(path) => {
                std::fs::read_to_string(path).map_err(|source| InputError::Read {
                    source_name: path.display().to_string(),
                    source,
                })
            }
            InputSource::Stdin => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .map_err(|source| InputError::Read { source_name: "stdin".to_string(), source })?;
                Ok(buf)
            }
        }
    }
}

/// Options common to the text-processing commands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandArgs {
    pub input: InputSource,
    pub mode: Option<ValidationMode>,
    pub json: bool,
}

/// Parse arguments after the command name.
pub fn parse_args(args: &[String]) -> Result<CommandArgs, InputError> {
    let mut parsed = CommandArgs::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--text" => {
                let value = args.get(i + 1).ok_or_else(|| InputError::MissingValue("--text".into()))?;
                parsed.input = InputSource::Text(value.clone());
                i += 2;
            }
            "--file" => {
                let value = args.get(i + 1).ok_or_else(|| InputError::MissingValue("--file".into()))?;
                parsed.input = if value == "-" {
                    InputSource::Stdin
                } else {
                    InputSource::File(PathBuf::from(value))
                };
                i += 2;
            }
            "--mode" => {
                let value = args.get(i + 1).ok_or_else(|| InputError::MissingValue("--mode".into()))?;
                parsed.mode = Some(value.parse()?);
                i += 2;
            }
            "--json" => {
                parsed.json = true;
                i += 1;
            }
            other => return Err(InputError::UnknownArgument(other.to_string())),
        }
    }
    Ok(parsed)
}
