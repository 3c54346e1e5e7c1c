// Command-line configuration and tunables for the plc binary

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Delay between automatic steps while the explorer is playing
pub const PLAY_INTERVAL: Duration = Duration::from_millis(400);

/// How long the explorer waits for a key before redrawing
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Minimum gap between two accepted play/pause toggles (key repeat guard)
pub const KEY_DEBOUNCE: Duration = Duration::from_millis(200);

/// What the binary does with the input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Interactive terminal explorer
    #[default]
    Explore,
    /// Print the token sequence, one token per line
    Tokens,
    /// Print the syntax tree
    Ast,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub path: PathBuf,
    pub mode: Mode,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no input file provided")]
    MissingPath,
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
    #[error("--tokens and --ast cannot be combined")]
    ConflictingModes,
}

impl Config {
    /// Build a config from the command-line arguments (program name excluded).
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut path = None;
        let mut mode = None;

        for arg in args {
            let requested = match arg.as_str() {
                "--tokens" => Mode::Tokens,
                "--ast" => Mode::Ast,
                option if option.starts_with("--") => {
                    return Err(ConfigError::UnknownOption(arg));
                }
                _ => {
                    if path.is_some() {
                        return Err(ConfigError::UnexpectedArgument(arg));
                    }
                    path = Some(PathBuf::from(arg));
                    continue;
                }
            };

            if mode.is_some_and(|current| current != requested) {
                return Err(ConfigError::ConflictingModes);
            }
            mode = Some(requested);
        }

        Ok(Config {
            path: path.ok_or(ConfigError::MissingPath)?,
            mode: mode.unwrap_or_default(),
        })
    }
}

/// Usage text shown when the arguments are invalid.
pub fn usage(program_name: &str) -> String {
    format!(
        "Usage: {program_name} <file.plc> [--tokens | --ast]\n\
         \n\
         Modes:\n\
         \x20 (default)   explore tokens and syntax tree in the terminal\n\
         \x20 --tokens    print one token per line: offset, kind, text\n\
         \x20 --ast       print the syntax tree\n\
         \n\
         Set RUST_LOG=plc=debug to trace the lexer and parser on stderr."
    )
}
