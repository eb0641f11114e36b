// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RebuildwatchError {
    /// An input line that is not exactly `<path> <reason>`.
    #[error("malformed event on line {line_no}: {line:?} (expected \"<path> <reason>\")")]
    MalformedEvent { line_no: usize, line: String },

    /// The shell (or the command itself) could not be started.
    #[error("failed to spawn command `{cmd}`: {source}")]
    Spawn {
        cmd: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, RebuildwatchError>;
