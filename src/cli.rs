// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `rebuildwatch`.
///
/// Change events are read from STDIN (or `--input`), one `<path> <reason>`
/// pair per line, typically piped in from a filesystem watcher:
///
/// `fswatch -r -x . | rebuildwatch`
#[derive(Debug, Clone, Parser)]
#[command(
    name = "rebuildwatch",
    version,
    about = "Rebuild and reload on file changes read from a watcher's event stream.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to a TOML file with ignore/dispatch tables.
    ///
    /// Default: `Rebuildwatch.toml` if it exists, else the built-in tables.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Read events from this file instead of STDIN.
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `REBUILDWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the effective ignore and dispatch tables, then exit.
    #[arg(long)]
    pub dry_run: bool,

    /// Do not emit ANSI color escapes.
    #[arg(long)]
    pub no_color: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
