// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`runner`] spawns a shell command with `tokio::process::Command` and
//!   drains its stdout and stderr concurrently into the console.
//! - [`backend`] provides the `CommandExecutor` trait the dispatcher uses and
//!   the production `ShellExecutor`; tests provide their own implementation.

pub mod backend;
pub mod runner;

pub use backend::{CommandExecutor, ShellExecutor};
pub use runner::{run_command, OutputStream, OUTPUT_PREFIX};
