// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The dispatcher talks to a `CommandExecutor` instead of spawning processes
//! itself, so tests can swap in a recorder while production uses
//! [`ShellExecutor`], which runs everything through [`run_command`].

use std::future::Future;
use std::pin::Pin;

use crate::console::{ColorCode, Console};
use crate::errors::Result;

use super::runner::run_command;

/// Trait abstracting how a dispatched command line is executed.
pub trait CommandExecutor: Send {
    /// Run `command_line` to completion, tagging its output with `color`.
    ///
    /// Must not return before the command and all of its output are done.
    /// Only a failure to start the command is an error; its exit status is
    /// not.
    fn execute<'a>(
        &'a mut self,
        command_line: &'a str,
        color: ColorCode,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}

/// Real executor used in production: spawns shell processes and streams
/// their output to the console.
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    console: Console,
}

impl ShellExecutor {
    pub fn new(console: Console) -> Self {
        Self { console }
    }
}

impl CommandExecutor for ShellExecutor {
    fn execute<'a>(
        &'a mut self,
        command_line: &'a str,
        color: ColorCode,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(run_command(&self.console, command_line, color))
    }
}
