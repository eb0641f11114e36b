// src/console/mod.rs

//! Color-coded console output.
//!
//! [`Console`] is the single place that writes to the user-facing output
//! stream (STDOUT in production). It is cheap to clone and can be shared by
//! the dispatcher and by the stdout/stderr drain tasks of a running command:
//! every [`Console::emit`] call renders its whole line into one buffer and
//! writes + flushes it under a lock, so lines from concurrent callers never
//! interleave mid-line.
//!
//! Diagnostics go through `tracing` (STDERR) instead.

pub mod color;

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

pub use color::{ColorAllocator, ColorCode};

/// Default line terminator for [`Console::emit`].
pub const NEWLINE: &str = "\n";

type Sink = Box<dyn Write + Send>;

/// Thread-safe, flushing, ANSI-colored line writer.
#[derive(Clone)]
pub struct Console {
    sink: Arc<Mutex<Sink>>,
    colored: bool,
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("colored", &self.colored)
            .finish_non_exhaustive()
    }
}

impl Console {
    /// Console writing to the given sink.
    pub fn new<W>(sink: W, colored: bool) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            sink: Arc::new(Mutex::new(Box::new(sink))),
            colored,
        }
    }

    /// Console writing to the process STDOUT.
    pub fn stdout(colored: bool) -> Self {
        Self::new(io::stdout(), colored)
    }

    /// Write one message as `<escape><message><line_end>` and flush.
    ///
    /// A message starting with `'\n'` has that newline moved in front of the
    /// color escape, which renders as a blank separator line.
    pub fn emit(&self, message: &str, color: ColorCode, line_end: &str) -> io::Result<()> {
        let rendered = self.render(message, color, line_end);

        // Keep writing even if another writer panicked while holding the lock.
        let mut sink = self.sink.lock().unwrap_or_else(|e| e.into_inner());
        sink.write_all(rendered.as_bytes())?;
        sink.flush()
    }

    /// [`Console::emit`] with the default newline terminator.
    pub fn line(&self, message: &str, color: ColorCode) -> io::Result<()> {
        self.emit(message, color, NEWLINE)
    }

    fn render(&self, message: &str, color: ColorCode, line_end: &str) -> String {
        let (leading, body) = match message.strip_prefix('\n') {
            Some(rest) => ("\n", rest),
            None => ("", message),
        };

        let escape = if self.colored {
            color.escape()
        } else {
            String::new()
        };

        let mut out =
            String::with_capacity(leading.len() + escape.len() + body.len() + line_end.len());
        out.push_str(leading);
        out.push_str(&escape);
        out.push_str(body);
        out.push_str(line_end);
        out
    }
}
