// src/engine/mod.rs

//! Event dispatch engine.
//!
//! The dispatcher reads one change event at a time, filters it, classifies
//! the path against the dispatch table and runs the resulting commands one
//! after another. Nothing is queued or coalesced: an event and everything it
//! triggers finish before the next line of input is read.

use std::fmt;

pub mod dispatcher;
pub mod shutdown;

pub use dispatcher::Dispatcher;
pub use shutdown::{shutdown_channel, spawn_ctrl_c_listener};

/// What happened to a single change event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Suppressed by the ignore filter; nothing was printed.
    Ignored,
    /// Matched a rule that deliberately does nothing.
    PassThrough { rule: String },
    /// Matched a rule; these command lines were run in order.
    Dispatched { rule: String, commands: Vec<String> },
    /// No rule matched.
    Unknown,
}

/// Counters over one dispatcher run, logged at exit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub events: usize,
    pub ignored: usize,
    pub pass_through: usize,
    pub dispatched: usize,
    pub unknown: usize,
    pub commands: usize,
}

impl DispatchSummary {
    pub fn record(&mut self, outcome: &DispatchOutcome) {
        self.events += 1;
        match outcome {
            DispatchOutcome::Ignored => self.ignored += 1,
            DispatchOutcome::PassThrough { .. } => self.pass_through += 1,
            DispatchOutcome::Dispatched { commands, .. } => {
                self.dispatched += 1;
                self.commands += commands.len();
            }
            DispatchOutcome::Unknown => self.unknown += 1,
        }
    }
}

impl fmt::Display for DispatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} events ({} ignored, {} passed through, {} dispatched, {} unknown), {} commands run",
            self.events,
            self.ignored,
            self.pass_through,
            self.dispatched,
            self.unknown,
            self.commands
        )
    }
}
