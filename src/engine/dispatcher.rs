// src/engine/dispatcher.rs

use std::fmt;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::console::{ColorAllocator, ColorCode, Console};
use crate::errors::Result;
use crate::event::ChangeEvent;
use crate::exec::CommandExecutor;
use crate::filter::IgnoreFilter;
use crate::rules::DispatchTable;

use super::shutdown;
use super::{DispatchOutcome, DispatchSummary};

/// Reads change events and runs the commands they map to.
///
/// Owns the color allocator: each command line gets the next color, and the
/// executor tags every line of that command's output with it.
pub struct Dispatcher<E: CommandExecutor> {
    filter: IgnoreFilter,
    table: DispatchTable,
    console: Console,
    colors: ColorAllocator,
    executor: E,
    summary: DispatchSummary,
}

impl<E: CommandExecutor> fmt::Debug for Dispatcher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("colors", &self.colors)
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}

impl<E: CommandExecutor> Dispatcher<E> {
    pub fn new(filter: IgnoreFilter, table: DispatchTable, console: Console, executor: E) -> Self {
        Self {
            filter,
            table,
            console,
            colors: ColorAllocator::new(),
            executor,
            summary: DispatchSummary::default(),
        }
    }

    pub fn summary(&self) -> DispatchSummary {
        self.summary
    }

    /// Main loop.
    ///
    /// - Prints the "Starting" banner.
    /// - Handles `input` line by line until end-of-input or until shutdown is
    ///   requested through `shutdown_rx` (checked only between events).
    /// - Prints the "Done" banner and returns the run summary.
    ///
    /// A malformed line or a command that cannot be spawned aborts the loop
    /// with an error; no "Done" banner is printed in that case.
    pub async fn run<R>(
        mut self,
        input: R,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> Result<DispatchSummary>
    where
        R: AsyncBufRead + Unpin,
    {
        self.console.line("Starting", ColorCode::WHITE)?;
        info!("dispatcher started; waiting for change events");

        let mut lines = input.lines();
        let mut line_no = 0usize;

        loop {
            let line = tokio::select! {
                biased;
                _ = shutdown::requested(&mut shutdown_rx) => {
                    info!("shutdown requested; not reading further events");
                    break;
                }
                line = lines.next_line() => line?,
            };

            let Some(line) = line else {
                debug!("end of input");
                break;
            };

            line_no += 1;
            let event = ChangeEvent::parse_line(&line, line_no)?;
            self.handle_event(&event).await?;
        }

        self.console.line("Done", ColorCode::WHITE)?;
        info!(summary = %self.summary, "dispatcher finished");
        Ok(self.summary)
    }

    /// Filter, classify and dispatch a single event.
    pub async fn handle_event(&mut self, event: &ChangeEvent) -> Result<DispatchOutcome> {
        let outcome = self.dispatch(event).await?;
        self.summary.record(&outcome);
        Ok(outcome)
    }

    async fn dispatch(&mut self, event: &ChangeEvent) -> Result<DispatchOutcome> {
        let path = event.path.as_str();

        if let Some(rule) = self.filter.matching_rule(path, &event.reason) {
            debug!(path, reason = %event.reason, %rule, "ignoring change");
            return Ok(DispatchOutcome::Ignored);
        }

        self.console.line(
            &format!("\nDetected change ({}): {}", event.reason, path),
            ColorCode::WHITE,
        )?;

        let Some(rule) = self.table.classify(path) else {
            debug!(path, "no dispatch rule matches");
            self.console
                .emit(&format!("unknown file: {path}"), ColorCode::WHITE, "")?;
            return Ok(DispatchOutcome::Unknown);
        };

        let rule_name = rule.name.clone();
        if rule.is_pass_through() {
            debug!(path, rule = %rule_name, "rule is a pass-through; nothing to run");
            return Ok(DispatchOutcome::PassThrough { rule: rule_name });
        }

        let commands = rule.plan(self.table.reload());
        debug!(path, rule = %rule_name, ?commands, "dispatching");

        for command_line in &commands {
            let color = self.colors.next_color();
            self.executor.execute(command_line, color).await?;
        }

        Ok(DispatchOutcome::Dispatched {
            rule: rule_name,
            commands,
        })
    }
}
