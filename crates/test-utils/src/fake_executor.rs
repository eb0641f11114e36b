use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use rebuildwatch::console::ColorCode;
use rebuildwatch::errors::Result;
use rebuildwatch::exec::CommandExecutor;

/// A fake executor that:
/// - records every command line (and its color) it is asked to run
/// - spawns nothing and always succeeds.
#[derive(Debug, Clone, Default)]
pub struct RecordingExecutor {
    executed: Arc<Mutex<Vec<(String, ColorCode)>>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Command lines in execution order.
    pub fn commands(&self) -> Vec<String> {
        self.executed
            .lock()
            .unwrap()
            .iter()
            .map(|(cmd, _)| cmd.clone())
            .collect()
    }

    /// Colors in execution order.
    pub fn colors(&self) -> Vec<ColorCode> {
        self.executed.lock().unwrap().iter().map(|(_, c)| *c).collect()
    }
}

impl CommandExecutor for RecordingExecutor {
    fn execute<'a>(
        &'a mut self,
        command_line: &'a str,
        color: ColorCode,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        let executed = Arc::clone(&self.executed);

        Box::pin(async move {
            executed
                .lock()
                .unwrap()
                .push((command_line.to_string(), color));
            Ok(())
        })
    }
}
