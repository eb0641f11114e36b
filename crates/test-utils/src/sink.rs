use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use rebuildwatch::console::Console;

/// In-memory `Write` sink whose contents stay readable after it has been
/// moved into a [`Console`].
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A console writing into a fresh buffer, plus the buffer itself.
    pub fn console(colored: bool) -> (Console, SharedBuffer) {
        let buffer = SharedBuffer::new();
        (Console::new(buffer.clone(), colored), buffer)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock().unwrap()).into_owned()
    }

    /// Contents split into lines, terminators removed.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
