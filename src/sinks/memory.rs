//! In-memory capture sink

use crate::core::{Result, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

/// Captures written lines in a shared buffer.
///
/// Clones share the same buffer, so a test can keep one clone and hand the
/// other to a handler.
///
/// ```
/// use rust_leveled_logger::sinks::{MemorySink, Sink};
///
/// let capture = MemorySink::new();
/// let mut sink = capture.clone();
/// sink.write(b"hello\n").unwrap();
/// assert_eq!(capture.lines(), vec!["hello".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
    color: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report color support, for exercising colored output
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Snapshot of captured lines, without trailing newlines
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl Sink for MemorySink {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let text = String::from_utf8_lossy(bytes);
        let line = text.strip_suffix('\n').unwrap_or(&text);
        self.lines.lock().push(line.to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }

    fn supports_color(&self) -> bool {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() {
        let capture = MemorySink::new();
        let mut writer = capture.clone();

        writer.write(b"one\n").unwrap();
        writer.write(b"two").unwrap();

        assert_eq!(capture.len(), 2);
        assert_eq!(capture.lines(), vec!["one", "two"]);

        capture.clear();
        assert!(writer.is_empty());
    }
}
