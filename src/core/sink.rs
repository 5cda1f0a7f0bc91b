//! Sink trait for byte destinations

use super::error::Result;

/// A destination for formatted records.
///
/// Sinks receive one complete, newline-terminated record per `write` call.
/// They are owned by a single handler, which serializes access.
pub trait Sink: Send {
    fn write(&mut self, bytes: &[u8]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;

    /// Whether the destination can render terminal colors
    fn supports_color(&self) -> bool {
        false
    }
}
