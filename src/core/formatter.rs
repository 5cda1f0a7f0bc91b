//! Formatter trait for rendering records

use super::record::Record;

/// Renders a record into a single line of text.
///
/// Formatting is pure. A record that cannot be rendered yields an empty
/// string, which handlers skip.
pub trait Formatter: Send + Sync {
    /// `color` is set when the sink reports that it supports colors
    fn format(&self, record: &Record, color: bool) -> String;
    fn name(&self) -> &str;
}
