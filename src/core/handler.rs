//! Handlers: a level window bound to a formatter and a sink

use super::{
    error::{LoggerError, Result},
    formatter::Formatter,
    level::Level,
    record::Record,
    sink::Sink,
};
use crate::formatters::TemplateFormatter;
use crate::sinks::{ConsoleSink, FileSink};
use parking_lot::Mutex;
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_HANDLER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique handler identity, used for removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u64);

impl HandlerId {
    fn next() -> Self {
        HandlerId(NEXT_HANDLER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Writes records whose level falls in `[from, to]` to one sink.
///
/// # Example
///
/// ```
/// use rust_leveled_logger::prelude::*;
///
/// let capture = MemorySink::new();
/// let handler = Handler::new(
///     Level::Warning,
///     Level::Null,
///     TemplateFormatter::new("{message}"),
///     capture.clone(),
/// )
/// .unwrap();
///
/// assert!(handler.accepts(Level::Error));
/// assert!(!handler.accepts(Level::Info));
/// ```
pub struct Handler {
    id: HandlerId,
    from: Level,
    to: Level,
    formatter: Box<dyn Formatter>,
    sink: Mutex<Box<dyn Sink>>,
}

impl Handler {
    /// Create a handler; fails when `from` is above `to`
    pub fn new<F, S>(from: Level, to: Level, formatter: F, sink: S) -> Result<Self>
    where
        F: Formatter + 'static,
        S: Sink + 'static,
    {
        Self::from_boxed(from, to, Box::new(formatter), Box::new(sink))
    }

    pub fn from_boxed(
        from: Level,
        to: Level,
        formatter: Box<dyn Formatter>,
        sink: Box<dyn Sink>,
    ) -> Result<Self> {
        if from > to {
            return Err(LoggerError::InvalidLevelWindow { from, to });
        }
        Ok(Self {
            id: HandlerId::next(),
            from,
            to,
            formatter,
            sink: Mutex::new(sink),
        })
    }

    /// Handler writing to stdout
    pub fn console<F: Formatter + 'static>(from: Level, to: Level, formatter: F) -> Result<Self> {
        Self::new(from, to, formatter, ConsoleSink::stdout())
    }

    /// Handler writing to stderr
    pub fn stderr<F: Formatter + 'static>(from: Level, to: Level, formatter: F) -> Result<Self> {
        Self::new(from, to, formatter, ConsoleSink::stderr())
    }

    /// Handler appending to a file
    pub fn file<F: Formatter + 'static>(
        from: Level,
        to: Level,
        formatter: F,
        path: impl Into<PathBuf>,
    ) -> Result<Self> {
        Self::new(from, to, formatter, FileSink::new(path)?)
    }

    /// Warning-and-above to the console with the default template
    pub fn default_console() -> Self {
        Self {
            id: HandlerId::next(),
            from: Level::Warning,
            to: Level::Null,
            formatter: Box::new(TemplateFormatter::default()),
            sink: Mutex::new(Box::new(ConsoleSink::stdout())),
        }
    }

    pub fn id(&self) -> HandlerId {
        self.id
    }

    pub fn from_level(&self) -> Level {
        self.from
    }

    pub fn to_level(&self) -> Level {
        self.to
    }

    pub fn formatter_name(&self) -> &str {
        self.formatter.name()
    }

    #[inline]
    pub fn accepts(&self, level: Level) -> bool {
        self.from <= level && level <= self.to
    }

    /// Format and write `record`.
    ///
    /// Returns `Ok(false)` without touching the sink when the record's level
    /// is outside this handler's window, and also when the formatter produced
    /// no output.
    pub fn write(&self, record: &Record) -> Result<bool> {
        if !self.accepts(record.level()) {
            return Ok(false);
        }

        let mut sink = self.sink.lock();
        let mut line = self.formatter.format(record, sink.supports_color());
        if line.is_empty() {
            return Ok(false);
        }
        line.push('\n');
        sink.write(line.as_bytes())?;
        Ok(true)
    }

    pub fn flush(&self) -> Result<()> {
        self.sink.lock().flush()
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("id", &self.id)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("formatter", &self.formatter.name())
            .field("sink", &self.sink.lock().name())
            .finish()
    }
}
