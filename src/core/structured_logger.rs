//! Structured logger front end

use super::{
    error::{LoggerError, Result},
    fields::{FieldValue, Fields},
    level::Level,
    pipeline::Pipeline,
    record::Payload,
};

/// Logger whose records carry key/value fields instead of a message.
///
/// Anything convertible into [`Fields`] can be logged: a `Fields` value, a
/// `Vec<(K, V)>`, a `HashMap<String, V>`, or an alternating key/value list
/// built with [`kv!`](crate::kv).
///
/// ```
/// use rust_leveled_logger::prelude::*;
/// use rust_leveled_logger::kv;
///
/// let capture = MemorySink::new();
/// let logger = StructuredLogger::new("audit");
/// logger.add_handler(
///     Handler::new(Level::All, Level::Null, TemplateFormatter::new("{message}"), capture.clone())
///         .unwrap(),
/// );
///
/// logger.info(kv!["user", "alice", "action", "login"]);
/// assert_eq!(capture.lines(), vec!["action=login user=alice"]);
/// ```
#[derive(Debug)]
pub struct StructuredLogger {
    pipeline: Pipeline,
}

impl StructuredLogger {
    front_end_methods!(Fields, fields => Payload::fields);

    /// Log an alternating `key, value, ...` sequence; an unpaired trailing
    /// key is dropped
    #[track_caller]
    pub fn log_pairs<I>(&self, level: Level, pairs: I)
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        self.log(level, Fields::from_pairs(pairs));
    }

    /// Log `fields` at `Error` and return them, rendered as `key=value`
    /// pairs, inside [`LoggerError::Logged`]
    #[track_caller]
    pub fn fail<T>(&self, fields: impl Into<Fields>) -> Result<T> {
        let fields = fields.into();
        let rendered = fields.format_pairs();
        self.try_log(Level::Error, fields)?;
        Err(LoggerError::Logged(rendered))
    }

    /// Log `fields` at `Emergency`, wait for them to be written, then panic
    #[track_caller]
    pub fn panic(&self, fields: impl Into<Fields>) -> ! {
        let fields = fields.into();
        let rendered = fields.format_pairs();
        if let Err(e) = self.try_log(Level::Emergency, fields) {
            eprintln!("[LOGGER ERROR] {}", e);
        }
        self.pipeline.wait();
        panic!("{}", rendered);
    }
}
