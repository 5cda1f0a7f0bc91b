//! Immutable snapshot of one logging event

use super::fields::{escape_line_breaks, Fields};
use super::level::Level;
use super::timestamp::TimestampFormat;
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::panic::Location;
use std::sync::Arc;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

/// Get cached thread ID, computing and caching it on first access
fn get_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

/// Get cached thread name, computing and caching it on first access
fn get_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

/// What a record carries: a formatted message or structured fields
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Message(String),
    Fields(Fields),
}

impl Payload {
    /// Free-text payload with line breaks and tabs escaped so that one call
    /// always produces one output line
    pub fn message(message: impl Into<String>) -> Self {
        Payload::Message(escape_line_breaks(&message.into()))
    }

    pub fn fields(fields: impl Into<Fields>) -> Self {
        Payload::Fields(fields.into())
    }

    pub fn as_message(&self) -> Option<&str> {
        match self {
            Payload::Message(message) => Some(message),
            Payload::Fields(_) => None,
        }
    }

    pub fn as_fields(&self) -> Option<&Fields> {
        match self {
            Payload::Message(_) => None,
            Payload::Fields(fields) => Some(fields),
        }
    }
}

/// A single log event.
///
/// Built on the thread that made the log call, so the timestamp, thread and
/// call site describe the call itself even when the record is written later
/// by a background consumer.
#[derive(Debug, Clone)]
pub struct Record {
    name: Arc<str>,
    level: Level,
    timestamp: DateTime<Utc>,
    time_format: Arc<TimestampFormat>,
    location: &'static Location<'static>,
    thread_id: String,
    thread_name: Option<String>,
    payload: Payload,
}

impl Record {
    pub fn new(
        name: Arc<str>,
        level: Level,
        time_format: Arc<TimestampFormat>,
        payload: Payload,
        location: &'static Location<'static>,
    ) -> Self {
        Self {
            name,
            level,
            timestamp: Utc::now(),
            time_format,
            location,
            thread_id: get_thread_id(),
            thread_name: get_thread_name(),
            payload,
        }
    }

    /// Name of the logger that produced this record
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn timestamp(&self) -> &DateTime<Utc> {
        &self.timestamp
    }

    pub fn time_format(&self) -> &TimestampFormat {
        &self.time_format
    }

    /// Timestamp rendered with the logger's time format
    pub fn formatted_time(&self) -> String {
        self.time_format.format(&self.timestamp)
    }

    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    pub fn file(&self) -> &'static str {
        self.location.file()
    }

    pub fn line(&self) -> u32 {
        self.location.line()
    }

    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }

    pub fn thread_name(&self) -> Option<&str> {
        self.thread_name.as_deref()
    }

    /// Thread name when available, otherwise the thread id
    pub fn thread(&self) -> &str {
        self.thread_name.as_deref().unwrap_or(&self.thread_id)
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }
}
