//! Synchronous fan-out of records to handlers

use super::{
    error::Result,
    handler::{Handler, HandlerId},
    level::Level,
    metrics::LoggerMetrics,
    record::{Payload, Record},
    timestamp::TimestampFormat,
};
use parking_lot::RwLock;
use std::panic::{self, AssertUnwindSafe, Location};
use std::sync::Arc;

type HandlerList = Arc<Vec<Arc<Handler>>>;

/// Fans each record out to every registered handler whose level window
/// contains the record's level, in registration order, on the calling
/// thread.
///
/// The handler list is copy-on-write: registration swaps in a new list, and
/// a fan-out in progress keeps iterating the list it started with.
pub struct Dispatcher {
    name: Arc<str>,
    time_format: Arc<TimestampFormat>,
    handlers: RwLock<HandlerList>,
    metrics: Arc<LoggerMetrics>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            time_format: Arc::new(TimestampFormat::default()),
            handlers: RwLock::new(Arc::new(Vec::new())),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    #[must_use]
    pub fn with_time_format(mut self, format: TimestampFormat) -> Self {
        self.time_format = Arc::new(format);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn time_format(&self) -> &TimestampFormat {
        &self.time_format
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Register a handler at the end of the fan-out order
    pub fn add_handler(&self, handler: Handler) -> HandlerId {
        let id = handler.id();
        let handler = Arc::new(handler);
        let mut handlers = self.handlers.write();
        let mut next = Vec::with_capacity(handlers.len() + 1);
        next.extend(handlers.iter().cloned());
        next.push(handler);
        *handlers = Arc::new(next);
        id
    }

    /// Remove a handler by identity.
    ///
    /// Returns `false` and leaves the list untouched when no handler has this
    /// id.
    pub fn remove_handler(&self, id: HandlerId) -> bool {
        let mut handlers = self.handlers.write();
        if !handlers.iter().any(|h| h.id() == id) {
            return false;
        }
        let next: Vec<_> = handlers.iter().filter(|h| h.id() != id).cloned().collect();
        *handlers = Arc::new(next);
        true
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }

    pub fn handler_ids(&self) -> Vec<HandlerId> {
        self.handlers.read().iter().map(|h| h.id()).collect()
    }

    /// Whether any handler would accept a record at `level`
    pub fn is_enabled(&self, level: Level) -> bool {
        self.handlers.read().iter().any(|h| h.accepts(level))
    }

    /// Build a record for this dispatcher on the calling thread
    pub fn record(
        &self,
        level: Level,
        payload: Payload,
        location: &'static Location<'static>,
    ) -> Record {
        Record::new(
            Arc::clone(&self.name),
            level,
            Arc::clone(&self.time_format),
            payload,
            location,
        )
    }

    /// Build a record and write it to all matching handlers
    pub fn log(&self, level: Level, payload: Payload, location: &'static Location<'static>) {
        let record = self.record(level, payload, location);
        self.write(&record);
    }

    /// Write an existing record to all matching handlers.
    ///
    /// Handler errors and panics are reported on stderr and counted; they
    /// never stop the remaining handlers from running. The record counts as
    /// written only if at least one handler emitted it.
    pub fn write(&self, record: &Record) {
        let handlers = Arc::clone(&self.handlers.read());
        let mut written = false;

        for (idx, handler) in handlers.iter().enumerate() {
            if !handler.accepts(record.level()) {
                continue;
            }

            let result = panic::catch_unwind(AssertUnwindSafe(|| handler.write(record)));
            match result {
                Ok(Ok(true)) => written = true,
                Ok(Ok(false)) => {
                    self.metrics.record_format_failure();
                }
                Ok(Err(e)) => {
                    self.metrics.record_failed_write();
                    eprintln!(
                        "[LOGGER ERROR] Handler #{} of '{}' failed: {}",
                        idx, self.name, e
                    );
                }
                Err(panic_info) => {
                    self.metrics.record_failed_write();
                    eprintln!(
                        "[LOGGER CRITICAL] Handler #{} of '{}' panicked: {}. \
                         Other handlers continue to function.",
                        idx,
                        self.name,
                        panic_message(panic_info.as_ref())
                    );
                }
            }
        }

        if written {
            self.metrics.record_written();
        }
    }

    /// Flush every handler, returning the first error
    pub fn flush(&self) -> Result<()> {
        let handlers = Arc::clone(&self.handlers.read());
        let mut first_error = None;
        for handler in handlers.iter() {
            if let Err(e) = handler.flush() {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Flush every handler, reporting failures on stderr
    pub(crate) fn flush_quietly(&self) {
        let handlers = Arc::clone(&self.handlers.read());
        for (idx, handler) in handlers.iter().enumerate() {
            let result = panic::catch_unwind(AssertUnwindSafe(|| handler.flush()));
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Handler #{} of '{}' flush failed: {}",
                        idx, self.name, e
                    );
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Handler #{} of '{}' panicked during flush: {}",
                        idx,
                        self.name,
                        panic_message(panic_info.as_ref())
                    );
                }
            }
        }
    }
}

pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("name", &self.name)
            .field("time_format", &self.time_format)
            .field("handlers", &self.handler_count())
            .finish()
    }
}
