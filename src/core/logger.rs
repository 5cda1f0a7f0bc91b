//! Free-text logger front end and the builder shared by both front ends

use super::{
    async_dispatcher::AsyncDispatcher,
    dispatcher::Dispatcher,
    error::{LoggerError, Result},
    handler::Handler,
    level::Level,
    pipeline::Pipeline,
    record::Payload,
    structured_logger::StructuredLogger,
    timestamp::TimestampFormat,
};

/// Free-text logger.
///
/// Every logging method captures its caller's source location, so records
/// point at the line that made the call even when they are written later by
/// an async consumer. Use the [`log!`](crate::log) family of macros for
/// `format!`-style messages.
///
/// # Example
///
/// ```
/// use rust_leveled_logger::prelude::*;
///
/// let capture = MemorySink::new();
/// let logger = Logger::new("app");
/// logger.add_handler(
///     Handler::new(Level::Info, Level::Null, TemplateFormatter::new("{level} {message}"), capture.clone())
///         .unwrap(),
/// );
///
/// logger.info("Server started");
/// logger.debug("not shown");
/// assert_eq!(capture.lines(), vec!["INFO Server started"]);
/// ```
#[derive(Debug)]
pub struct Logger {
    pipeline: Pipeline,
}

impl Logger {
    front_end_methods!(String, message => Payload::message);

    /// Log `message` at `Error` and hand it back as an error.
    ///
    /// ```
    /// use rust_leveled_logger::{Logger, LoggerError};
    ///
    /// fn load(logger: &Logger) -> Result<u32, LoggerError> {
    ///     logger.fail("config file missing")
    /// }
    ///
    /// let err = load(&Logger::new("app")).unwrap_err();
    /// assert_eq!(err.to_string(), "config file missing");
    /// ```
    #[track_caller]
    pub fn fail<T>(&self, message: impl Into<String>) -> Result<T> {
        let message = message.into();
        self.try_log(Level::Error, message.clone())?;
        Err(LoggerError::Logged(message))
    }

    /// Log `message` at `Emergency`, wait for it to be written, then panic
    #[track_caller]
    pub fn panic(&self, message: impl Into<String>) -> ! {
        let message = message.into();
        if let Err(e) = self.try_log(Level::Emergency, message.clone()) {
            eprintln!("[LOGGER ERROR] {}", e);
        }
        self.pipeline.wait();
        panic!("{}", message);
    }
}

/// Builder for [`Logger`] and [`StructuredLogger`]
///
/// # Example
/// ```
/// use rust_leveled_logger::prelude::*;
///
/// let logger = Logger::builder("api")
///     .time_format(TimestampFormat::Rfc3339)
///     .handler(Handler::console(Level::Warning, Level::Null, TemplateFormatter::default()).unwrap())
///     .async_mode(1000)
///     .build()
///     .unwrap();
///
/// assert_eq!(logger.handler_count(), 1);
/// ```
pub struct LoggerBuilder {
    name: String,
    time_format: TimestampFormat,
    handlers: Vec<Handler>,
    queue_size: Option<usize>,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            time_format: TimestampFormat::default(),
            handlers: Vec::new(),
            queue_size: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_format(mut self, format: TimestampFormat) -> Self {
        self.time_format = format;
        self
    }

    /// Set the time format from a pattern; empty selects ISO 8601
    #[must_use = "builder methods return a new value"]
    pub fn time_pattern(mut self, pattern: &str) -> Self {
        self.time_format = TimestampFormat::from_pattern(pattern);
        self
    }

    /// Append a handler; handlers run in the order they are added
    #[must_use = "builder methods return a new value"]
    pub fn handler(mut self, handler: Handler) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Enable async mode with the given queue capacity
    ///
    /// If not called, the logger writes synchronously.
    #[must_use = "builder methods return a new value"]
    pub fn async_mode(mut self, queue_size: usize) -> Self {
        self.queue_size = Some(queue_size);
        self
    }

    fn build_pipeline(self) -> Result<Pipeline> {
        let dispatcher = Dispatcher::new(&self.name).with_time_format(self.time_format);
        for handler in self.handlers {
            dispatcher.add_handler(handler);
        }
        Ok(match self.queue_size {
            Some(size) => Pipeline::Async(AsyncDispatcher::new(dispatcher, size)?),
            None => Pipeline::Sync(dispatcher),
        })
    }

    pub fn build(self) -> Result<Logger> {
        Ok(Logger::from_pipeline(self.build_pipeline()?))
    }

    pub fn build_structured(self) -> Result<StructuredLogger> {
        Ok(StructuredLogger::from_pipeline(self.build_pipeline()?))
    }
}
