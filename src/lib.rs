//! # Rust Leveled Logger
//!
//! A leveled logging library with a synchronous or asynchronous fan-out
//! pipeline, free-text and structured front ends, and configuration loading.
//!
//! ## Features
//!
//! - **Level windows**: each handler accepts an inclusive `from..=to` range
//! - **Async pipeline**: bounded queue, single consumer, blocking backpressure,
//!   and a `wait()` barrier
//! - **Front ends**: [`Logger`] for messages, [`StructuredLogger`] for
//!   key/value fields
//! - **Configuration**: JSON, YAML and XML into a [`LoggingContext`]
//!
//! ## Example
//!
//! ```
//! use rust_leveled_logger::prelude::*;
//!
//! let capture = MemorySink::new();
//! let logger = Logger::with_async("app", 10).unwrap();
//! logger.add_handler(
//!     Handler::new(Level::Warning, Level::Null, TemplateFormatter::new("{level}: {message}"), capture.clone())
//!         .unwrap(),
//! );
//!
//! for i in 0..10 {
//!     logger.warning(format!("disk {}", i));
//! }
//! logger.wait();
//! assert_eq!(capture.len(), 10);
//! ```

pub mod config;
pub mod context;
pub mod core;
pub mod formatters;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::config::{ConfigFormat, LoggingConfig};
    pub use crate::context::LoggingContext;
    pub use crate::core::{
        AsyncDispatcher, Dispatcher, DispatcherState, FieldValue, Fields, Formatter, Handler,
        HandlerId, Level, Logger, LoggerBuilder, LoggerError, LoggerMetrics, Payload, Pipeline,
        Record, Result, Sink, StructuredLogger, TimestampFormat, DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::formatters::{JsonFormatter, KeyValueFormatter, TemplateFormatter};
    pub use crate::sinks::{ConsoleSink, FileSink, MemorySink};
}

pub use context::LoggingContext;
pub use self::core::{
    AsyncDispatcher, Dispatcher, DispatcherState, FieldValue, Fields, Formatter, Handler,
    HandlerId, Level, Logger, LoggerBuilder, LoggerError, LoggerMetrics, Payload, Pipeline, Record,
    Result, Sink, StructuredLogger, TimestampFormat, DEFAULT_SHUTDOWN_TIMEOUT, LEVEL_STEP,
};
