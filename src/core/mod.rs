//! Core logger types and traits

pub mod async_dispatcher;
pub mod dispatcher;
pub mod error;
pub mod fields;
pub mod formatter;
#[macro_use]
mod front_end;
pub mod handler;
mod in_flight;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod pipeline;
pub mod record;
pub mod sink;
pub mod structured_logger;
pub mod timestamp;

pub use async_dispatcher::{AsyncDispatcher, DispatcherState, DEFAULT_SHUTDOWN_TIMEOUT};
pub use dispatcher::Dispatcher;
pub use error::{LoggerError, Result};
pub use fields::{FieldValue, Fields};
pub use formatter::Formatter;
pub use handler::{Handler, HandlerId};
pub use level::{Level, LEVEL_STEP};
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use pipeline::Pipeline;
pub use record::{Payload, Record};
pub use sink::Sink;
pub use structured_logger::StructuredLogger;
pub use timestamp::TimestampFormat;
