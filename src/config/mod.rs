//! Configuration loading
//!
//! [`LoggingConfig`] is plain data read from JSON, YAML (feature `yaml`) or
//! XML (feature `xml`). Instantiate it with
//! [`LoggingContext::from_config`](crate::LoggingContext::from_config).
//!
//! ```
//! use rust_leveled_logger::config::{ConfigFormat, LoggingConfig};
//!
//! let config = LoggingConfig::parse(
//!     r#"{ "loggers": [ { "name": "app", "handlers": [ { "type": "console", "from": "info" } ] } ] }"#,
//!     ConfigFormat::Json,
//! )
//! .unwrap();
//! assert_eq!(config.loggers[0].handlers.len(), 1);
//! ```

pub mod loader;
pub mod model;

pub use loader::ConfigFormat;
pub use model::{
    FormatterConfig, FormatterKind, HandlerConfig, HandlerKind, LoggerConfig, LoggerKind,
    LoggingConfig,
};
