//! Registry of named loggers
//!
//! There is no process-wide logger. A [`LoggingContext`] owns a root logger
//! and any number of named loggers, and is passed to whatever needs them.

use crate::config::{LoggerKind, LoggingConfig};
use crate::core::{Handler, Logger, LoggerError, Result, StructuredLogger};
use std::collections::HashMap;

/// Name under which the root logger is configured
pub const ROOT_LOGGER: &str = "root";

/// Owner of the root logger and all named loggers.
///
/// # Example
///
/// ```
/// use rust_leveled_logger::config::{ConfigFormat, LoggingConfig};
/// use rust_leveled_logger::LoggingContext;
///
/// let config = LoggingConfig::parse(
///     r#"{ "loggers": [ { "name": "db", "queue_size": 16 } ] }"#,
///     ConfigFormat::Json,
/// )
/// .unwrap();
///
/// let context = LoggingContext::from_config(&config).unwrap();
/// context.root().info("filtered out by the default root handler");
/// assert!(context.logger("db").is_some());
/// assert!(context.logger("cache").is_none());
/// context.wait_all();
/// ```
pub struct LoggingContext {
    root: Logger,
    loggers: HashMap<String, Logger>,
    structured: HashMap<String, StructuredLogger>,
}

enum Built {
    Text(Logger),
    Structured(StructuredLogger),
}

impl LoggingContext {
    /// Context whose root logger writes warning and above to the console
    pub fn new() -> Self {
        let root = Logger::new(ROOT_LOGGER);
        root.add_handler(Handler::default_console());
        Self {
            root,
            loggers: HashMap::new(),
            structured: HashMap::new(),
        }
    }

    pub fn from_config(config: &LoggingConfig) -> Result<Self> {
        let mut context = Self::new();
        context.configure(config)?;
        Ok(context)
    }

    /// Instantiate every logger in `config`.
    ///
    /// Loggers are registered only once all of them have been built, so a
    /// failure leaves the context unchanged. A logger with an existing name
    /// replaces the old one; a text logger named `root` replaces the root.
    pub fn configure(&mut self, config: &LoggingConfig) -> Result<()> {
        config.validate()?;

        let mut built = Vec::with_capacity(config.loggers.len());
        for logger in &config.loggers {
            if logger.name == ROOT_LOGGER && logger.kind == LoggerKind::Structured {
                return Err(LoggerError::config(
                    format!("logger '{}'", ROOT_LOGGER),
                    "the root logger must be a text logger",
                ));
            }
            let builder = logger.builder()?;
            built.push(match logger.kind {
                LoggerKind::Text => Built::Text(builder.build()?),
                LoggerKind::Structured => Built::Structured(builder.build_structured()?),
            });
        }

        for logger in built {
            match logger {
                Built::Text(logger) if logger.name() == ROOT_LOGGER => self.root = logger,
                Built::Text(logger) => self.add_logger(logger),
                Built::Structured(logger) => self.add_structured(logger),
            }
        }
        Ok(())
    }

    pub fn root(&self) -> &Logger {
        &self.root
    }

    /// Text logger by name; `root` names the root logger
    pub fn logger(&self, name: &str) -> Option<&Logger> {
        if name == ROOT_LOGGER {
            return Some(&self.root);
        }
        self.loggers.get(name)
    }

    pub fn structured(&self, name: &str) -> Option<&StructuredLogger> {
        self.structured.get(name)
    }

    /// Register a text logger, replacing any logger with the same name
    pub fn add_logger(&mut self, logger: Logger) {
        let name = logger.name().to_string();
        self.structured.remove(&name);
        self.loggers.insert(name, logger);
    }

    /// Register a structured logger, replacing any logger with the same name
    pub fn add_structured(&mut self, logger: StructuredLogger) {
        let name = logger.name().to_string();
        self.loggers.remove(&name);
        self.structured.insert(name, logger);
    }

    /// Names of all registered loggers except the root, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .loggers
            .keys()
            .chain(self.structured.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }

    /// Wait for every asynchronous logger to drain its queue
    pub fn wait_all(&self) {
        self.root.wait();
        self.loggers.values().for_each(Logger::wait);
        self.structured.values().for_each(StructuredLogger::wait);
    }

    /// Close every asynchronous logger; queued records are still written
    pub fn close_all(&self) {
        self.root.close();
        self.loggers.values().for_each(Logger::close);
        self.structured.values().for_each(StructuredLogger::close);
    }
}

impl Default for LoggingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LoggingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggingContext")
            .field("root", &self.root)
            .field("loggers", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;
    use crate::core::{DispatcherState, Level};
    use crate::formatters::TemplateFormatter;
    use crate::sinks::MemorySink;

    fn parse(json: &str) -> LoggingConfig {
        LoggingConfig::parse(json, ConfigFormat::Json).unwrap()
    }

    #[test]
    fn test_default_root() {
        let context = LoggingContext::new();
        assert_eq!(context.root().name(), ROOT_LOGGER);
        assert_eq!(context.root().handler_count(), 1);
        assert!(context.root().is_enabled(Level::Warning));
        assert!(!context.root().is_enabled(Level::Info));
        assert!(context.names().is_empty());
    }

    #[test]
    fn test_configure_text_and_structured() {
        let context = LoggingContext::from_config(&parse(
            r#"{ "loggers": [
                { "name": "web", "queue_size": 8 },
                { "name": "audit", "kind": "structured" }
            ] }"#,
        ))
        .unwrap();

        assert_eq!(context.names(), vec!["audit", "web"]);
        assert_eq!(context.logger("web").unwrap().state(), Some(DispatcherState::Open));
        assert!(context.logger("audit").is_none());
        assert!(context.structured("audit").is_some());
        assert!(context.structured("web").is_none());
    }

    #[test]
    fn test_root_is_replaced_by_config() {
        let context = LoggingContext::from_config(&parse(
            r#"{ "loggers": [ { "name": "root", "handlers": [
                { "type": "stderr", "from": "debug" } ] } ] }"#,
        ))
        .unwrap();

        assert!(context.root().is_enabled(Level::Debug));
        assert!(context.names().is_empty());
        assert!(std::ptr::eq(context.logger("root").unwrap(), context.root()));
    }

    #[test]
    fn test_structured_root_is_rejected() {
        let mut context = LoggingContext::new();
        let result = context.configure(&parse(
            r#"{ "loggers": [ { "name": "other" }, { "name": "root", "kind": "structured" } ] }"#,
        ));
        assert!(matches!(result, Err(LoggerError::InvalidConfiguration { .. })));
        assert!(context.logger("other").is_none());
    }

    #[test]
    fn test_same_name_replaces_across_kinds() {
        let mut context = LoggingContext::new();
        context.add_logger(Logger::new("svc"));
        context.add_structured(StructuredLogger::new("svc"));
        assert!(context.logger("svc").is_none());
        assert!(context.structured("svc").is_some());
        assert_eq!(context.names(), vec!["svc"]);
    }

    #[test]
    fn test_wait_all_and_close_all() {
        let mut context = LoggingContext::new();
        let capture = MemorySink::new();
        let logger = Logger::with_async("worker", 4).unwrap();
        logger.add_handler(
            Handler::new(Level::All, Level::Null, TemplateFormatter::new("{message}"), capture.clone())
                .unwrap(),
        );
        context.add_logger(logger);

        let worker = context.logger("worker").unwrap();
        for i in 0..10 {
            worker.info(format!("job {}", i));
        }
        context.wait_all();
        assert_eq!(capture.len(), 10);

        context.close_all();
        assert!(worker.try_log(Level::Info, "late").is_err());
    }
}
