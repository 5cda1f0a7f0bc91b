//! Logging macros for `format!`-style messages and key/value lists.
//!
//! The severity macros work with any value that has a
//! `log(Level, String)` method, which in practice means [`Logger`](crate::Logger)
//! or a `&Logger`. Call sites are captured at the macro invocation.
//!
//! # Examples
//!
//! ```
//! use rust_leveled_logger::prelude::*;
//! use rust_leveled_logger::{info, warning};
//!
//! let logger = Logger::new("server");
//! logger.add_handler(Handler::default_console());
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! warning!(logger, "Connection pool at {}%", 90);
//! ```

/// Log a formatted message at an explicit level.
///
/// ```
/// # use rust_leveled_logger::prelude::*;
/// # let logger = Logger::new("app");
/// use rust_leveled_logger::log;
/// log!(logger, Level::Info, "Simple message");
/// log!(logger, Level::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Trace, $($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! verbose {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Verbose, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Notice, $($arg)+)
    };
}

#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warning, $($arg)+)
    };
}

#[macro_export]
macro_rules! severe {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Severe, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! alert {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Alert, $($arg)+)
    };
}

#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Critical, $($arg)+)
    };
}

#[macro_export]
macro_rules! emergency {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Emergency, $($arg)+)
    };
}

/// Build an alternating key/value list for structured logging.
///
/// Every element is converted with `FieldValue::from`, so keys and values
/// may mix strings, integers, floats and booleans.
///
/// ```
/// use rust_leveled_logger::{kv, Fields};
///
/// let fields: Fields = kv!["user", "alice", "retries", 3].into();
/// assert_eq!(fields.format_pairs(), "retries=3 user=alice");
/// ```
#[macro_export]
macro_rules! kv {
    () => {
        ::std::vec::Vec::<$crate::FieldValue>::new()
    };
    ($($item:expr),+ $(,)?) => {
        vec![$($crate::FieldValue::from($item)),+]
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Handler, Level, Logger};
    use crate::formatters::TemplateFormatter;
    use crate::sinks::MemorySink;

    fn logger() -> (Logger, MemorySink) {
        let logger = Logger::new("macros");
        let capture = MemorySink::new();
        logger.add_handler(
            Handler::new(
                Level::All,
                Level::Null,
                TemplateFormatter::new("{level} {message}"),
                capture.clone(),
            )
            .unwrap(),
        );
        (logger, capture)
    }

    #[test]
    fn test_log_macro() {
        let (logger, capture) = logger();
        log!(logger, Level::Info, "Test message");
        log!(logger, Level::Info, "Formatted: {}", 42);
        assert_eq!(capture.lines(), vec!["INFO Test message", "INFO Formatted: 42"]);
    }

    #[test]
    fn test_severity_macros() {
        let (logger, capture) = logger();
        trace!(logger, "t");
        debug!(logger, "d");
        verbose!(logger, "v");
        info!(logger, "i");
        notice!(logger, "n");
        warning!(logger, "Retry {} of {}", 1, 3);
        severe!(logger, "s");
        error!(logger, "Code: {}", 500);
        alert!(logger, "a");
        critical!(logger, "c");
        emergency!(logger, "e");

        let lines = capture.lines();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[5], "WARNING Retry 1 of 3");
        assert_eq!(lines[7], "ERROR Code: 500");
        assert_eq!(lines[10], "EMERGENCY e");
    }

    #[test]
    fn test_macro_captures_invocation_site() {
        let logger = Logger::new("site");
        let capture = MemorySink::new();
        logger.add_handler(
            Handler::new(Level::All, Level::Null, TemplateFormatter::new("{line}"), capture.clone())
                .unwrap(),
        );

        let line = line!() + 1;
        info!(logger, "here");

        assert_eq!(capture.lines(), vec![line.to_string()]);
    }

    #[test]
    fn test_kv_macro() {
        let empty = kv![];
        assert!(empty.is_empty());

        let pairs = kv!["a", 1, "b", true, "c", 1.5,];
        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs[1], crate::FieldValue::Int(1));
    }
}
