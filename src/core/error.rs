//! Error types for the logger system

use super::level::Level;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML configuration error
    #[cfg(feature = "yaml")]
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// XML configuration error
    #[cfg(feature = "xml")]
    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::DeError),

    /// The async pipeline no longer accepts records
    #[error("Logger '{name}' is closed")]
    LoggerStopped { name: String },

    /// Handler window with `from` above `to`
    #[error("Invalid level window: from '{from}' is above to '{to}'")]
    InvalidLevelWindow { from: Level, to: Level },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// File sink error with path
    #[error("File sink error for '{path}': {message}")]
    FileSinkError { path: String, message: String },

    /// Sink write error (generic)
    #[error("Sink error: {0}")]
    SinkError(String),

    /// Message that was logged and handed back to the caller as an error
    #[error("{0}")]
    Logged(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a stopped-logger error
    pub fn stopped(name: impl Into<String>) -> Self {
        LoggerError::LoggerStopped { name: name.into() }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a file sink error
    pub fn file_sink(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileSinkError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn sink<S: Into<String>>(msg: S) -> Self {
        LoggerError::SinkError(msg.into())
    }

    /// Whether this error is a usage error rather than an I/O failure
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            LoggerError::LoggerStopped { .. }
                | LoggerError::InvalidLevelWindow { .. }
                | LoggerError::InvalidConfiguration { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::stopped("audit");
        assert!(matches!(err, LoggerError::LoggerStopped { .. }));

        let err = LoggerError::config("handler", "missing path");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::file_sink("/var/log/app.log", "Permission denied");
        assert!(matches!(err, LoggerError::FileSinkError { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::stopped("audit");
        assert_eq!(err.to_string(), "Logger 'audit' is closed");

        let err = LoggerError::InvalidLevelWindow {
            from: Level::Error,
            to: Level::Debug,
        };
        assert_eq!(
            err.to_string(),
            "Invalid level window: from 'error' is above to 'debug'"
        );

        let err = LoggerError::Logged("disk full".to_string());
        assert_eq!(err.to_string(), "disk full");
    }

    #[test]
    fn test_usage_error_classification() {
        assert!(LoggerError::stopped("x").is_usage_error());
        assert!(LoggerError::config("x", "y").is_usage_error());
        assert!(!LoggerError::sink("broken pipe").is_usage_error());
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("opening log file", "cannot open file", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("opening log file"));
        assert!(err.to_string().contains("cannot open file"));
    }
}
