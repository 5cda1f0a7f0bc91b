//! Parsing, validation and instantiation of [`LoggingConfig`]

use super::model::{
    FormatterConfig, FormatterKind, HandlerConfig, HandlerKind, LoggerConfig, LoggingConfig,
};
use crate::core::{Formatter, Handler, LoggerBuilder, LoggerError, Result};
use crate::formatters::{JsonFormatter, KeyValueFormatter, TemplateFormatter};
use crate::sinks::{ConsoleSink, FileSink, Sink};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

/// Serialization format of a configuration document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Xml,
}

impl ConfigFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(ConfigFormat::Json),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "xml" => Some(ConfigFormat::Xml),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfigFormat::Json => "json",
            ConfigFormat::Yaml => "yaml",
            ConfigFormat::Xml => "xml",
        };
        write!(f, "{}", name)
    }
}

impl LoggingConfig {
    /// Parse and validate a configuration document
    pub fn parse(text: &str, format: ConfigFormat) -> Result<Self> {
        let config: LoggingConfig = match format {
            ConfigFormat::Json => serde_json::from_str(text)?,
            #[cfg(feature = "yaml")]
            ConfigFormat::Yaml => serde_yaml::from_str(text)?,
            #[cfg(feature = "xml")]
            ConfigFormat::Xml => quick_xml::de::from_str(text)?,
            #[allow(unreachable_patterns)]
            other => {
                return Err(LoggerError::config(
                    "config",
                    format!("support for {} was not compiled in", other),
                ))
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration file, choosing the format from its extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            LoggerError::config(
                "config",
                format!("cannot infer format of '{}'", path.display()),
            )
        })?;
        let text = fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading configuration",
                path.display().to_string(),
                e,
            )
        })?;
        Self::parse(&text, format)
    }

    pub fn logger(&self, name: &str) -> Option<&LoggerConfig> {
        self.loggers.iter().find(|l| l.name == name)
    }

    /// Check constraints the schema cannot express
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for logger in &self.loggers {
            logger.validate()?;
            if !seen.insert(logger.name.as_str()) {
                return Err(LoggerError::config(
                    format!("logger '{}'", logger.name),
                    "duplicate logger name",
                ));
            }
        }
        Ok(())
    }
}

impl LoggerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::config("logger", "name must not be empty"));
        }
        if self.queue_size == Some(0) {
            return Err(LoggerError::config(
                format!("logger '{}'", self.name),
                "queue_size must be greater than zero",
            ));
        }
        for (idx, handler) in self.handlers.iter().enumerate() {
            handler.validate().map_err(|e| match e {
                LoggerError::InvalidConfiguration { message, .. } => LoggerError::config(
                    format!("handler #{} of logger '{}'", idx, self.name),
                    message,
                ),
                other => other,
            })?;
        }
        Ok(())
    }

    /// Builder with this logger's time format, queue and handlers.
    ///
    /// Opens file sinks, so it can fail even for a validated configuration.
    pub fn builder(&self) -> Result<LoggerBuilder> {
        let mut builder = LoggerBuilder::new(&self.name).time_pattern(&self.time_format);
        for handler in &self.handlers {
            builder = builder.handler(handler.build()?);
        }
        if let Some(size) = self.queue_size {
            builder = builder.async_mode(size);
        }
        Ok(builder)
    }
}

impl HandlerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.from > self.to {
            return Err(LoggerError::config(
                "handler",
                format!("from '{}' is above to '{}'", self.from, self.to),
            ));
        }
        if self.kind == HandlerKind::File && self.path.is_none() {
            return Err(LoggerError::config("handler", "file handler requires a path"));
        }
        Ok(())
    }

    pub fn build(&self) -> Result<Handler> {
        self.validate()?;
        let sink: Box<dyn Sink> = match self.kind {
            HandlerKind::Console => Box::new(ConsoleSink::stdout()),
            HandlerKind::Stderr => Box::new(ConsoleSink::stderr()),
            HandlerKind::File => {
                let path = self
                    .path
                    .as_ref()
                    .ok_or_else(|| LoggerError::config("handler", "file handler requires a path"))?;
                Box::new(FileSink::new(path)?)
            }
        };
        Handler::from_boxed(self.from, self.to, self.formatter.build(), sink)
    }
}

impl FormatterConfig {
    pub fn build(&self) -> Box<dyn Formatter> {
        match self.kind {
            FormatterKind::Template => match &self.template {
                Some(template) => Box::new(TemplateFormatter::new(template.clone())),
                None => Box::new(TemplateFormatter::default()),
            },
            FormatterKind::Json if self.pretty => Box::new(JsonFormatter::pretty()),
            FormatterKind::Json => Box::new(JsonFormatter::new()),
            FormatterKind::KeyValue => Box::new(KeyValueFormatter::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggerKind;
    use crate::core::Level;

    const JSON: &str = r#"{
        "loggers": [
            {
                "name": "app",
                "queue_size": 64,
                "time_format": "%H:%M:%S",
                "handlers": [
                    { "type": "console", "from": "warning" },
                    {
                        "type": "stderr",
                        "from": "error",
                        "to": "emergency",
                        "formatter": { "type": "json", "pretty": true }
                    }
                ]
            },
            { "name": "audit", "kind": "structured" }
        ]
    }"#;

    #[test]
    fn test_parse_json() {
        let config = LoggingConfig::parse(JSON, ConfigFormat::Json).unwrap();
        assert_eq!(config.loggers.len(), 2);

        let app = config.logger("app").unwrap();
        assert_eq!(app.queue_size, Some(64));
        assert_eq!(app.handlers[0].kind, HandlerKind::Console);
        assert_eq!(app.handlers[0].from, Level::Warning);
        assert_eq!(app.handlers[0].to, Level::Null);
        assert_eq!(app.handlers[0].formatter.kind, FormatterKind::Template);
        assert_eq!(app.handlers[1].to, Level::Emergency);
        assert!(app.handlers[1].formatter.pretty);

        let audit = config.logger("audit").unwrap();
        assert_eq!(audit.kind, LoggerKind::Structured);
        assert!(audit.handlers.is_empty());
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_parse_yaml_matches_json() {
        let yaml = r#"
loggers:
  - name: app
    queue_size: 64
    time_format: "%H:%M:%S"
    handlers:
      - type: console
        from: warning
      - type: stderr
        from: error
        to: emergency
        formatter:
          type: json
          pretty: true
  - name: audit
    kind: structured
"#;
        let from_yaml = LoggingConfig::parse(yaml, ConfigFormat::Yaml).unwrap();
        let from_json = LoggingConfig::parse(JSON, ConfigFormat::Json).unwrap();
        assert_eq!(from_yaml, from_json);
    }

    #[cfg(feature = "xml")]
    #[test]
    fn test_parse_xml_attributes() {
        let xml = r#"
<logging>
  <logger name="app" queue_size="64" time_format="%H:%M:%S">
    <handler type="console" from="warning"/>
    <handler type="stderr" from="error" to="emergency">
      <formatter type="json" pretty="true"/>
    </handler>
  </logger>
  <logger name="audit" kind="structured"/>
</logging>
"#;
        let from_xml = LoggingConfig::parse(xml, ConfigFormat::Xml).unwrap();
        let from_json = LoggingConfig::parse(JSON, ConfigFormat::Json).unwrap();
        assert_eq!(from_xml, from_json);
    }

    #[test]
    fn test_unknown_handler_type_is_rejected() {
        let json = r#"{ "loggers": [ { "name": "x", "handlers": [ { "type": "syslog" } ] } ] }"#;
        assert!(matches!(
            LoggingConfig::parse(json, ConfigFormat::Json),
            Err(LoggerError::JsonError(_))
        ));
    }

    #[test]
    fn test_file_handler_without_path_is_rejected() {
        let json = r#"{ "loggers": [ { "name": "x", "handlers": [ { "type": "file" } ] } ] }"#;
        let err = LoggingConfig::parse(json, ConfigFormat::Json).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
        assert!(err.to_string().contains("handler #0 of logger 'x'"));
    }

    #[test]
    fn test_inverted_window_is_rejected() {
        let json = r#"{ "loggers": [ { "name": "x", "handlers": [
            { "type": "console", "from": "error", "to": "info" } ] } ] }"#;
        assert!(matches!(
            LoggingConfig::parse(json, ConfigFormat::Json),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_duplicate_names_and_zero_queue_are_rejected() {
        let dup = r#"{ "loggers": [ { "name": "x" }, { "name": "x" } ] }"#;
        assert!(LoggingConfig::parse(dup, ConfigFormat::Json).is_err());

        let zero = r#"{ "loggers": [ { "name": "x", "queue_size": 0 } ] }"#;
        assert!(LoggingConfig::parse(zero, ConfigFormat::Json).is_err());
    }

    #[test]
    fn test_unknown_level_name_means_null() {
        let json = r#"{ "loggers": [ { "name": "x", "handlers": [
            { "type": "console", "from": "loud" } ] } ] }"#;
        let config = LoggingConfig::parse(json, ConfigFormat::Json).unwrap();
        assert_eq!(config.loggers[0].handlers[0].from, Level::Null);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.json")), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_path(Path::new("a.YML")), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_path(Path::new("a.yaml")), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_path(Path::new("a.xml")), Some(ConfigFormat::Xml));
        assert_eq!(ConfigFormat::from_path(Path::new("a.toml")), None);
        assert_eq!(ConfigFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_from_file_reads_and_detects_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logging.json");
        fs::write(&path, JSON).unwrap();

        let config = LoggingConfig::from_file(&path).unwrap();
        assert_eq!(config.loggers.len(), 2);

        assert!(matches!(
            LoggingConfig::from_file(dir.path().join("missing.json")),
            Err(LoggerError::IoOperation { .. })
        ));
    }

    #[test]
    fn test_formatter_build_selects_kind() {
        let mut config = FormatterConfig::default();
        assert_eq!(config.build().name(), "template");
        config.kind = FormatterKind::KeyValue;
        assert_eq!(config.build().name(), "key_value");
        config.kind = FormatterKind::Json;
        assert_eq!(config.build().name(), "json");
    }

    #[test]
    fn test_file_handler_build_opens_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut handler = HandlerConfig::new(HandlerKind::File);
        handler.path = Some(dir.path().join("out.log"));
        handler.from = Level::Info;

        let built = handler.build().unwrap();
        assert_eq!(built.from_level(), Level::Info);
        assert!(dir.path().join("out.log").exists());
    }
}
