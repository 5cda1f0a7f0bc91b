//! Configuration schema
//!
//! The same model is read from JSON, YAML and XML. In XML, scalar settings
//! may be given as attributes, and `logger` / `handler` elements repeat.

use crate::core::Level;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration: a list of loggers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default, alias = "logger")]
    pub loggers: Vec<LoggerConfig>,
}

/// Front end a configured logger is exposed through
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoggerKind {
    #[default]
    Text,
    Structured,
}

/// One named logger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggerConfig {
    #[serde(alias = "@name")]
    pub name: String,

    #[serde(default, alias = "@kind")]
    pub kind: LoggerKind,

    /// Queue capacity; the logger is asynchronous when present
    #[serde(default, alias = "@queue_size", skip_serializing_if = "Option::is_none")]
    pub queue_size: Option<usize>,

    /// Timestamp pattern; empty selects ISO 8601
    #[serde(default, alias = "@time_format")]
    pub time_format: String,

    #[serde(default, alias = "handler")]
    pub handlers: Vec<HandlerConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerKind {
    Console,
    Stderr,
    File,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlerConfig {
    #[serde(rename = "type", alias = "@type")]
    pub kind: HandlerKind,

    #[serde(default = "default_from", alias = "@from")]
    pub from: Level,

    #[serde(default = "default_to", alias = "@to")]
    pub to: Level,

    /// Required for `file` handlers
    #[serde(default, alias = "@path", skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    #[serde(default)]
    pub formatter: FormatterConfig,
}

fn default_from() -> Level {
    Level::All
}

fn default_to() -> Level {
    Level::Null
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatterKind {
    #[default]
    Template,
    Json,
    KeyValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormatterConfig {
    #[serde(default, rename = "type", alias = "@type")]
    pub kind: FormatterKind,

    /// Template for `template` formatters; the default template when absent
    #[serde(default, alias = "@template", skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Pretty-print `json` output
    #[serde(default, alias = "@pretty")]
    pub pretty: bool,
}

impl HandlerConfig {
    pub fn new(kind: HandlerKind) -> Self {
        Self {
            kind,
            from: default_from(),
            to: default_to(),
            path: None,
            formatter: FormatterConfig::default(),
        }
    }
}

impl LoggerConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: LoggerKind::Text,
            queue_size: None,
            time_format: String::new(),
            handlers: Vec::new(),
        }
    }
}
