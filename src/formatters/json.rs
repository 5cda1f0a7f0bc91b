//! JSON formatter for structured output

use crate::core::{Formatter, Payload, Record};
use serde_json::{Map, Value};

/// Writes each record as a single JSON object (JSONL), or pretty-printed.
///
/// Structured fields are flattened into the object. The reserved keys
/// `time`, `level`, `name`, `file`, `line`, `thread` and `message` always
/// carry the record's own values.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    fn to_object(record: &Record) -> Option<Map<String, Value>> {
        let mut object = Map::new();

        match record.payload() {
            Payload::Message(message) => {
                object.insert("message".to_string(), Value::String(message.clone()));
            }
            Payload::Fields(fields) => {
                for (key, value) in fields.iter() {
                    object.insert(key.clone(), value.to_json_value()?);
                }
            }
        }

        let time = if record.time_format().is_numeric() {
            record
                .formatted_time()
                .parse::<i64>()
                .map(|n| Value::Number(n.into()))
                .unwrap_or_else(|_| Value::String(record.formatted_time()))
        } else {
            Value::String(record.formatted_time())
        };
        object.insert("time".to_string(), time);
        object.insert(
            "level".to_string(),
            Value::String(record.level().as_str().to_string()),
        );
        object.insert("name".to_string(), Value::String(record.name().to_string()));
        object.insert("file".to_string(), Value::String(record.file().to_string()));
        object.insert("line".to_string(), Value::Number(record.line().into()));
        object.insert(
            "thread".to_string(),
            Value::String(record.thread().to_string()),
        );

        Some(object)
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, record: &Record, _color: bool) -> String {
        let Some(object) = Self::to_object(record) else {
            return String::new();
        };
        let value = Value::Object(object);
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        };
        rendered.unwrap_or_default()
    }

    fn name(&self) -> &str {
        "json"
    }
}
