//! Key-value (logfmt) formatter

use crate::core::{FieldValue, Formatter, Payload, Record};

/// Formats records as logfmt pairs.
///
/// Example: `time=2025-01-08T10:30:45.123Z level=warning name=app msg="disk almost full"`
#[derive(Debug, Clone, Default)]
pub struct KeyValueFormatter;

impl KeyValueFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Keep only characters that are safe in a logfmt key; never empty
    fn escape_key(key: &str) -> String {
        let escaped: String = key
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || *c == '.')
            .collect();
        if escaped.is_empty() {
            "_".to_string()
        } else {
            escaped
        }
    }

    /// Quote a value only when it needs it
    fn escape_value(value: &str) -> String {
        if value.is_empty() || value.contains([' ', '"', '=']) {
            Self::quote_value(value)
        } else {
            value.to_string()
        }
    }

    fn quote_value(value: &str) -> String {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

impl Formatter for KeyValueFormatter {
    fn format(&self, record: &Record, _color: bool) -> String {
        let mut parts = vec![
            format!("time={}", Self::escape_value(&record.formatted_time())),
            format!("level={}", record.level().as_str()),
            format!("name={}", Self::escape_value(record.name())),
            format!("file={}", Self::escape_value(record.file())),
            format!("line={}", record.line()),
        ];

        match record.payload() {
            Payload::Message(message) => parts.push(format!("msg={}", Self::quote_value(message))),
            Payload::Fields(fields) => {
                for (key, value) in fields.iter() {
                    let rendered = match value {
                        FieldValue::String(s) => Self::escape_value(s),
                        other => other.to_string(),
                    };
                    parts.push(format!("{}={}", Self::escape_key(key), rendered));
                }
            }
        }

        parts.join(" ")
    }

    fn name(&self) -> &str {
        "key_value"
    }
}
