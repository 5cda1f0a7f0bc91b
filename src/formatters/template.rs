//! Template text formatter

use crate::core::{Formatter, Payload, Record};
use colored::Colorize;

/// Default layout: `[2025-01-08T10:30:45.123Z] [WARNING] app src/main.rs:42 - message`
pub const DEFAULT_TEMPLATE: &str = "[{time}] [{level}] {name} {file}:{line} - {message}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
    Time,
    Level,
    Name,
    File,
    Line,
    Thread,
    Message,
}

impl Placeholder {
    fn parse(token: &str) -> Option<Self> {
        Some(match token {
            "time" => Placeholder::Time,
            "level" => Placeholder::Level,
            "name" => Placeholder::Name,
            "file" => Placeholder::File,
            "line" => Placeholder::Line,
            "thread" => Placeholder::Thread,
            "message" => Placeholder::Message,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Placeholder),
}

/// Renders records through a template with `{placeholder}` fields.
///
/// Supported placeholders: `{time}`, `{level}`, `{name}`, `{file}`, `{line}`,
/// `{thread}` and `{message}`. Unknown placeholders are copied literally.
/// For structured records `{message}` renders the fields as `key=value`.
///
/// ```
/// use rust_leveled_logger::formatters::TemplateFormatter;
///
/// let formatter = TemplateFormatter::new("{level}: {message}");
/// assert_eq!(formatter.template(), "{level}: {message}");
/// ```
#[derive(Debug, Clone)]
pub struct TemplateFormatter {
    template: String,
    segments: Vec<Segment>,
}

impl TemplateFormatter {
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let segments = Self::compile(&template);
        Self { template, segments }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    fn compile(template: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            literal.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) => {
                    let token = &after[..close];
                    match Placeholder::parse(token) {
                        Some(placeholder) => {
                            if !literal.is_empty() {
                                segments.push(Segment::Literal(std::mem::take(&mut literal)));
                            }
                            segments.push(Segment::Field(placeholder));
                        }
                        None => {
                            literal.push('{');
                            literal.push_str(token);
                            literal.push('}');
                        }
                    }
                    rest = &after[close + 1..];
                }
                None => {
                    literal.push_str(&rest[open..]);
                    rest = "";
                }
            }
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        segments
    }
}

impl Default for TemplateFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl Formatter for TemplateFormatter {
    fn format(&self, record: &Record, color: bool) -> String {
        let mut out = String::with_capacity(self.template.len() + 64);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(Placeholder::Time) => out.push_str(&record.formatted_time()),
                Segment::Field(Placeholder::Level) => {
                    let label = record.level().label();
                    if color {
                        out.push_str(&label.color(record.level().color()).to_string());
                    } else {
                        out.push_str(label);
                    }
                }
                Segment::Field(Placeholder::Name) => out.push_str(record.name()),
                Segment::Field(Placeholder::File) => out.push_str(record.file()),
                Segment::Field(Placeholder::Line) => out.push_str(&record.line().to_string()),
                Segment::Field(Placeholder::Thread) => out.push_str(record.thread()),
                Segment::Field(Placeholder::Message) => match record.payload() {
                    Payload::Message(message) => out.push_str(message),
                    Payload::Fields(fields) => out.push_str(&fields.format_pairs()),
                },
            }
        }
        out
    }

    fn name(&self) -> &str {
        "template"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Fields, Level, TimestampFormat};
    use std::panic::Location;
    use std::sync::Arc;

    fn record(level: Level, payload: Payload) -> Record {
        Record::new(
            Arc::from("app"),
            level,
            Arc::new(TimestampFormat::Custom("%Y".to_string())),
            payload,
            Location::caller(),
        )
    }

    #[test]
    fn test_placeholders() {
        let formatter = TemplateFormatter::new("{level}|{name}|{message}");
        let rec = record(Level::Warning, Payload::message("disk almost full"));
        assert_eq!(formatter.format(&rec, false), "WARNING|app|disk almost full");
    }

    #[test]
    fn test_location_placeholders() {
        let formatter = TemplateFormatter::new("{file}:{line}");
        let rec = record(Level::Info, Payload::message("x"));
        let out = formatter.format(&rec, false);
        assert_eq!(out, format!("{}:{}", rec.file(), rec.line()));
    }

    #[test]
    fn test_unknown_placeholder_is_literal() {
        let formatter = TemplateFormatter::new("{bogus} {message} {unterminated");
        let rec = record(Level::Info, Payload::message("hi"));
        assert_eq!(formatter.format(&rec, false), "{bogus} hi {unterminated");
    }

    #[test]
    fn test_structured_message_renders_pairs() {
        let formatter = TemplateFormatter::new("{message}");
        let fields = Fields::new().with_field("user", "alice").with_field("id", 7);
        let rec = record(Level::Info, Payload::Fields(fields));
        assert_eq!(formatter.format(&rec, false), "id=7 user=alice");
    }

    #[test]
    fn test_color_only_when_requested() {
        colored::control::set_override(true);
        let formatter = TemplateFormatter::new("{level}");
        let rec = record(Level::Error, Payload::message("x"));

        assert_eq!(formatter.format(&rec, false), "ERROR");
        let colored_out = formatter.format(&rec, true);
        assert!(colored_out.contains("ERROR"));
        assert_ne!(colored_out, "ERROR");
        colored::control::unset_override();
    }

    #[test]
    fn test_default_template_contains_time() {
        let rec = record(Level::Info, Payload::message("started"));
        let out = TemplateFormatter::default().format(&rec, false);
        assert!(out.starts_with(&format!("[{}]", rec.formatted_time())));
        assert!(out.ends_with("- started"));
    }
}
