//! Formatter implementations
//!
//! - [`TemplateFormatter`]: human-readable text from a placeholder template
//! - [`JsonFormatter`]: one JSON object per record
//! - [`KeyValueFormatter`]: logfmt `key=value` pairs

pub mod json;
pub mod key_value;
pub mod template;

pub use json::JsonFormatter;
pub use key_value::KeyValueFormatter;
pub use template::TemplateFormatter;

pub use crate::core::Formatter;
