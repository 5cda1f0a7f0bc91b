//! Key/value payload for structured records

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Escape line breaks and tabs so that text cannot start a new log line
pub(crate) fn escape_line_breaks(text: &str) -> String {
    text.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl FieldValue {
    /// Convert to a JSON value.
    ///
    /// Returns `None` for non-finite floats, which JSON cannot represent.
    #[must_use]
    pub fn to_json_value(&self) -> Option<serde_json::Value> {
        Some(match self {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Float(f) => serde_json::Value::Number(serde_json::Number::from_f64(*f)?),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Null => serde_json::Value::Null,
        })
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::String(s.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<usize> for FieldValue {
    fn from(i: usize) -> Self {
        FieldValue::Int(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<f32> for FieldValue {
    fn from(f: f32) -> Self {
        FieldValue::Float(f64::from(f))
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Key-ordered set of structured fields.
///
/// Keys and string values have line breaks and tabs escaped on the way in,
/// like free-text messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Fields {
    fields: BTreeMap<String, FieldValue>,
}

impl Fields {
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Build fields from an alternating `key, value, key, value, ...` list.
    ///
    /// Keys are rendered with `Display`. A trailing key without a value is
    /// dropped.
    ///
    /// ```
    /// use rust_leveled_logger::{kv, Fields};
    ///
    /// let fields = Fields::from_pairs(kv!["user", "alice", "attempts", 3, "orphan"]);
    /// assert_eq!(fields.len(), 2);
    /// assert!(fields.get("orphan").is_none());
    /// ```
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        let mut fields = Fields::new();
        let mut iter = pairs.into_iter().map(Into::into);
        while let Some(key) = iter.next() {
            match iter.next() {
                Some(value) => {
                    fields.insert(key.to_string(), value);
                }
                None => break,
            }
        }
        fields
    }

    /// Add a field, consuming and returning `self`
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.insert(key, value);
        self
    }

    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let key = escape_line_breaks(&key.into());
        let value = match value.into() {
            FieldValue::String(s) => FieldValue::String(escape_line_breaks(&s)),
            other => other,
        };
        self.fields.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    /// Merge `other` into `self`; keys from `other` win
    pub fn extend(&mut self, other: Fields) {
        self.fields.extend(other.fields);
    }

    /// Format fields as key=value pairs
    pub fn format_pairs(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_pairs())
    }
}

impl From<Vec<FieldValue>> for Fields {
    fn from(pairs: Vec<FieldValue>) -> Self {
        Fields::from_pairs(pairs)
    }
}

impl<K: Into<String>, V: Into<FieldValue>> From<Vec<(K, V)>> for Fields {
    fn from(entries: Vec<(K, V)>) -> Self {
        entries
            .into_iter()
            .fold(Fields::new(), |fields, (k, v)| fields.with_field(k, v))
    }
}

impl From<BTreeMap<String, FieldValue>> for Fields {
    fn from(map: BTreeMap<String, FieldValue>) -> Self {
        map.into_iter()
            .fold(Fields::new(), |fields, (k, v)| fields.with_field(k, v))
    }
}

impl<V: Into<FieldValue>> From<HashMap<String, V>> for Fields {
    fn from(map: HashMap<String, V>) -> Self {
        map.into_iter()
            .fold(Fields::new(), |fields, (k, v)| fields.with_field(k, v))
    }
}

impl<'de> Deserialize<'de> for Fields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BTreeMap::<String, FieldValue>::deserialize(deserializer).map(Fields::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_are_key_ordered() {
        let fields = Fields::new()
            .with_field("zeta", 1)
            .with_field("alpha", "a")
            .with_field("mid", true);

        let keys: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
        assert_eq!(fields.format_pairs(), "alpha=a mid=true zeta=1");
    }

    #[test]
    fn test_from_pairs_drops_trailing_key() {
        let fields = Fields::from_pairs(vec![
            FieldValue::from("user"),
            FieldValue::from("alice"),
            FieldValue::from("dangling"),
        ]);

        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("user"), Some(&FieldValue::from("alice")));
        assert!(fields.get("dangling").is_none());
    }

    #[test]
    fn test_from_pairs_stringifies_keys() {
        let fields = Fields::from_pairs(vec![FieldValue::Int(7), FieldValue::Bool(true)]);
        assert_eq!(fields.get("7"), Some(&FieldValue::Bool(true)));
    }

    #[test]
    fn test_from_map() {
        let mut map = HashMap::new();
        map.insert("latency_ms".to_string(), 42);
        map.insert("retries".to_string(), 3);

        let fields = Fields::from(map);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("latency_ms"), Some(&FieldValue::Int(42)));
    }

    #[test]
    fn test_extend_prefers_incoming() {
        let mut base = Fields::new().with_field("key", "old").with_field("keep", 1);
        base.extend(Fields::new().with_field("key", "new"));

        assert_eq!(base.get("key"), Some(&FieldValue::from("new")));
        assert_eq!(base.get("keep"), Some(&FieldValue::Int(1)));
    }

    #[test]
    fn test_non_finite_float_has_no_json_value() {
        assert!(FieldValue::Float(f64::NAN).to_json_value().is_none());
        assert!(FieldValue::Float(f64::INFINITY).to_json_value().is_none());
        assert!(FieldValue::Float(1.5).to_json_value().is_some());
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(FieldValue::from(None::<i32>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some("x")), FieldValue::from("x"));
    }

    #[test]
    fn test_line_breaks_are_escaped_on_every_entry_path() {
        let forged = "bob\nlevel=error msg=\"FAKE\"";
        let expected = FieldValue::from("bob\\nlevel=error msg=\"FAKE\"");

        let inserted = Fields::new().with_field("user", forged);
        assert_eq!(inserted.get("user"), Some(&expected));

        let paired = Fields::from_pairs(vec![FieldValue::from("user"), FieldValue::from(forged)]);
        assert_eq!(paired.get("user"), Some(&expected));

        let mut map = BTreeMap::new();
        map.insert("user".to_string(), FieldValue::from(forged));
        assert_eq!(Fields::from(map).get("user"), Some(&expected));

        let mut hashed = HashMap::new();
        hashed.insert("a\tb\r".to_string(), "x");
        let fields = Fields::from(hashed);
        assert_eq!(fields.get("a\\tb\\r"), Some(&FieldValue::from("x")));

        let parsed: Fields = serde_json::from_str(r#"{"user": "bob\nmallory"}"#).unwrap();
        assert_eq!(parsed.get("user"), Some(&FieldValue::from("bob\\nmallory")));

        assert!(!inserted.format_pairs().contains('\n'));
    }
}
