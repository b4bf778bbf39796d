//! Flat record type for option rows.
//!
//! A [`Record`] is a flat field→[`Value`] mapping. Field access is explicit
//! key lookup with a `Null` default; there is no reflection and no nested
//! attribute traversal. Related attributes a source wants to expose are
//! flattened into keys at load time (e.g. `"author_name"`).

use std::collections::HashMap;

use crate::value::Value;

static NULL: Value = Value::Null;

/// A flat field→value mapping representing one option row.
///
/// # Examples
///
/// ```
/// use tomselect_rs_query::record::Record;
/// use tomselect_rs_query::value::Value;
///
/// let record = Record::new()
///     .with("id", 7_i64)
///     .with("title", "Artful Arrangements");
/// assert_eq!(record.get("id"), &Value::Int(7));
/// assert_eq!(record.get("missing"), &Value::Null);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, consuming and returning the record for chaining.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Sets a field in place.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Returns the value for a field, or `Null` if the field is absent.
    pub fn get(&self, field: &str) -> &Value {
        self.fields.get(field).unwrap_or(&NULL)
    }

    /// Returns `true` if the record carries the field (even as `Null`).
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns the field's value rendered as text, empty for absent fields.
    pub fn text(&self, field: &str) -> String {
        self.get(field).as_text()
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the record's fields.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_get() {
        let record = Record::new().with("id", 1_i64).with("title", "Dune");
        assert_eq!(record.get("id"), &Value::Int(1));
        assert_eq!(record.get("title"), &Value::String("Dune".to_string()));
    }

    #[test]
    fn test_missing_field_is_null() {
        let record = Record::new();
        assert_eq!(record.get("anything"), &Value::Null);
        assert!(!record.contains("anything"));
    }

    #[test]
    fn test_explicit_null_field() {
        let record = Record::new().with("magazine_id", Value::Null);
        assert!(record.contains("magazine_id"));
        assert_eq!(record.get("magazine_id"), &Value::Null);
    }

    #[test]
    fn test_set_overwrites() {
        let mut record = Record::new().with("id", 1_i64);
        record.set("id", 2_i64);
        assert_eq!(record.get("id"), &Value::Int(2));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_text_defaults_to_empty() {
        let record = Record::new().with("title", "Dune");
        assert_eq!(record.text("title"), "Dune");
        assert_eq!(record.text("missing"), "");
    }

    #[test]
    fn test_from_iterator() {
        let record: Record = vec![
            ("a".to_string(), Value::Int(1)),
            ("b".to_string(), Value::from("x")),
        ]
        .into_iter()
        .collect();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("b"), &Value::String("x".to_string()));
    }
}
