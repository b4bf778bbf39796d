//! Result formatting for transport.
//!
//! [`ResultFormatter`] maps each result record to a flat JSON object
//! carrying the value field, the label field, and any extra fields
//! configured for tabular display. A field a record does not carry yields
//! an empty string for that column; one ragged record never fails a whole
//! request.

use serde_json::{Map, Value as JsonValue};

use crate::record::Record;

/// Formats result records into flat JSON objects.
///
/// # Examples
///
/// ```
/// use tomselect_rs_query::format::ResultFormatter;
/// use tomselect_rs_query::record::Record;
///
/// let formatter = ResultFormatter::new("id", "title").extra_field("year");
/// let rows = formatter.format(&[Record::new().with("id", 1_i64).with("title", "Dune")]);
/// assert_eq!(rows[0]["id"], serde_json::json!(1));
/// assert_eq!(rows[0]["year"], serde_json::json!(""));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultFormatter {
    /// The stored-identifier field.
    pub value_field: String,
    /// The human-readable display field.
    pub label_field: String,
    /// Extra fields copied through for tabular display.
    pub extra_fields: Vec<String>,
}

impl ResultFormatter {
    /// Creates a formatter with the given value and label fields.
    pub fn new(value_field: impl Into<String>, label_field: impl Into<String>) -> Self {
        Self {
            value_field: value_field.into(),
            label_field: label_field.into(),
            extra_fields: Vec::new(),
        }
    }

    /// Adds an extra field to copy through.
    #[must_use]
    pub fn extra_field(mut self, field: impl Into<String>) -> Self {
        self.extra_fields.push(field.into());
        self
    }

    /// Formats a slice of records.
    pub fn format(&self, records: &[Record]) -> Vec<Map<String, JsonValue>> {
        records.iter().map(|record| self.format_one(record)).collect()
    }

    /// Formats a single record.
    pub fn format_one(&self, record: &Record) -> Map<String, JsonValue> {
        let mut row = Map::new();
        row.insert(self.value_field.clone(), field_json(record, &self.value_field));
        row.insert(self.label_field.clone(), field_json(record, &self.label_field));
        for field in &self.extra_fields {
            row.insert(field.clone(), field_json(record, field));
        }
        row
    }
}

/// A record field as JSON; absent fields become the empty string.
fn field_json(record: &Record, field: &str) -> JsonValue {
    if record.contains(field) {
        JsonValue::from(record.get(field))
    } else {
        JsonValue::String(String::new())
    }
}
