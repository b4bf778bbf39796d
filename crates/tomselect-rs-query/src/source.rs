//! The data source seam.
//!
//! [`DataSource`] is the interface the query pipeline consumes records
//! through. A host application backs it with whatever actually holds the
//! options: an ORM queryset materialized to records, a static choice list,
//! or a remote service. The pipeline itself never reaches past this trait.
//!
//! [`MemorySource`] is the built-in implementation over an in-memory record
//! list, used by tests, demos, and static choice fields.

use std::sync::Mutex;

use tomselect_rs_core::error::{TomSelectError, TomSelectResult};

use crate::record::Record;
use crate::value::Value;

/// Supplies the base collection of records and, optionally, option creation.
///
/// `load` returns records in the source's natural order; the pipeline
/// preserves that order unless an explicit ordering is configured.
pub trait DataSource: Send + Sync {
    /// Loads the base collection.
    fn load(&self) -> Vec<Record>;

    /// Creates a new option from a user-typed label.
    ///
    /// The default implementation rejects creation; sources that support
    /// the widget's create flow override this.
    ///
    /// # Errors
    ///
    /// Returns [`TomSelectError::BadRequest`] when the source does not
    /// support creation.
    fn create_option(&self, label: &str) -> TomSelectResult<Record> {
        let _ = label;
        Err(TomSelectError::BadRequest(
            "this source does not support option creation".to_string(),
        ))
    }
}

/// An in-memory data source.
///
/// Records keep their insertion order. Creation appends a record with an
/// auto-incremented integer in `value_field` and the typed label in
/// `label_field`.
///
/// # Examples
///
/// ```
/// use tomselect_rs_query::record::Record;
/// use tomselect_rs_query::source::{DataSource, MemorySource};
///
/// let source = MemorySource::new(vec![
///     Record::new().with("id", 1_i64).with("name", "Fiction"),
/// ]);
/// assert_eq!(source.load().len(), 1);
/// ```
pub struct MemorySource {
    records: Mutex<Vec<Record>>,
    value_field: String,
    label_field: String,
    allow_create: bool,
}

impl MemorySource {
    /// Creates a source over the given records, with creation disabled.
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: Mutex::new(records),
            value_field: "id".to_string(),
            label_field: "name".to_string(),
            allow_create: false,
        }
    }

    /// Enables option creation, naming the value and label fields new
    /// records are built with.
    #[must_use]
    pub fn with_create(
        mut self,
        value_field: impl Into<String>,
        label_field: impl Into<String>,
    ) -> Self {
        self.value_field = value_field.into();
        self.label_field = label_field.into();
        self.allow_create = true;
        self
    }
}

impl DataSource for MemorySource {
    fn load(&self) -> Vec<Record> {
        self.records.lock().expect("source lock poisoned").clone()
    }

    fn create_option(&self, label: &str) -> TomSelectResult<Record> {
        if !self.allow_create {
            return Err(TomSelectError::BadRequest(
                "this source does not support option creation".to_string(),
            ));
        }
        if label.trim().is_empty() {
            return Err(TomSelectError::BadRequest(
                "cannot create an option with an empty label".to_string(),
            ));
        }

        let mut records = self.records.lock().expect("source lock poisoned");
        let next_id = records
            .iter()
            .filter_map(|r| r.get(&self.value_field).as_int())
            .max()
            .unwrap_or(0)
            + 1;
        let record = Record::new()
            .with(self.value_field.clone(), Value::Int(next_id))
            .with(self.label_field.clone(), label.trim());
        records.push(record.clone());
        Ok(record)
    }
}
