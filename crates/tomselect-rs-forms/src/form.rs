//! The form container.
//!
//! [`SelectForm`] holds a list of fields, binds submitted data, runs
//! validation, and collects errors, cleaned values, and merged media. It
//! is deliberately small: the host framework owns the wider form
//! lifecycle; this container is the glue that makes a group of Tom Select
//! fields behave like one form.

use std::collections::HashMap;

use tomselect_rs_http::QueryParams;
use tomselect_rs_query::value::Value;

use crate::fields::FormField;
use crate::media::Media;

/// A form over Tom Select fields.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tomselect_rs_forms::fields::TomSelectField;
/// use tomselect_rs_forms::form::SelectForm;
/// use tomselect_rs_forms::widgets::TomSelectWidget;
/// use tomselect_rs_http::QueryParams;
/// use tomselect_rs_query::{MemorySource, Record};
///
/// let source = Arc::new(MemorySource::new(vec![
///     Record::new().with("id", 1_i64).with("name", "Fiction"),
/// ]));
/// let field = TomSelectField::new(
///     "genre",
///     source,
///     TomSelectWidget::new("/autocomplete/genre/", "id", "name"),
/// )
/// .unwrap();
///
/// let mut form = SelectForm::new(vec![Box::new(field)]);
/// form.bind(QueryParams::parse("genre=1"));
/// assert!(form.is_valid());
/// ```
pub struct SelectForm {
    fields: Vec<Box<dyn FormField>>,
    data: Option<QueryParams>,
    errors: HashMap<String, Vec<String>>,
    cleaned_data: HashMap<String, Value>,
}

impl SelectForm {
    /// Creates an unbound form over the given fields.
    pub fn new(fields: Vec<Box<dyn FormField>>) -> Self {
        Self {
            fields,
            data: None,
            errors: HashMap::new(),
            cleaned_data: HashMap::new(),
        }
    }

    /// Returns the form's fields.
    pub fn fields(&self) -> &[Box<dyn FormField>] {
        &self.fields
    }

    /// Binds submitted data to this form, clearing prior validation state.
    pub fn bind(&mut self, data: QueryParams) {
        self.data = Some(data);
        self.errors.clear();
        self.cleaned_data.clear();
    }

    /// Returns `true` if this form has been bound to data.
    pub const fn is_bound(&self) -> bool {
        self.data.is_some()
    }

    /// Validates every field. Returns `true` if all of them clean.
    ///
    /// An unbound form is never valid. After this call, [`Self::errors`]
    /// and [`Self::cleaned_data`] are populated.
    pub fn is_valid(&mut self) -> bool {
        let Some(data) = &self.data else {
            return false;
        };

        self.errors.clear();
        self.cleaned_data.clear();

        for field in &self.fields {
            match field.clean(data) {
                Ok(value) => {
                    self.cleaned_data.insert(field.name().to_string(), value);
                }
                Err(err) => {
                    self.errors
                        .entry(field.name().to_string())
                        .or_default()
                        .push(err.message);
                }
            }
        }

        self.errors.is_empty()
    }

    /// Returns per-field validation errors.
    pub const fn errors(&self) -> &HashMap<String, Vec<String>> {
        &self.errors
    }

    /// Returns the cleaned values, populated by a successful `is_valid`.
    pub const fn cleaned_data(&self) -> &HashMap<String, Value> {
        &self.cleaned_data
    }

    /// Merges the media of every field, deduplicated.
    pub fn media(&self) -> Media {
        let mut media = Media::new();
        for field in &self.fields {
            media.merge(&field.media());
        }
        media
    }

    /// Renders every field as a labeled row.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for field in &self.fields {
            out.push_str(&format!(
                "<label for=\"id_{name}\">{label}</label>\n{widget}\n",
                name = field.name(),
                label = field.label(),
                widget = field.render(self.data.as_ref()),
            ));
        }
        out
    }
}
