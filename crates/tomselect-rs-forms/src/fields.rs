//! Form field definitions backed by a data source.
//!
//! [`TomSelectField`] and [`TomSelectMultipleField`] connect a widget to
//! the form lifecycle: extract the submitted value, validate it against
//! the backing [`DataSource`] (a value that is not among the source's
//! options is an `invalid_choice` error), and render the widget with the
//! selected options' labels resolved.
//!
//! Field construction validates the widget configuration; a bad config is
//! surfaced to the developer once, not per request.

use std::collections::HashMap;
use std::sync::Arc;

use tomselect_rs_core::error::{TomSelectResult, ValidationError};
use tomselect_rs_http::QueryParams;
use tomselect_rs_query::record::Record;
use tomselect_rs_query::source::DataSource;
use tomselect_rs_query::value::Value;

use crate::media::Media;
use crate::widgets::{TomSelectMultipleWidget, TomSelectWidget, Widget};

/// The form-facing interface of a field.
///
/// A form iterates its fields through this trait: binding data, cleaning,
/// rendering, and collecting media.
pub trait FormField: Send + Sync {
    /// The field's form name.
    fn name(&self) -> &str;

    /// Whether an empty submission is an error.
    fn required(&self) -> bool;

    /// The human-readable label.
    fn label(&self) -> &str;

    /// Extracts and validates this field's value from submitted data.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] with code `"required"` or
    /// `"invalid_choice"`.
    fn clean(&self, data: &QueryParams) -> Result<Value, ValidationError>;

    /// Renders the field's widget, showing any bound selection.
    fn render(&self, data: Option<&QueryParams>) -> String;

    /// The assets this field's widget needs.
    fn media(&self) -> Media;
}

/// A single-select autocomplete field.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tomselect_rs_forms::fields::{FormField, TomSelectField};
/// use tomselect_rs_forms::widgets::TomSelectWidget;
/// use tomselect_rs_http::QueryParams;
/// use tomselect_rs_query::{MemorySource, Record, Value};
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
/// let data = QueryParams::parse("genre=1");
/// assert_eq!(field.clean(&data).unwrap(), Value::Int(1));
/// ```
pub struct TomSelectField {
    name: String,
    label: String,
    help_text: String,
    required: bool,
    source: Arc<dyn DataSource>,
    widget: TomSelectWidget,
}

impl TomSelectField {
    /// Creates a field, validating the widget configuration.
    pub fn new(
        name: impl Into<String>,
        source: Arc<dyn DataSource>,
        widget: TomSelectWidget,
    ) -> TomSelectResult<Self> {
        widget.validate()?;
        let name = name.into();
        Ok(Self {
            label: name.clone(),
            help_text: String::new(),
            required: true,
            name,
            source,
            widget,
        })
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = help_text.into();
        self
    }

    /// Sets whether the field is required.
    #[must_use]
    pub const fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Returns the widget.
    pub const fn widget(&self) -> &TomSelectWidget {
        &self.widget
    }

    /// Returns the help text.
    pub fn help_text_str(&self) -> &str {
        &self.help_text
    }

    /// Finds the source record whose value field matches `raw`.
    fn lookup_record(&self, raw: &str) -> Option<Record> {
        let needle = Value::from(raw);
        self.source
            .load()
            .into_iter()
            .find(|record| record.get(&self.widget.value_field).loosely_equals(&needle))
    }

    fn clean_one(&self, raw: &str) -> Result<Value, ValidationError> {
        self.lookup_record(raw).map_or_else(
            || {
                Err(ValidationError::new(
                    format!("Select a valid choice. {raw} is not one of the available choices."),
                    "invalid_choice",
                ))
            },
            |record| Ok(record.get(&self.widget.value_field).clone()),
        )
    }
}

impl FormField for TomSelectField {
    fn name(&self) -> &str {
        &self.name
    }

    fn required(&self) -> bool {
        self.required
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn clean(&self, data: &QueryParams) -> Result<Value, ValidationError> {
        let raw = self.widget.value_from_data(data, &self.name);
        match raw.as_deref() {
            None | Some("") => {
                if self.required {
                    Err(ValidationError::new("This field is required.", "required"))
                } else {
                    Ok(Value::Null)
                }
            }
            Some(raw) => self.clean_one(raw),
        }
    }

    fn render(&self, data: Option<&QueryParams>) -> String {
        let selected: Vec<(String, String)> = data
            .and_then(|d| self.widget.value_from_data(d, &self.name))
            .filter(|raw| !raw.is_empty())
            .map(|raw| {
                let label = self
                    .lookup_record(&raw)
                    .map_or_else(|| raw.clone(), |r| r.text(&self.widget.label_field));
                vec![(raw, label)]
            })
            .unwrap_or_default();
        self.widget
            .render_with_selected(&self.name, &selected, &HashMap::new(), false)
    }

    fn media(&self) -> Media {
        Media::for_framework(self.widget.config.css_framework)
    }
}

/// A multi-select autocomplete field.
///
/// Submitted data repeats the field name once per selected value. Every
/// value must be a valid choice; the configured `max_items` cap is
/// enforced server-side as well as in the widget.
pub struct TomSelectMultipleField {
    name: String,
    label: String,
    required: bool,
    source: Arc<dyn DataSource>,
    widget: TomSelectMultipleWidget,
}

impl TomSelectMultipleField {
    /// Creates a field, validating the widget configuration.
    pub fn new(
        name: impl Into<String>,
        source: Arc<dyn DataSource>,
        widget: TomSelectMultipleWidget,
    ) -> TomSelectResult<Self> {
        widget.inner.validate()?;
        let name = name.into();
        Ok(Self {
            label: name.clone(),
            required: true,
            name,
            source,
            widget,
        })
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets whether the field is required.
    #[must_use]
    pub const fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Returns the widget.
    pub const fn widget(&self) -> &TomSelectMultipleWidget {
        &self.widget
    }

    fn lookup_record(&self, raw: &str) -> Option<Record> {
        let needle = Value::from(raw);
        let value_field = &self.widget.inner.value_field;
        self.source
            .load()
            .into_iter()
            .find(|record| record.get(value_field).loosely_equals(&needle))
    }
}

impl FormField for TomSelectMultipleField {
    fn name(&self) -> &str {
        &self.name
    }

    fn required(&self) -> bool {
        self.required
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn clean(&self, data: &QueryParams) -> Result<Value, ValidationError> {
        let raws: Vec<String> = self
            .widget
            .values_from_data(data, &self.name)
            .into_iter()
            .filter(|raw| !raw.is_empty())
            .collect();

        if raws.is_empty() {
            return if self.required {
                Err(ValidationError::new("This field is required.", "required"))
            } else {
                Ok(Value::List(Vec::new()))
            };
        }

        if let Some(max_items) = self.widget.inner.config.max_items {
            if raws.len() > max_items as usize {
                return Err(ValidationError::new(
                    format!("Select at most {max_items} choices."),
                    "max_items",
                ));
            }
        }

        let value_field = &self.widget.inner.value_field;
        let mut values = Vec::with_capacity(raws.len());
        for raw in &raws {
            match self.lookup_record(raw) {
                Some(record) => values.push(record.get(value_field).clone()),
                None => {
                    return Err(ValidationError::new(
                        format!(
                            "Select a valid choice. {raw} is not one of the available choices."
                        ),
                        "invalid_choice",
                    ))
                }
            }
        }
        Ok(Value::List(values))
    }

    fn render(&self, data: Option<&QueryParams>) -> String {
        let selected: Vec<(String, String)> = data
            .map(|d| self.widget.values_from_data(d, &self.name))
            .unwrap_or_default()
            .into_iter()
            .filter(|raw| !raw.is_empty())
            .map(|raw| {
                let label = self
                    .lookup_record(&raw)
                    .map_or_else(|| raw.clone(), |r| r.text(&self.widget.inner.label_field));
                (raw, label)
            })
            .collect();
        self.widget
            .render_with_selected(&self.name, &selected, &HashMap::new())
    }

    fn media(&self) -> Media {
        Media::for_framework(self.widget.inner.config.css_framework)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tomselect_rs_core::config::GeneralConfig;
    use tomselect_rs_query::source::MemorySource;

    fn genres() -> Arc<MemorySource> {
        Arc::new(MemorySource::new(vec![
            Record::new().with("id", 1_i64).with("name", "Fiction"),
            Record::new().with("id", 2_i64).with("name", "History"),
            Record::new().with("id", 3_i64).with("name", "Poetry"),
        ]))
    }

    fn field() -> TomSelectField {
        TomSelectField::new(
            "genre",
            genres(),
            TomSelectWidget::new("/autocomplete/genre/", "id", "name"),
        )
        .unwrap()
    }

    fn multi_field() -> TomSelectMultipleField {
        TomSelectMultipleField::new(
            "genres",
            genres(),
            TomSelectMultipleWidget::new("/autocomplete/genre/", "id", "name"),
        )
        .unwrap()
    }

    // ── Construction ────────────────────────────────────────────────

    #[test]
    fn test_bad_widget_config_is_fatal_at_construction() {
        let mut widget = TomSelectWidget::new("/autocomplete/genre/", "id", "name");
        widget.config.page_size = 0;
        assert!(TomSelectField::new("genre", genres(), widget).is_err());
    }

    #[test]
    fn test_label_defaults_to_name() {
        assert_eq!(FormField::label(&field()), "genre");
        assert_eq!(FormField::label(&field().with_label("Genre")), "Genre");
    }

    // ── Single-select cleaning ──────────────────────────────────────

    #[test]
    fn test_clean_valid_choice() {
        let data = QueryParams::parse("genre=2");
        assert_eq!(field().clean(&data).unwrap(), Value::Int(2));
    }

    #[test]
    fn test_clean_invalid_choice() {
        let data = QueryParams::parse("genre=99");
        let err = field().clean(&data).unwrap_err();
        assert_eq!(err.code, "invalid_choice");
        assert!(err.message.contains("99"));
    }

    #[test]
    fn test_clean_missing_required() {
        let err = field().clean(&QueryParams::parse("")).unwrap_err();
        assert_eq!(err.code, "required");
    }

    #[test]
    fn test_clean_empty_required() {
        let err = field().clean(&QueryParams::parse("genre=")).unwrap_err();
        assert_eq!(err.code, "required");
    }

    #[test]
    fn test_clean_optional_empty_is_null() {
        let optional = field().with_required(false);
        assert_eq!(
            optional.clean(&QueryParams::parse("")).unwrap(),
            Value::Null
        );
    }

    // ── Single-select rendering ─────────────────────────────────────

    #[test]
    fn test_render_unbound() {
        let html = field().render(None);
        assert!(html.contains("<select name=\"genre\""));
        assert!(!html.contains("<option"));
    }

    #[test]
    fn test_render_bound_resolves_label() {
        let data = QueryParams::parse("genre=2");
        let html = field().render(Some(&data));
        assert!(html.contains(r#"<option value="2" selected>History</option>"#));
    }

    #[test]
    fn test_render_bound_unknown_value_falls_back_to_raw() {
        let data = QueryParams::parse("genre=42");
        let html = field().render(Some(&data));
        assert!(html.contains(r#"<option value="42" selected>42</option>"#));
    }

    // ── Multi-select cleaning ───────────────────────────────────────

    #[test]
    fn test_multi_clean_valid() {
        let data = QueryParams::parse("genres=1&genres=3");
        assert_eq!(
            multi_field().clean(&data).unwrap(),
            Value::List(vec![Value::Int(1), Value::Int(3)])
        );
    }

    #[test]
    fn test_multi_clean_one_invalid_fails() {
        let data = QueryParams::parse("genres=1&genres=99");
        let err = multi_field().clean(&data).unwrap_err();
        assert_eq!(err.code, "invalid_choice");
    }

    #[test]
    fn test_multi_clean_empty_required() {
        let err = multi_field().clean(&QueryParams::parse("")).unwrap_err();
        assert_eq!(err.code, "required");
    }

    #[test]
    fn test_multi_clean_optional_empty_is_empty_list() {
        let optional = multi_field().with_required(false);
        assert_eq!(
            optional.clean(&QueryParams::parse("")).unwrap(),
            Value::List(vec![])
        );
    }

    #[test]
    fn test_multi_clean_enforces_max_items() {
        let widget = TomSelectMultipleWidget::new("/autocomplete/genre/", "id", "name").inner(
            TomSelectWidget::new("/autocomplete/genre/", "id", "name").config(GeneralConfig {
                max_items: Some(2),
                ..GeneralConfig::default()
            }),
        );
        let capped = TomSelectMultipleField::new("genres", genres(), widget).unwrap();
        let data = QueryParams::parse("genres=1&genres=2&genres=3");
        let err = capped.clean(&data).unwrap_err();
        assert_eq!(err.code, "max_items");
    }

    #[test]
    fn test_multi_render_bound() {
        let data = QueryParams::parse("genres=1&genres=3");
        let html = multi_field().render(Some(&data));
        assert!(html.contains(r#"<option value="1" selected>Fiction</option>"#));
        assert!(html.contains(r#"<option value="3" selected>Poetry</option>"#));
        assert!(html.contains(" multiple"));
    }

    // ── Media ───────────────────────────────────────────────────────

    #[test]
    fn test_media_follows_widget_framework() {
        let media = field().media();
        assert!(media.css()[0].contains("default"));
    }
}
