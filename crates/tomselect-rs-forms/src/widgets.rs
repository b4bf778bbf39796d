//! Widget rendering for Tom Select inputs.
//!
//! A widget renders the `<select>` element the browser glue enhances,
//! extracts the raw submitted value from form data, and produces the `id`
//! its `<label>` points at. All widget behavior the browser needs travels
//! in `data-*` attributes:
//!
//! - `data-tomselect` - the serialized [`GeneralConfig`] and [`PluginSet`]
//! - `data-autocomplete-url` - where to fetch options
//! - `data-value-field` / `data-label-field` - result object keys
//! - `data-filter-by` / `data-exclude-by` - declared constraints, so the
//!   glue can watch each sibling field, cancel the in-flight request when
//!   the sibling changes, and reissue with the fresh value

use std::collections::HashMap;
use std::fmt;

use serde_json::json;

use tomselect_rs_core::config::{GeneralConfig, PluginSet};
use tomselect_rs_core::error::TomSelectResult;
use tomselect_rs_http::QueryParams;
use tomselect_rs_query::constraint::{Binding, FilterConstraint};

/// A form widget: renders HTML, extracts submitted values.
pub trait Widget: Send + Sync + fmt::Debug {
    /// Renders the widget as an HTML string.
    fn render(
        &self,
        name: &str,
        value: &Option<String>,
        attrs: &HashMap<String, String>,
    ) -> String;

    /// Extracts the raw string value from submitted form data.
    fn value_from_data(&self, data: &QueryParams, name: &str) -> Option<String>;

    /// Returns the `id` attribute a `<label>` for this widget targets.
    fn id_for_label(&self, id: &str) -> String;
}

/// Escapes a string for use inside a double-quoted HTML attribute.
fn escape_attr(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// A single-select Tom Select widget.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use tomselect_rs_core::config::{GeneralConfig, PluginSet};
/// use tomselect_rs_forms::widgets::{TomSelectWidget, Widget};
///
/// let widget = TomSelectWidget::new("/autocomplete/book/", "id", "title")
///     .config(GeneralConfig::default())
///     .plugins(PluginSet::default());
/// let html = widget.render("book", &None, &HashMap::new());
/// assert!(html.contains("data-autocomplete-url=\"/autocomplete/book/\""));
/// ```
#[derive(Debug, Clone)]
pub struct TomSelectWidget {
    /// The autocomplete endpoint URL.
    pub autocomplete_url: String,
    /// The result key holding the stored identifier.
    pub value_field: String,
    /// The result key holding the display string.
    pub label_field: String,
    /// General widget configuration.
    pub config: GeneralConfig,
    /// Enabled plugins.
    pub plugins: PluginSet,
    /// Declared filter constraints, emitted as `data-filter-by`.
    pub filter_by: Vec<FilterConstraint>,
    /// Declared exclude constraints, emitted as `data-exclude-by`.
    pub exclude_by: Vec<FilterConstraint>,
}

impl TomSelectWidget {
    /// Creates a widget for the given endpoint and result keys.
    pub fn new(
        autocomplete_url: impl Into<String>,
        value_field: impl Into<String>,
        label_field: impl Into<String>,
    ) -> Self {
        Self {
            autocomplete_url: autocomplete_url.into(),
            value_field: value_field.into(),
            label_field: label_field.into(),
            config: GeneralConfig::default(),
            plugins: PluginSet::default(),
            filter_by: Vec::new(),
            exclude_by: Vec::new(),
        }
    }

    /// Sets the general configuration.
    #[must_use]
    pub fn config(mut self, config: GeneralConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the plugin set.
    #[must_use]
    pub fn plugins(mut self, plugins: PluginSet) -> Self {
        self.plugins = plugins;
        self
    }

    /// Adds a declared filter constraint.
    #[must_use]
    pub fn filter_by(mut self, constraint: FilterConstraint) -> Self {
        self.filter_by.push(constraint);
        self
    }

    /// Adds a declared exclude constraint.
    #[must_use]
    pub fn exclude_by(mut self, constraint: FilterConstraint) -> Self {
        self.exclude_by.push(constraint);
        self
    }

    /// Validates the widget's configuration and plugins.
    pub fn validate(&self) -> TomSelectResult<()> {
        self.config.validate()?;
        self.plugins.validate()
    }

    /// Serializes the declared constraints for a `data-*` attribute.
    ///
    /// Field-bound constraints name the sibling the glue must watch;
    /// constant constraints are applied server-side and are not emitted.
    fn constraints_json(constraints: &[FilterConstraint]) -> Option<String> {
        let bound: Vec<serde_json::Value> = constraints
            .iter()
            .filter_map(|c| match &c.binding {
                Binding::FieldBound { sibling } => Some(json!({
                    "sibling": sibling,
                    "param": c.wire_name(),
                })),
                Binding::Constant(_) => None,
            })
            .collect();
        if bound.is_empty() {
            None
        } else {
            Some(serde_json::Value::Array(bound).to_string())
        }
    }

    /// Builds the shared `data-*` attribute string.
    fn data_attrs(&self) -> String {
        let config_json = json!({
            "config": self.config,
            "plugins": self.plugins,
        })
        .to_string();

        let mut out = format!(
            r#" data-tomselect="{}" data-autocomplete-url="{}" data-value-field="{}" data-label-field="{}""#,
            escape_attr(&config_json),
            escape_attr(&self.autocomplete_url),
            escape_attr(&self.value_field),
            escape_attr(&self.label_field),
        );
        if let Some(filters) = Self::constraints_json(&self.filter_by) {
            out.push_str(&format!(r#" data-filter-by="{}""#, escape_attr(&filters)));
        }
        if let Some(excludes) = Self::constraints_json(&self.exclude_by) {
            out.push_str(&format!(r#" data-exclude-by="{}""#, escape_attr(&excludes)));
        }
        out
    }

    /// Renders the widget with pre-resolved selected options.
    ///
    /// Each entry is a `(value, label)` pair; the field layer resolves
    /// labels against its data source so the widget shows text, not ids,
    /// before the first fetch.
    pub fn render_with_selected(
        &self,
        name: &str,
        selected: &[(String, String)],
        attrs: &HashMap<String, String>,
        multiple: bool,
    ) -> String {
        let mut options = String::new();
        for (value, label) in selected {
            options.push_str(&format!(
                r#"<option value="{}" selected>{}</option>"#,
                escape_attr(value),
                escape_attr(label)
            ));
        }
        let multiple_attr = if multiple { " multiple" } else { "" };
        format!(
            r#"<select name="{name}"{multiple_attr}{}{}>{options}</select>"#,
            self.data_attrs(),
            render_attrs(attrs)
        )
    }
}

/// Formats extra HTML attributes, sorted for deterministic output.
fn render_attrs(attrs: &HashMap<String, String>) -> String {
    if attrs.is_empty() {
        return String::new();
    }
    let mut parts: Vec<String> = attrs
        .iter()
        .map(|(k, v)| format!(r#" {k}="{}""#, escape_attr(v)))
        .collect();
    parts.sort();
    parts.join("")
}

impl Widget for TomSelectWidget {
    fn render(
        &self,
        name: &str,
        value: &Option<String>,
        attrs: &HashMap<String, String>,
    ) -> String {
        let selected: Vec<(String, String)> = value
            .iter()
            .filter(|v| !v.is_empty())
            .map(|v| (v.clone(), v.clone()))
            .collect();
        self.render_with_selected(name, &selected, attrs, false)
    }

    fn value_from_data(&self, data: &QueryParams, name: &str) -> Option<String> {
        data.get(name).map(String::from)
    }

    fn id_for_label(&self, id: &str) -> String {
        id.to_string()
    }
}

/// A multi-select Tom Select widget.
///
/// Wraps a [`TomSelectWidget`] and renders `<select multiple>`; submitted
/// data may repeat the field name once per selected value.
#[derive(Debug, Clone)]
pub struct TomSelectMultipleWidget {
    /// The underlying single-select widget carrying all configuration.
    pub inner: TomSelectWidget,
}

impl TomSelectMultipleWidget {
    /// Creates a multi-select widget for the given endpoint and result keys.
    pub fn new(
        autocomplete_url: impl Into<String>,
        value_field: impl Into<String>,
        label_field: impl Into<String>,
    ) -> Self {
        Self {
            inner: TomSelectWidget::new(autocomplete_url, value_field, label_field),
        }
    }

    /// Replaces the underlying widget configuration.
    #[must_use]
    pub fn inner(mut self, inner: TomSelectWidget) -> Self {
        self.inner = inner;
        self
    }

    /// Renders with pre-resolved `(value, label)` selections.
    pub fn render_with_selected(
        &self,
        name: &str,
        selected: &[(String, String)],
        attrs: &HashMap<String, String>,
    ) -> String {
        self.inner.render_with_selected(name, selected, attrs, true)
    }

    /// Extracts every submitted value for the field name.
    pub fn values_from_data(&self, data: &QueryParams, name: &str) -> Vec<String> {
        data.get_all(name)
            .into_iter()
            .map(String::from)
            .collect()
    }
}

impl Widget for TomSelectMultipleWidget {
    fn render(
        &self,
        name: &str,
        value: &Option<String>,
        attrs: &HashMap<String, String>,
    ) -> String {
        let selected: Vec<(String, String)> = value
            .iter()
            .flat_map(|v| v.split(','))
            .filter(|v| !v.is_empty())
            .map(|v| (v.to_string(), v.to_string()))
            .collect();
        self.inner.render_with_selected(name, &selected, attrs, true)
    }

    fn value_from_data(&self, data: &QueryParams, name: &str) -> Option<String> {
        let values = data.get_all(name);
        if values.is_empty() {
            None
        } else {
            Some(values.join(","))
        }
    }

    fn id_for_label(&self, id: &str) -> String {
        id.to_string()
    }
}
