//! Widget and plugin configuration objects.
//!
//! Tom Select behavior is driven by a [`GeneralConfig`] plus a set of
//! independently configurable plugins collected in a [`PluginSet`]. Every
//! option is an explicit struct field with a type and a default; nothing is
//! passed through as an untyped keyword bag. Configs are immutable value
//! objects: build them once, validate, attach to a field or view, and clone
//! freely when a form is instantiated more than once.
//!
//! The whole set serializes to JSON for the widget's `data-tomselect`
//! attribute, which the browser glue reads verbatim.
//!
//! # Examples
//!
//! ```
//! use tomselect_rs_core::config::{GeneralConfig, PluginSet, PluginClearButton};
//!
//! let config = GeneralConfig::default();
//! assert!(config.validate().is_ok());
//!
//! let plugins = PluginSet::default().with_clear_button(PluginClearButton::default());
//! assert!(plugins.clear_button.is_some());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{TomSelectError, TomSelectResult};

/// The CSS framework the widget styles itself for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CssFramework {
    /// Framework-agnostic default stylesheet.
    #[default]
    Default,
    /// Bootstrap 4 stylesheet.
    Bootstrap4,
    /// Bootstrap 5 stylesheet.
    Bootstrap5,
}

/// When the widget fetches its first page of options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preload {
    /// Only load once the user types.
    Off,
    /// Load when the input receives focus.
    #[default]
    Focus,
}

/// General widget configuration.
///
/// Field names and defaults follow the Tom Select option names where one
/// exists; pagination and query-throttling options belong to the
/// autocomplete transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Highlight matching text in dropdown rows.
    pub highlight: bool,
    /// Open the dropdown when the input receives focus.
    pub open_on_focus: bool,
    /// When to fetch the first page of options.
    pub preload: Preload,
    /// Placeholder text shown in the empty input.
    pub placeholder: Option<String>,
    /// Hide the placeholder once items are selected.
    pub hide_placeholder: bool,
    /// Close the dropdown after a selection is made.
    pub close_after_select: bool,
    /// Maximum number of selectable items. `None` means unlimited.
    pub max_items: Option<u32>,
    /// Maximum number of options rendered in the dropdown. `None` means unlimited.
    pub max_options: Option<u32>,
    /// Minimum number of typed characters before a search request is issued.
    pub minimum_query_length: u32,
    /// Milliseconds to wait after a keystroke before issuing a request.
    pub load_throttle: u32,
    /// Number of results per autocomplete page.
    pub page_size: u64,
    /// Allow the user to create new options from the typed term.
    pub create: bool,
    /// The CSS framework to style for.
    pub css_framework: CssFramework,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            highlight: true,
            open_on_focus: true,
            preload: Preload::Focus,
            placeholder: Some("Select a value".to_string()),
            hide_placeholder: false,
            close_after_select: true,
            max_items: None,
            max_options: None,
            minimum_query_length: 2,
            load_throttle: 300,
            page_size: 20,
            create: false,
            css_framework: CssFramework::default(),
        }
    }
}

impl GeneralConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TomSelectError::ImproperlyConfigured`] for zero page sizes
    /// or a `max_items` of zero.
    pub fn validate(&self) -> TomSelectResult<()> {
        if self.page_size == 0 {
            return Err(TomSelectError::ImproperlyConfigured(
                "page_size must be at least 1".to_string(),
            ));
        }
        if self.max_items == Some(0) {
            return Err(TomSelectError::ImproperlyConfigured(
                "max_items must be at least 1 when set".to_string(),
            ));
        }
        if self.max_options == Some(0) {
            return Err(TomSelectError::ImproperlyConfigured(
                "max_options must be at least 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Plugins
// ---------------------------------------------------------------------------

/// Renders a checkbox next to each option (multi-select widgets).
///
/// Takes no options; its presence in the [`PluginSet`] enables it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PluginCheckboxOptions;

/// A button that clears all selected items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginClearButton {
    /// Tooltip text for the button.
    pub title: String,
    /// CSS class applied to the button element.
    pub class_name: String,
}

impl Default for PluginClearButton {
    fn default() -> Self {
        Self {
            title: "Clear Selections".to_string(),
            class_name: "clear-button".to_string(),
        }
    }
}

/// One extra column shown in a tabular dropdown header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderColumn {
    /// The result field whose value fills this column.
    pub field: String,
    /// The column heading.
    pub label: String,
}

/// A header row above the dropdown options, optionally tabular.
///
/// When `extra_columns` is non-empty the dropdown renders as a table: the
/// header labels each column and every result row is split into cells. The
/// configured fields must also be requested as extra fields on the view so
/// the formatter copies them into each result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginDropdownHeader {
    /// The header title.
    pub title: String,
    /// CSS class for the header container.
    pub header_class: String,
    /// CSS class for the title row.
    pub title_row_class: String,
    /// CSS class for each column label.
    pub label_class: String,
    /// Show a column for the value field.
    pub show_value_field: bool,
    /// Heading for the value-field column.
    pub value_field_label: String,
    /// Heading for the label-field column.
    pub label_field_label: String,
    /// Additional columns beyond value and label.
    pub extra_columns: Vec<HeaderColumn>,
}

impl Default for PluginDropdownHeader {
    fn default() -> Self {
        Self {
            title: "Autocomplete".to_string(),
            header_class: "container-fluid bg-primary text-bg-primary pt-1 pb-1 mb-2 dropdown-header".to_string(),
            title_row_class: "row".to_string(),
            label_class: "form-label".to_string(),
            show_value_field: false,
            value_field_label: "Value".to_string(),
            label_field_label: "Label".to_string(),
            extra_columns: Vec::new(),
        }
    }
}

impl PluginDropdownHeader {
    /// Validates the header configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TomSelectError::ImproperlyConfigured`] if an extra column
    /// names an empty field or duplicates another column's field.
    pub fn validate(&self) -> TomSelectResult<()> {
        let mut seen = std::collections::HashSet::new();
        for column in &self.extra_columns {
            if column.field.is_empty() {
                return Err(TomSelectError::ImproperlyConfigured(
                    "dropdown header column has an empty field name".to_string(),
                ));
            }
            if !seen.insert(column.field.as_str()) {
                return Err(TomSelectError::ImproperlyConfigured(format!(
                    "dropdown header column '{}' is declared twice",
                    column.field
                )));
            }
        }
        Ok(())
    }
}

/// A footer row below the dropdown options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginDropdownFooter {
    /// The footer title.
    pub title: String,
    /// CSS class for the footer container.
    pub footer_class: String,
}

impl Default for PluginDropdownFooter {
    fn default() -> Self {
        Self {
            title: "Autocomplete Footer".to_string(),
            footer_class: "container-fluid mt-1 px-2 border-top dropdown-footer".to_string(),
        }
    }
}

/// Moves the search input into the dropdown itself.
///
/// Takes no options; its presence in the [`PluginSet`] enables it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PluginDropdownInput;

/// A per-item remove button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginRemoveButton {
    /// Tooltip text for the button.
    pub title: String,
    /// The button's visible label.
    pub label: String,
    /// CSS class applied to the button element.
    pub class_name: String,
}

impl Default for PluginRemoveButton {
    fn default() -> Self {
        Self {
            title: "Remove this item".to_string(),
            label: "&times;".to_string(),
            class_name: "remove".to_string(),
        }
    }
}

/// Loads further pages as the user scrolls the dropdown.
///
/// Takes no options; its presence in the [`PluginSet`] enables it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PluginVirtualScroll;

/// The set of plugins enabled on a widget.
///
/// Each plugin is optional; `None` means disabled. The set serializes to a
/// JSON object keyed by the plugin names the browser glue expects.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginSet {
    /// Checkbox next to each option.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkbox_options: Option<PluginCheckboxOptions>,
    /// Clear-all button.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clear_button: Option<PluginClearButton>,
    /// Dropdown header, optionally tabular.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropdown_header: Option<PluginDropdownHeader>,
    /// Dropdown footer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropdown_footer: Option<PluginDropdownFooter>,
    /// Search input inside the dropdown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropdown_input: Option<PluginDropdownInput>,
    /// Per-item remove button.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_button: Option<PluginRemoveButton>,
    /// Paged loading on scroll.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_scroll: Option<PluginVirtualScroll>,
}

impl PluginSet {
    /// Enables the checkbox-options plugin.
    #[must_use]
    pub fn with_checkbox_options(mut self) -> Self {
        self.checkbox_options = Some(PluginCheckboxOptions);
        self
    }

    /// Enables the clear-button plugin.
    #[must_use]
    pub fn with_clear_button(mut self, plugin: PluginClearButton) -> Self {
        self.clear_button = Some(plugin);
        self
    }

    /// Enables the dropdown-header plugin.
    #[must_use]
    pub fn with_dropdown_header(mut self, plugin: PluginDropdownHeader) -> Self {
        self.dropdown_header = Some(plugin);
        self
    }

    /// Enables the dropdown-footer plugin.
    #[must_use]
    pub fn with_dropdown_footer(mut self, plugin: PluginDropdownFooter) -> Self {
        self.dropdown_footer = Some(plugin);
        self
    }

    /// Enables the dropdown-input plugin.
    #[must_use]
    pub fn with_dropdown_input(mut self) -> Self {
        self.dropdown_input = Some(PluginDropdownInput);
        self
    }

    /// Enables the remove-button plugin.
    #[must_use]
    pub fn with_remove_button(mut self, plugin: PluginRemoveButton) -> Self {
        self.remove_button = Some(plugin);
        self
    }

    /// Enables the virtual-scroll plugin.
    #[must_use]
    pub fn with_virtual_scroll(mut self) -> Self {
        self.virtual_scroll = Some(PluginVirtualScroll);
        self
    }

    /// Validates every enabled plugin.
    pub fn validate(&self) -> TomSelectResult<()> {
        if let Some(header) = &self.dropdown_header {
            header.validate()?;
        }
        Ok(())
    }
}
