//! Form media: the CSS and JS assets a widget needs on the page.
//!
//! Each field contributes a [`Media`] value; a form merges its fields'
//! media preserving order and dropping duplicates, so a page with five
//! Tom Select fields still loads the library once.

use tomselect_rs_core::config::CssFramework;

/// The Tom Select bundle.
const TOM_SELECT_JS: &str =
    "https://cdn.jsdelivr.net/npm/tom-select@2.3.1/dist/js/tom-select.complete.min.js";
/// The toolkit's browser glue: issues requests, watches sibling fields,
/// renders rows from the response.
const GLUE_JS: &str = "/static/tomselect/tomselect.js";

/// The browser glue source, for hosts that serve it themselves.
///
/// Mount this at [`GLUE_JS`]'s path (or rewrite the media list) so pages
/// can load it alongside the Tom Select bundle.
pub const GLUE_SOURCE: &str = include_str!("../static/tomselect.js");

const CSS_DEFAULT: &str =
    "https://cdn.jsdelivr.net/npm/tom-select@2.3.1/dist/css/tom-select.default.min.css";
const CSS_BOOTSTRAP4: &str =
    "https://cdn.jsdelivr.net/npm/tom-select@2.3.1/dist/css/tom-select.bootstrap4.min.css";
const CSS_BOOTSTRAP5: &str =
    "https://cdn.jsdelivr.net/npm/tom-select@2.3.1/dist/css/tom-select.bootstrap5.min.css";

/// An ordered, duplicate-free list of stylesheet and script URLs.
///
/// # Examples
///
/// ```
/// use tomselect_rs_core::config::CssFramework;
/// use tomselect_rs_forms::media::Media;
///
/// let media = Media::for_framework(CssFramework::Bootstrap5);
/// assert_eq!(media.css().len(), 1);
/// assert_eq!(media.js().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Media {
    css: Vec<String>,
    js: Vec<String>,
}

impl Media {
    /// Creates empty media.
    pub const fn new() -> Self {
        Self {
            css: Vec::new(),
            js: Vec::new(),
        }
    }

    /// The assets a Tom Select widget needs for the given CSS framework.
    pub fn for_framework(framework: CssFramework) -> Self {
        let css = match framework {
            CssFramework::Default => CSS_DEFAULT,
            CssFramework::Bootstrap4 => CSS_BOOTSTRAP4,
            CssFramework::Bootstrap5 => CSS_BOOTSTRAP5,
        };
        Self {
            css: vec![css.to_string()],
            js: vec![TOM_SELECT_JS.to_string(), GLUE_JS.to_string()],
        }
    }

    /// Returns the stylesheet URLs.
    pub fn css(&self) -> &[String] {
        &self.css
    }

    /// Returns the script URLs.
    pub fn js(&self) -> &[String] {
        &self.js
    }

    /// Merges another media list into this one, keeping first-seen order
    /// and dropping URLs already present.
    pub fn merge(&mut self, other: &Self) {
        for url in &other.css {
            if !self.css.contains(url) {
                self.css.push(url.clone());
            }
        }
        for url in &other.js {
            if !self.js.contains(url) {
                self.js.push(url.clone());
            }
        }
    }

    /// Renders `<link>` and `<script>` tags.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for url in &self.css {
            out.push_str(&format!(
                "<link href=\"{url}\" rel=\"stylesheet\" />\n"
            ));
        }
        for url in &self.js {
            out.push_str(&format!("<script src=\"{url}\"></script>\n"));
        }
        out
    }
}
