//! # tomselect-rs-forms
//!
//! The form layer for tomselect-rs: widgets that render the enhanced
//! `<select>` element with its `data-*` configuration payload, field
//! definitions that validate submitted choices against a data source, a
//! small form container, and the media (CSS/JS) declarations a page needs.
//!
//! ## Modules
//!
//! - [`widgets`] - The `Widget` trait and the Tom Select widgets
//! - [`fields`] - Field definitions and choice validation
//! - [`form`] - The form container
//! - [`media`] - Stylesheet and script asset lists

pub mod fields;
pub mod form;
pub mod media;
pub mod widgets;

pub use fields::{FormField, TomSelectField, TomSelectMultipleField};
pub use form::SelectForm;
pub use media::{Media, GLUE_SOURCE};
pub use widgets::{TomSelectMultipleWidget, TomSelectWidget, Widget};
