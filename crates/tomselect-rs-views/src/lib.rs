//! # tomselect-rs-views
//!
//! The view layer for tomselect-rs: the autocomplete endpoint that parses
//! the wire request, enforces permissions through the cached policy check,
//! runs the query pipeline, and answers with the JSON the widget consumes;
//! plus the axum router glue that mounts views by identity.
//!
//! ## Modules
//!
//! - [`autocomplete`] - The `View` trait and [`autocomplete::AutocompleteView`]
//! - [`routes`] - Axum router construction

pub mod autocomplete;
pub mod routes;

pub use autocomplete::{AutocompleteView, View, ViewRequest, ViewResponse};
pub use routes::router;
