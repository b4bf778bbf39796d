//! # tomselect-rs
//!
//! Tom Select integration for Rust web applications.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient
//! access. You can depend on `tomselect-rs` to get the whole toolkit, or
//! depend on individual crates for finer-grained control.

/// Core types: errors, settings, widget and plugin configuration.
pub use tomselect_rs_core as core;

/// Records, lookups, constraints, and the query resolution pipeline.
#[cfg(feature = "query")]
pub use tomselect_rs_query as query;

/// Request users, permission policies, and the permission cache.
#[cfg(feature = "auth")]
pub use tomselect_rs_auth as auth;

/// The wire protocol: parameter parsing and JSON response bodies.
#[cfg(feature = "http")]
pub use tomselect_rs_http as http;

/// Widgets, field definitions, forms, and media assets.
#[cfg(feature = "forms")]
pub use tomselect_rs_forms as forms;

/// The autocomplete endpoint and router glue.
#[cfg(feature = "views")]
pub use tomselect_rs_views as views;
