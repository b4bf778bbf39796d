//! # tomselect-rs-http
//!
//! The wire protocol for tomselect-rs autocomplete requests: query string
//! parsing with repeated keys, the `field__lookup=value` constraint
//! encoding, and the JSON response bodies the widget consumes.
//!
//! ## Modules
//!
//! - [`params`] - Multi-value query string parameters
//! - [`wire`] - Request parsing and the parameter names
//! - [`response`] - JSON response bodies

pub mod params;
pub mod response;
pub mod wire;

pub use params::QueryParams;
pub use response::{AutocompleteResponse, ErrorResponse};
pub use wire::parse_request;
