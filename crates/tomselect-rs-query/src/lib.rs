//! # tomselect-rs-query
//!
//! The query resolution layer for tomselect-rs: a source-agnostic record
//! model, field lookups with composable `Q` filters, declared filter and
//! exclude constraints, the fixed-order resolution pipeline, pagination,
//! and result formatting.
//!
//! The pipeline is a pure function of its inputs: it owns no persistent
//! state and filters materialized records in process. Whatever actually
//! holds the options sits behind the [`source::DataSource`] trait.
//!
//! ## Modules
//!
//! - [`value`] - The record field value enum with loose comparisons
//! - [`record`] - The flat field→value record
//! - [`lookups`] - Field lookups and `Q` combinators
//! - [`constraint`] - Declared filter/exclude constraints
//! - [`request`] - The parsed autocomplete request
//! - [`source`] - The data source seam and in-memory implementation
//! - [`pipeline`] - The fixed-order query resolution pipeline
//! - [`page`] - The result page
//! - [`format`] - Result formatting for transport

pub mod constraint;
pub mod format;
pub mod lookups;
pub mod page;
pub mod pipeline;
pub mod record;
pub mod request;
pub mod source;
pub mod value;

// Re-export the most commonly used types at the crate root.
pub use constraint::{Binding, FilterConstraint};
pub use format::ResultFormatter;
pub use lookups::{LookupKind, Q};
pub use page::ResultPage;
pub use pipeline::{OrderBy, QueryPipeline, SearchField};
pub use record::Record;
pub use request::{AppliedConstraint, AutocompleteRequest};
pub use source::{DataSource, MemorySource};
pub use value::Value;
