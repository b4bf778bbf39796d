//! # tomselect-rs-core
//!
//! Core types for the tomselect-rs widget toolkit. This crate has no
//! intra-workspace dependencies and provides the foundation for all other
//! crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Package-level settings and configuration file loading
//! - [`config`] - Widget and plugin configuration objects
//! - [`logging`] - Tracing-based logging integration

pub mod config;
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the most commonly used types at the crate root.
pub use config::{CssFramework, GeneralConfig, PluginSet};
pub use error::{TomSelectError, TomSelectResult, ValidationError};
pub use settings::Settings;
