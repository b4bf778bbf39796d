//! # tomselect-rs-auth
//!
//! Authorization for the tomselect-rs toolkit. The host application
//! authenticates callers; this crate decides, and memoizes, whether a
//! caller may use an autocomplete view.
//!
//! ## Modules
//!
//! - [`user`] - The request user snapshot
//! - [`cache`] - Permission policies and the invalidatable permission cache

pub mod cache;
pub mod user;

pub use cache::{PermissionCache, PermissionPolicy};
pub use user::RequestUser;
