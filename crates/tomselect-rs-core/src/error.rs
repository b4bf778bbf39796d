//! Core error types for the tomselect-rs toolkit.
//!
//! This module provides the [`TomSelectError`] enum covering the error
//! categories the toolkit produces: request-time HTTP errors, form
//! validation errors, and configuration errors raised while a field or
//! view is being constructed.
//!
//! Configuration errors are deliberately distinct from request-time errors:
//! an unknown lookup name or a reference to a sibling field that does not
//! exist is a developer mistake surfaced once at setup, never per request.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// A form validation error with optional field-level messages.
///
/// # Examples
///
/// ```
/// use tomselect_rs_core::error::ValidationError;
///
/// let err = ValidationError::new("Select a valid choice.", "invalid_choice");
/// assert_eq!(err.code, "invalid_choice");
/// ```
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The primary error message.
    pub message: String,
    /// A short code identifying the failure (e.g. "required", "invalid_choice").
    pub code: String,
    /// Per-field validation errors, keyed by field name.
    pub field_errors: HashMap<String, Vec<Self>>,
}

impl ValidationError {
    /// Creates a new `ValidationError` with a message and code.
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            field_errors: HashMap::new(),
        }
    }

    /// Creates a `ValidationError` containing per-field errors.
    pub fn with_field_errors(field_errors: HashMap<String, Vec<Self>>) -> Self {
        Self {
            message: String::new(),
            code: String::new(),
            field_errors,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.message.is_empty() {
            write!(f, "{}", self.message)?;
        } else {
            let mut first = true;
            for (field, errors) in &self.field_errors {
                for error in errors {
                    if !first {
                        write!(f, "; ")?;
                    }
                    write!(f, "{field}: {error}")?;
                    first = false;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// The primary error type for the tomselect-rs toolkit.
///
/// Each variant maps to an HTTP status code via
/// [`TomSelectError::status_code`], so the view layer can turn any error
/// into a response without inspecting it further.
#[derive(Error, Debug)]
pub enum TomSelectError {
    // ── Request-time errors ──────────────────────────────────────────

    /// HTTP 400 Bad Request.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// HTTP 403 Forbidden. The permission check failed; no result leakage.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// HTTP 404 Not Found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// HTTP 405 Method Not Allowed.
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    // ── Validation ───────────────────────────────────────────────────

    /// One or more form fields failed validation.
    #[error("Validation error: {0}")]
    ValidationError(ValidationError),

    // ── Configuration ────────────────────────────────────────────────

    /// A field, widget, or view was configured incorrectly.
    ///
    /// Raised at construction time for unknown lookup names, references to
    /// sibling fields that do not exist, and malformed plugin settings.
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred serializing widget configuration or results.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred (settings file loading).
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl TomSelectError {
    /// Returns the HTTP status code associated with this error.
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) | Self::ValidationError(_) => 400,
            Self::PermissionDenied(_) => 403,
            Self::NotFound(_) => 404,
            Self::MethodNotAllowed(_) => 405,
            Self::ImproperlyConfigured(_) | Self::SerializationError(_) | Self::IoError(_) => 500,
        }
    }
}

impl From<serde_json::Error> for TomSelectError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// A convenience type alias for `Result<T, TomSelectError>`.
pub type TomSelectResult<T> = Result<T, TomSelectError>;
