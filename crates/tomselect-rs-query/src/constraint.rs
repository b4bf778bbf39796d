//! Filter and exclude constraint declarations.
//!
//! A [`FilterConstraint`] binds a dependent field's query to either a
//! sibling form field's current value or a constant. Constraints are
//! declared once when a field or view is constructed and validated there:
//! an unknown lookup name is an [`ImproperlyConfigured`] error, never a
//! per-request failure.
//!
//! At request time a `FieldBound` constraint is resolved against the
//! sibling value the browser widget sent along; a `Constant` constraint
//! needs nothing from the request.
//!
//! [`ImproperlyConfigured`]: tomselect_rs_core::error::TomSelectError::ImproperlyConfigured
//!
//! # Examples
//!
//! ```
//! use tomselect_rs_query::constraint::FilterConstraint;
//! use tomselect_rs_query::value::Value;
//!
//! // Restrict edition options to the magazine chosen in the sibling
//! // "magazine" form field.
//! let chained = FilterConstraint::bound("magazine", "magazine_id", "exact").unwrap();
//! assert!(chained.is_field_bound());
//!
//! // Always restrict to active rows.
//! let fixed = FilterConstraint::constant("status", "iexact", Value::from("active")).unwrap();
//! assert!(!fixed.is_field_bound());
//! ```

use tomselect_rs_core::error::TomSelectResult;

use crate::lookups::LookupKind;
use crate::value::Value;

/// Where a constraint's comparison value comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// The current value of a sibling form field, sent with each request.
    FieldBound {
        /// The sibling form field's name.
        sibling: String,
    },
    /// A fixed value baked in at construction.
    Constant(Value),
}

/// A declared filter or exclude constraint.
///
/// Multiple filter constraints AND together; exclude constraints subtract.
/// The asymmetry between the two lives in the pipeline: a `FieldBound`
/// *filter* with no sibling value fails closed (empty page), while a
/// `FieldBound` *exclude* with no sibling value is skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConstraint {
    /// The record field the lookup reads.
    pub target_field: String,
    /// The comparison to apply.
    pub lookup: LookupKind,
    /// Where the comparison value comes from.
    pub binding: Binding,
}

impl FilterConstraint {
    /// Declares a constraint bound to a sibling form field's value.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unknown lookup name.
    pub fn bound(
        sibling: impl Into<String>,
        target_field: impl Into<String>,
        lookup_name: &str,
    ) -> TomSelectResult<Self> {
        Ok(Self {
            target_field: target_field.into(),
            lookup: LookupKind::parse(lookup_name)?,
            binding: Binding::FieldBound {
                sibling: sibling.into(),
            },
        })
    }

    /// Declares a constraint with a fixed value.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unknown lookup name.
    pub fn constant(
        target_field: impl Into<String>,
        lookup_name: &str,
        value: Value,
    ) -> TomSelectResult<Self> {
        Ok(Self {
            target_field: target_field.into(),
            lookup: LookupKind::parse(lookup_name)?,
            binding: Binding::Constant(value),
        })
    }

    /// Returns `true` if this constraint is bound to a sibling field.
    pub const fn is_field_bound(&self) -> bool {
        matches!(self.binding, Binding::FieldBound { .. })
    }

    /// Returns the wire spelling of this constraint's target, e.g.
    /// `"magazine_id__exact"`.
    pub fn wire_name(&self) -> String {
        format!("{}__{}", self.target_field, self.lookup.name())
    }
}
