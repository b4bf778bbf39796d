//! The parsed autocomplete request.
//!
//! [`AutocompleteRequest`] is the immutable, per-request input to the query
//! pipeline: the search term, the applied filter and exclude constraints
//! the browser widget sent, and the page cursor. The HTTP layer builds it
//! from the query string; tests build it directly.

use crate::lookups::LookupKind;

/// One constraint as it arrived on the wire: a target field, a lookup, and
/// the raw value (possibly empty when the bound sibling field is unset).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedConstraint {
    /// The record field the constraint targets.
    pub field: String,
    /// The comparison the constraint applies.
    pub lookup: LookupKind,
    /// The raw value string from the wire.
    pub value: String,
}

impl AppliedConstraint {
    /// Creates an applied constraint.
    pub fn new(field: impl Into<String>, lookup: LookupKind, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            lookup,
            value: value.into(),
        }
    }
}

/// An immutable autocomplete request.
///
/// # Examples
///
/// ```
/// use tomselect_rs_query::request::AutocompleteRequest;
///
/// let request = AutocompleteRequest::new("art").page(2);
/// assert_eq!(request.term, "art");
/// assert_eq!(request.page, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AutocompleteRequest {
    /// The search term; empty means no search narrowing.
    pub term: String,
    /// Applied filter constraints, in wire order.
    pub filters: Vec<AppliedConstraint>,
    /// Applied exclude constraints, in wire order.
    pub excludes: Vec<AppliedConstraint>,
    /// 1-based page number.
    pub page: u64,
    /// Per-request page size override, if the view allows one.
    pub page_size: Option<u64>,
}

impl AutocompleteRequest {
    /// Creates a request for the given search term, starting at page 1.
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            filters: Vec::new(),
            excludes: Vec::new(),
            page: 1,
            page_size: None,
        }
    }

    /// Sets the page number.
    #[must_use]
    pub const fn page(mut self, page: u64) -> Self {
        self.page = page;
        self
    }

    /// Adds an applied filter constraint.
    #[must_use]
    pub fn filter(mut self, constraint: AppliedConstraint) -> Self {
        self.filters.push(constraint);
        self
    }

    /// Adds an applied exclude constraint.
    #[must_use]
    pub fn exclude(mut self, constraint: AppliedConstraint) -> Self {
        self.excludes.push(constraint);
        self
    }

    /// Finds the applied filter value for a declared constraint target.
    pub fn filter_value(&self, field: &str, lookup: LookupKind) -> Option<&str> {
        self.filters
            .iter()
            .find(|c| c.field == field && c.lookup == lookup)
            .map(|c| c.value.as_str())
    }

    /// Finds the applied exclude value for a declared constraint target.
    pub fn exclude_value(&self, field: &str, lookup: LookupKind) -> Option<&str> {
        self.excludes
            .iter()
            .find(|c| c.field == field && c.lookup == lookup)
            .map(|c| c.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let request = AutocompleteRequest::new("art")
            .page(3)
            .filter(AppliedConstraint::new(
                "magazine_id",
                LookupKind::Exact,
                "42",
            ))
            .exclude(AppliedConstraint::new("id", LookupKind::Exact, "7"));
        assert_eq!(request.term, "art");
        assert_eq!(request.page, 3);
        assert_eq!(request.filters.len(), 1);
        assert_eq!(request.excludes.len(), 1);
    }

    #[test]
    fn test_filter_value_lookup() {
        let request = AutocompleteRequest::new("").filter(AppliedConstraint::new(
            "magazine_id",
            LookupKind::Exact,
            "42",
        ));
        assert_eq!(
            request.filter_value("magazine_id", LookupKind::Exact),
            Some("42")
        );
        assert_eq!(request.filter_value("magazine_id", LookupKind::Gt), None);
        assert_eq!(request.filter_value("author_id", LookupKind::Exact), None);
    }

    #[test]
    fn test_exclude_value_lookup() {
        let request = AutocompleteRequest::new("")
            .exclude(AppliedConstraint::new("id", LookupKind::Exact, "7"));
        assert_eq!(request.exclude_value("id", LookupKind::Exact), Some("7"));
        assert_eq!(request.exclude_value("id", LookupKind::In), None);
    }

    #[test]
    fn test_default_is_page_one_empty_term() {
        let request = AutocompleteRequest::new("");
        assert_eq!(request.page, 1);
        assert!(request.term.is_empty());
        assert!(request.page_size.is_none());
    }
}
