//! The query resolution pipeline.
//!
//! [`QueryPipeline`] turns a base collection of records plus an
//! [`AutocompleteRequest`] into a [`ResultPage`]. The steps run in a fixed
//! order, and the order is part of the contract:
//!
//! 1. Pre-filter hook
//! 2. Filter constraints (AND; a field-bound filter with no sibling value
//!    fails closed to an empty page)
//! 3. Exclude constraints (set difference; a field-bound exclude with no
//!    sibling value is skipped)
//! 4. Search (OR of the configured per-field lookups; empty term is a no-op)
//! 5. Ordering (stable, so ties keep the source's natural order)
//! 6. Pagination (`has_more` via a one-extra-record probe)
//! 7. Post-filter hook
//!
//! The pipeline owns no state between calls; it is a pure function of its
//! configuration and inputs.

use tracing::debug;

use crate::constraint::{Binding, FilterConstraint};
use crate::lookups::{LookupKind, Q};
use crate::page::ResultPage;
use crate::record::Record;
use crate::request::AutocompleteRequest;
use crate::value::Value;

/// A caller-supplied record transform, run before filtering or after
/// pagination.
pub type RecordHook = Box<dyn Fn(Vec<Record>) -> Vec<Record> + Send + Sync>;

/// One field the search step matches the term against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchField {
    /// The record field to search.
    pub field: String,
    /// The lookup to apply; `icontains` unless configured otherwise.
    pub lookup: LookupKind,
}

impl SearchField {
    /// A case-insensitive substring search on the given field.
    pub fn icontains(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            lookup: LookupKind::IContains,
        }
    }

    /// A search on the given field with an explicit lookup.
    pub fn with_lookup(field: impl Into<String>, lookup: LookupKind) -> Self {
        Self {
            field: field.into(),
            lookup,
        }
    }
}

/// One ordering criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// The record field to order by.
    pub field: String,
    /// Whether to sort descending.
    pub descending: bool,
}

impl OrderBy {
    /// Ascending order on the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    /// Descending order on the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }
}

/// The configured query pipeline for one autocomplete view.
///
/// # Examples
///
/// ```
/// use tomselect_rs_query::pipeline::{QueryPipeline, SearchField};
/// use tomselect_rs_query::record::Record;
/// use tomselect_rs_query::request::AutocompleteRequest;
///
/// let pipeline = QueryPipeline::new(10).search_field(SearchField::icontains("title"));
/// let records = vec![Record::new().with("id", 1_i64).with("title", "Art History")];
/// let page = pipeline.resolve(records, &AutocompleteRequest::new("art"));
/// assert_eq!(page.len(), 1);
/// assert!(!page.has_more);
/// ```
pub struct QueryPipeline {
    filter_by: Vec<FilterConstraint>,
    exclude_by: Vec<FilterConstraint>,
    search_fields: Vec<SearchField>,
    ordering: Vec<OrderBy>,
    page_size: u64,
    pre_hook: Option<RecordHook>,
    post_hook: Option<RecordHook>,
}

impl QueryPipeline {
    /// Creates a pipeline with the given default page size.
    pub fn new(page_size: u64) -> Self {
        Self {
            filter_by: Vec::new(),
            exclude_by: Vec::new(),
            search_fields: Vec::new(),
            ordering: Vec::new(),
            page_size: page_size.max(1),
            pre_hook: None,
            post_hook: None,
        }
    }

    /// Adds a declared filter constraint.
    #[must_use]
    pub fn filter_by(mut self, constraint: FilterConstraint) -> Self {
        self.filter_by.push(constraint);
        self
    }

    /// Adds a declared exclude constraint.
    #[must_use]
    pub fn exclude_by(mut self, constraint: FilterConstraint) -> Self {
        self.exclude_by.push(constraint);
        self
    }

    /// Adds a search field.
    #[must_use]
    pub fn search_field(mut self, field: SearchField) -> Self {
        self.search_fields.push(field);
        self
    }

    /// Adds an ordering criterion.
    #[must_use]
    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.ordering.push(order);
        self
    }

    /// Sets the pre-filter hook, applied to the base collection before any
    /// constraint.
    #[must_use]
    pub fn pre_hook(mut self, hook: RecordHook) -> Self {
        self.pre_hook = Some(hook);
        self
    }

    /// Sets the post-filter hook, applied to the final page's records.
    #[must_use]
    pub fn post_hook(mut self, hook: RecordHook) -> Self {
        self.post_hook = Some(hook);
        self
    }

    /// Returns the declared filter constraints.
    pub fn filters(&self) -> &[FilterConstraint] {
        &self.filter_by
    }

    /// Returns the declared exclude constraints.
    pub fn excludes(&self) -> &[FilterConstraint] {
        &self.exclude_by
    }

    /// Resolves a request against a base collection.
    pub fn resolve(&self, records: Vec<Record>, request: &AutocompleteRequest) -> ResultPage {
        let page_number = request.page.max(1);

        // 1. Pre-filter hook.
        let mut records = match &self.pre_hook {
            Some(hook) => hook(records),
            None => records,
        };

        // 2. Filter constraints, ANDed. A field-bound filter without a
        // sibling value fails closed: the dependent field's options are
        // defined only in terms of the parent's value.
        let mut filter_q = Q::And(Vec::new());
        for constraint in &self.filter_by {
            match self.constraint_value(constraint, request, true) {
                ConstraintValue::Value(value) => {
                    filter_q = filter_q
                        & Q::filter(constraint.target_field.clone(), constraint.lookup, value);
                }
                ConstraintValue::Missing => {
                    debug!(
                        target_field = %constraint.target_field,
                        "field-bound filter has no sibling value, returning empty page"
                    );
                    return ResultPage::empty(page_number);
                }
                ConstraintValue::Skip => unreachable!("filters never skip"),
            }
        }
        records.retain(|record| filter_q.evaluate(record));

        // 3. Exclude constraints, subtracted one at a time. A field-bound
        // exclude without a sibling value has nothing to exclude by and is
        // skipped.
        for constraint in &self.exclude_by {
            match self.constraint_value(constraint, request, false) {
                ConstraintValue::Value(value) => {
                    let q =
                        Q::filter(constraint.target_field.clone(), constraint.lookup, value);
                    records.retain(|record| !q.evaluate(record));
                }
                ConstraintValue::Skip => {
                    debug!(
                        target_field = %constraint.target_field,
                        "field-bound exclude has no sibling value, skipping"
                    );
                }
                ConstraintValue::Missing => unreachable!("excludes never fail closed"),
            }
        }

        // 4. Search.
        if !request.term.is_empty() && !self.search_fields.is_empty() {
            let search_q = Q::Or(
                self.search_fields
                    .iter()
                    .map(|sf| {
                        Q::filter(
                            sf.field.clone(),
                            sf.lookup,
                            Value::from(request.term.clone()),
                        )
                    })
                    .collect(),
            );
            records.retain(|record| search_q.evaluate(record));
        }

        // 5. Ordering. The sort is stable, so records that compare equal on
        // every criterion keep the source's natural order.
        if !self.ordering.is_empty() {
            records.sort_by(|a, b| {
                for order in &self.ordering {
                    let ordering = a
                        .get(&order.field)
                        .compare(b.get(&order.field))
                        .unwrap_or(std::cmp::Ordering::Equal);
                    let ordering = if order.descending {
                        ordering.reverse()
                    } else {
                        ordering
                    };
                    if ordering != std::cmp::Ordering::Equal {
                        return ordering;
                    }
                }
                std::cmp::Ordering::Equal
            });
        }

        // 6. Pagination: slice page_size records, probe one past the slice
        // for has_more.
        let page_size = request.page_size.unwrap_or(self.page_size).max(1) as usize;
        let start = (page_number as usize - 1).saturating_mul(page_size);
        let has_more = records.len() > start + page_size;
        let mut page_records: Vec<Record> = if start >= records.len() {
            Vec::new()
        } else {
            records[start..(start + page_size).min(records.len())].to_vec()
        };

        // 7. Post-filter hook.
        if let Some(hook) = &self.post_hook {
            page_records = hook(page_records);
        }

        ResultPage::new(page_records, page_number, has_more)
    }

    fn constraint_value(
        &self,
        constraint: &FilterConstraint,
        request: &AutocompleteRequest,
        is_filter: bool,
    ) -> ConstraintValue {
        match &constraint.binding {
            Binding::Constant(value) => ConstraintValue::Value(value.clone()),
            Binding::FieldBound { .. } => {
                let applied = if is_filter {
                    request.filter_value(&constraint.target_field, constraint.lookup)
                } else {
                    request.exclude_value(&constraint.target_field, constraint.lookup)
                };
                match applied {
                    Some(value) if !value.is_empty() => {
                        ConstraintValue::Value(Value::from(value))
                    }
                    _ if is_filter => ConstraintValue::Missing,
                    _ => ConstraintValue::Skip,
                }
            }
        }
    }
}

enum ConstraintValue {
    Value(Value),
    Missing,
    Skip,
}
