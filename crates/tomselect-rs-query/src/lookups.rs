//! Field lookups and composable `Q` filters, evaluated against records.
//!
//! A [`LookupKind`] names a comparison (`exact`, `icontains`, `gte`, ...)
//! the way the wire protocol spells it. The [`Q`] enum combines field
//! lookups with AND, OR, and NOT operators and evaluates directly against
//! a [`Record`] — the query layer filters materialized rows in process
//! rather than compiling to a backend query language.
//!
//! # Examples
//!
//! ```
//! use tomselect_rs_query::lookups::{LookupKind, Q};
//! use tomselect_rs_query::record::Record;
//! use tomselect_rs_query::value::Value;
//!
//! let record = Record::new().with("title", "The Art of War").with("pages", 68_i64);
//!
//! let q = Q::filter("title", LookupKind::IContains, Value::from("art"))
//!     & Q::filter("pages", LookupKind::Lt, Value::from(100_i64));
//! assert!(q.evaluate(&record));
//!
//! let either = Q::filter("pages", LookupKind::Gt, Value::from(500_i64))
//!     | Q::filter("title", LookupKind::StartsWith, Value::from("The"));
//! assert!(either.evaluate(&record));
//! ```

use std::collections::HashMap;
use std::ops;

use once_cell::sync::Lazy;
use tomselect_rs_core::error::{TomSelectError, TomSelectResult};

use crate::record::Record;
use crate::value::Value;

/// A field-level comparison, named the way the wire protocol spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    /// Equality with type coercion (`field = value`).
    Exact,
    /// Case-insensitive equality.
    IExact,
    /// Substring match.
    Contains,
    /// Case-insensitive substring match.
    IContains,
    /// Membership in a comma-separated or list value.
    In,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Prefix match.
    StartsWith,
    /// Case-insensitive prefix match.
    IStartsWith,
    /// Suffix match.
    EndsWith,
    /// Case-insensitive suffix match.
    IEndsWith,
    /// Null test; the value is a boolean.
    IsNull,
    /// Regular expression match.
    Regex,
}

static LOOKUP_NAMES: Lazy<HashMap<&'static str, LookupKind>> = Lazy::new(|| {
    HashMap::from([
        ("exact", LookupKind::Exact),
        ("iexact", LookupKind::IExact),
        ("contains", LookupKind::Contains),
        ("icontains", LookupKind::IContains),
        ("in", LookupKind::In),
        ("gt", LookupKind::Gt),
        ("gte", LookupKind::Gte),
        ("lt", LookupKind::Lt),
        ("lte", LookupKind::Lte),
        ("startswith", LookupKind::StartsWith),
        ("istartswith", LookupKind::IStartsWith),
        ("endswith", LookupKind::EndsWith),
        ("iendswith", LookupKind::IEndsWith),
        ("isnull", LookupKind::IsNull),
        ("regex", LookupKind::Regex),
    ])
});

impl LookupKind {
    /// Parses a lookup from its wire name.
    ///
    /// # Errors
    ///
    /// Returns [`TomSelectError::ImproperlyConfigured`]: an unknown lookup
    /// name is a developer mistake surfaced at construction time.
    pub fn parse(name: &str) -> TomSelectResult<Self> {
        LOOKUP_NAMES.get(name).copied().ok_or_else(|| {
            TomSelectError::ImproperlyConfigured(format!("unknown lookup '{name}'"))
        })
    }

    /// Returns `true` if `name` is a valid lookup name.
    pub fn is_valid_name(name: &str) -> bool {
        LOOKUP_NAMES.contains_key(name)
    }

    /// Returns the wire name for this lookup.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::IExact => "iexact",
            Self::Contains => "contains",
            Self::IContains => "icontains",
            Self::In => "in",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::StartsWith => "startswith",
            Self::IStartsWith => "istartswith",
            Self::EndsWith => "endswith",
            Self::IEndsWith => "iendswith",
            Self::IsNull => "isnull",
            Self::Regex => "regex",
        }
    }

    /// Evaluates this lookup: does `actual` match `expected`?
    ///
    /// Substring lookups operate on the record value's text rendering.
    /// A `Null` actual value only matches `isnull=true`; every other
    /// lookup treats it as a non-match.
    pub fn matches(self, actual: &Value, expected: &Value) -> bool {
        if let Self::IsNull = self {
            let want_null = match expected {
                Value::Bool(b) => *b,
                Value::String(s) => matches!(s.as_str(), "true" | "1" | "True"),
                _ => false,
            };
            return actual.is_null() == want_null;
        }

        if actual.is_null() {
            return false;
        }

        match self {
            Self::Exact => actual.loosely_equals(expected),
            Self::IExact => actual.as_text().to_lowercase() == expected.as_text().to_lowercase(),
            Self::Contains => actual.as_text().contains(&expected.as_text()),
            Self::IContains => actual
                .as_text()
                .to_lowercase()
                .contains(&expected.as_text().to_lowercase()),
            Self::In => match expected {
                Value::List(vals) => vals.iter().any(|v| actual.loosely_equals(v)),
                Value::String(s) => s
                    .split(',')
                    .any(|part| actual.loosely_equals(&Value::from(part.trim()))),
                other => actual.loosely_equals(other),
            },
            Self::Gt => actual.compare(expected) == Some(std::cmp::Ordering::Greater),
            Self::Gte => matches!(
                actual.compare(expected),
                Some(std::cmp::Ordering::Greater | std::cmp::Ordering::Equal)
            ),
            Self::Lt => actual.compare(expected) == Some(std::cmp::Ordering::Less),
            Self::Lte => matches!(
                actual.compare(expected),
                Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal)
            ),
            Self::StartsWith => actual.as_text().starts_with(&expected.as_text()),
            Self::IStartsWith => actual
                .as_text()
                .to_lowercase()
                .starts_with(&expected.as_text().to_lowercase()),
            Self::EndsWith => actual.as_text().ends_with(&expected.as_text()),
            Self::IEndsWith => actual
                .as_text()
                .to_lowercase()
                .ends_with(&expected.as_text().to_lowercase()),
            Self::Regex => match regex::Regex::new(&expected.as_text()) {
                Ok(re) => re.is_match(&actual.as_text()),
                Err(err) => {
                    tracing::debug!(pattern = %expected, %err, "invalid regex in lookup, treating as non-match");
                    false
                }
            },
            Self::IsNull => unreachable!("handled above"),
        }
    }
}

/// A composable record filter.
///
/// `Q` values combine with `&` (AND), `|` (OR), and `!` (NOT) and flatten
/// nested combinations of the same operator. An empty `And` matches
/// everything; an empty `Or` matches nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Q {
    /// A single field lookup.
    Filter {
        /// The record field the lookup reads.
        field: String,
        /// The comparison to apply.
        lookup: LookupKind,
        /// The value to compare against.
        value: Value,
    },
    /// Logical AND of multiple conditions.
    And(Vec<Q>),
    /// Logical OR of multiple conditions.
    Or(Vec<Q>),
    /// Logical negation of a condition.
    Not(Box<Q>),
}

impl Q {
    /// Creates a single-lookup filter.
    pub fn filter(field: impl Into<String>, lookup: LookupKind, value: Value) -> Self {
        Self::Filter {
            field: field.into(),
            lookup,
            value,
        }
    }

    /// Returns `true` if this is an empty AND or OR.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::And(children) | Self::Or(children) => children.is_empty(),
            _ => false,
        }
    }

    /// Evaluates this filter against a record.
    pub fn evaluate(&self, record: &Record) -> bool {
        match self {
            Self::Filter {
                field,
                lookup,
                value,
            } => lookup.matches(record.get(field), value),
            Self::And(children) => children.iter().all(|q| q.evaluate(record)),
            Self::Or(children) => children.iter().any(|q| q.evaluate(record)),
            Self::Not(inner) => !inner.evaluate(record),
        }
    }
}

impl ops::BitAnd for Q {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            // Flatten nested ANDs
            (Self::And(mut left), Self::And(right)) => {
                left.extend(right);
                Self::And(left)
            }
            (Self::And(mut left), other) => {
                left.push(other);
                Self::And(left)
            }
            (other, Self::And(mut right)) => {
                right.insert(0, other);
                Self::And(right)
            }
            (left, right) => Self::And(vec![left, right]),
        }
    }
}

impl ops::BitOr for Q {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            // Flatten nested ORs
            (Self::Or(mut left), Self::Or(right)) => {
                left.extend(right);
                Self::Or(left)
            }
            (Self::Or(mut left), other) => {
                left.push(other);
                Self::Or(left)
            }
            (other, Self::Or(mut right)) => {
                right.insert(0, other);
                Self::Or(right)
            }
            (left, right) => Self::Or(vec![left, right]),
        }
    }
}

impl ops::Not for Q {
    type Output = Self;

    fn not(self) -> Self::Output {
        // Double negation cancellation
        match self {
            Self::Not(inner) => *inner,
            other => Self::Not(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> Record {
        Record::new()
            .with("id", 7_i64)
            .with("title", "The Art of War")
            .with("pages", 68_i64)
            .with("magazine_id", Value::Null)
    }

    // ── Lookup name parsing ─────────────────────────────────────────

    #[test]
    fn test_parse_known_lookups() {
        assert_eq!(LookupKind::parse("exact").unwrap(), LookupKind::Exact);
        assert_eq!(
            LookupKind::parse("icontains").unwrap(),
            LookupKind::IContains
        );
        assert_eq!(LookupKind::parse("isnull").unwrap(), LookupKind::IsNull);
    }

    #[test]
    fn test_parse_unknown_lookup_is_config_error() {
        let err = LookupKind::parse("iconteins").unwrap_err();
        assert!(matches!(err, TomSelectError::ImproperlyConfigured(_)));
    }

    #[test]
    fn test_name_roundtrip() {
        for name in [
            "exact",
            "iexact",
            "contains",
            "icontains",
            "in",
            "gt",
            "gte",
            "lt",
            "lte",
            "startswith",
            "istartswith",
            "endswith",
            "iendswith",
            "isnull",
            "regex",
        ] {
            assert_eq!(LookupKind::parse(name).unwrap().name(), name);
        }
    }

    // ── Lookup evaluation ───────────────────────────────────────────

    #[test]
    fn test_exact_with_coercion() {
        assert!(LookupKind::Exact.matches(&Value::Int(7), &Value::from("7")));
        assert!(!LookupKind::Exact.matches(&Value::Int(7), &Value::from("8")));
    }

    #[test]
    fn test_iexact() {
        assert!(LookupKind::IExact.matches(&Value::from("Dune"), &Value::from("dune")));
        assert!(!LookupKind::IExact.matches(&Value::from("Dune"), &Value::from("dun")));
    }

    #[test]
    fn test_contains_case_sensitivity() {
        let title = Value::from("The Art of War");
        assert!(LookupKind::Contains.matches(&title, &Value::from("Art")));
        assert!(!LookupKind::Contains.matches(&title, &Value::from("art")));
        assert!(LookupKind::IContains.matches(&title, &Value::from("art")));
    }

    #[test]
    fn test_contains_on_non_string_uses_text() {
        assert!(LookupKind::Contains.matches(&Value::Int(1234), &Value::from("23")));
    }

    #[test]
    fn test_in_comma_separated() {
        assert!(LookupKind::In.matches(&Value::Int(2), &Value::from("1, 2, 3")));
        assert!(!LookupKind::In.matches(&Value::Int(4), &Value::from("1, 2, 3")));
    }

    #[test]
    fn test_in_list_value() {
        let expected = Value::List(vec![Value::Int(1), Value::Int(2)]);
        assert!(LookupKind::In.matches(&Value::Int(2), &expected));
        assert!(!LookupKind::In.matches(&Value::Int(3), &expected));
    }

    #[test]
    fn test_range_comparisons() {
        assert!(LookupKind::Gt.matches(&Value::Int(10), &Value::from("9")));
        assert!(LookupKind::Gte.matches(&Value::Int(10), &Value::from("10")));
        assert!(LookupKind::Lt.matches(&Value::Int(10), &Value::from("11")));
        assert!(LookupKind::Lte.matches(&Value::Int(10), &Value::from("10")));
        assert!(!LookupKind::Gt.matches(&Value::Int(10), &Value::from("10")));
    }

    #[test]
    fn test_startswith_endswith() {
        let title = Value::from("The Art of War");
        assert!(LookupKind::StartsWith.matches(&title, &Value::from("The")));
        assert!(LookupKind::IStartsWith.matches(&title, &Value::from("the")));
        assert!(LookupKind::EndsWith.matches(&title, &Value::from("War")));
        assert!(LookupKind::IEndsWith.matches(&title, &Value::from("war")));
        assert!(!LookupKind::StartsWith.matches(&title, &Value::from("Art")));
    }

    #[test]
    fn test_isnull() {
        assert!(LookupKind::IsNull.matches(&Value::Null, &Value::Bool(true)));
        assert!(LookupKind::IsNull.matches(&Value::Null, &Value::from("true")));
        assert!(!LookupKind::IsNull.matches(&Value::Int(1), &Value::Bool(true)));
        assert!(LookupKind::IsNull.matches(&Value::Int(1), &Value::Bool(false)));
        assert!(!LookupKind::IsNull.matches(&Value::Null, &Value::from("false")));
    }

    #[test]
    fn test_regex() {
        assert!(LookupKind::Regex.matches(&Value::from("War and Peace"), &Value::from("^War")));
        assert!(!LookupKind::Regex.matches(&Value::from("War and Peace"), &Value::from("^Peace")));
        // Invalid pattern is a non-match, not a panic.
        assert!(!LookupKind::Regex.matches(&Value::from("x"), &Value::from("(")));
    }

    #[test]
    fn test_null_actual_never_matches_value_lookups() {
        for kind in [
            LookupKind::Exact,
            LookupKind::IContains,
            LookupKind::Gt,
            LookupKind::In,
        ] {
            assert!(!kind.matches(&Value::Null, &Value::from("anything")));
        }
    }

    // ── Q combinators ───────────────────────────────────────────────

    #[test]
    fn test_q_filter_evaluate() {
        let q = Q::filter("title", LookupKind::IContains, Value::from("art"));
        assert!(q.evaluate(&book()));
        let q = Q::filter("title", LookupKind::IContains, Value::from("peace"));
        assert!(!q.evaluate(&book()));
    }

    #[test]
    fn test_q_and() {
        let q = Q::filter("pages", LookupKind::Gt, Value::from(50_i64))
            & Q::filter("pages", LookupKind::Lt, Value::from(100_i64));
        match &q {
            Q::And(children) => assert_eq!(children.len(), 2),
            _ => panic!("Expected And"),
        }
        assert!(q.evaluate(&book()));
    }

    #[test]
    fn test_q_or() {
        let q = Q::filter("id", LookupKind::Exact, Value::from(99_i64))
            | Q::filter("id", LookupKind::Exact, Value::from(7_i64));
        assert!(q.evaluate(&book()));
    }

    #[test]
    fn test_q_not() {
        let q = !Q::filter("id", LookupKind::Exact, Value::from(7_i64));
        assert!(!q.evaluate(&book()));
    }

    #[test]
    fn test_q_double_negation() {
        let q = Q::filter("id", LookupKind::Exact, Value::from(7_i64));
        assert_eq!(!!q.clone(), q);
    }

    #[test]
    fn test_q_and_flattening() {
        let a = Q::filter("a", LookupKind::Exact, Value::Int(1));
        let b = Q::filter("b", LookupKind::Exact, Value::Int(2));
        let c = Q::filter("c", LookupKind::Exact, Value::Int(3));
        match (a & b) & c {
            Q::And(children) => assert_eq!(children.len(), 3),
            _ => panic!("Expected And with 3 children"),
        }
    }

    #[test]
    fn test_q_or_flattening() {
        let a = Q::filter("a", LookupKind::Exact, Value::Int(1));
        let b = Q::filter("b", LookupKind::Exact, Value::Int(2));
        let c = Q::filter("c", LookupKind::Exact, Value::Int(3));
        match (a | b) | c {
            Q::Or(children) => assert_eq!(children.len(), 3),
            _ => panic!("Expected Or with 3 children"),
        }
    }

    #[test]
    fn test_empty_and_matches_everything() {
        assert!(Q::And(vec![]).evaluate(&book()));
        assert!(Q::And(vec![]).is_empty());
    }

    #[test]
    fn test_empty_or_matches_nothing() {
        assert!(!Q::Or(vec![]).evaluate(&book()));
        assert!(Q::Or(vec![]).is_empty());
    }

    #[test]
    fn test_q_against_null_field() {
        let q = Q::filter("magazine_id", LookupKind::IsNull, Value::Bool(true));
        assert!(q.evaluate(&book()));
        let q = Q::filter("magazine_id", LookupKind::Exact, Value::from("1"));
        assert!(!q.evaluate(&book()));
    }
}
