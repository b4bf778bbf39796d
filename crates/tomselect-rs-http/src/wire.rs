//! Parsing the autocomplete wire request.
//!
//! The widget issues GET requests with these query parameters:
//!
//! | Param | Meaning |
//! |---|---|
//! | `q` | The search term |
//! | `f` | A filter constraint, `field__lookup=value`, repeatable |
//! | `e` | An exclude constraint, same shape, repeatable |
//! | `p` | The 1-based page number |
//!
//! A constraint without a `__lookup` suffix means `exact`. A malformed
//! constraint (unknown lookup name, empty field) is dropped with a warning
//! rather than failing the request: the widget may race its own state while
//! the user is typing, and one bad parameter must not blank the dropdown.

use tracing::warn;

use tomselect_rs_query::lookups::LookupKind;
use tomselect_rs_query::request::{AppliedConstraint, AutocompleteRequest};

use crate::params::QueryParams;

/// The search term parameter.
pub const PARAM_TERM: &str = "q";
/// The filter constraint parameter.
pub const PARAM_FILTER: &str = "f";
/// The exclude constraint parameter.
pub const PARAM_EXCLUDE: &str = "e";
/// The page number parameter.
pub const PARAM_PAGE: &str = "p";

/// Parses an [`AutocompleteRequest`] from a raw query string.
///
/// Never fails: malformed constraints are dropped, an unparseable page
/// number falls back to 1.
///
/// # Examples
///
/// ```
/// use tomselect_rs_http::wire::parse_request;
///
/// let request = parse_request("q=art&f=magazine_id__exact%3D7&p=2");
/// assert_eq!(request.term, "art");
/// assert_eq!(request.page, 2);
/// assert_eq!(request.filters.len(), 1);
/// ```
pub fn parse_request(query_string: &str) -> AutocompleteRequest {
    let params = QueryParams::parse(query_string);

    let term = params.get(PARAM_TERM).unwrap_or_default().to_string();
    let page = params
        .get(PARAM_PAGE)
        .and_then(|p| p.parse::<u64>().ok())
        .filter(|&p| p >= 1)
        .unwrap_or(1);

    let mut request = AutocompleteRequest::new(term).page(page);
    for raw in params.get_all(PARAM_FILTER) {
        if let Some(constraint) = parse_constraint(raw) {
            request.filters.push(constraint);
        }
    }
    for raw in params.get_all(PARAM_EXCLUDE) {
        if let Some(constraint) = parse_constraint(raw) {
            request.excludes.push(constraint);
        }
    }
    request
}

/// Parses one `field__lookup=value` constraint parameter.
///
/// Returns `None` for malformed input, logging why. The value may be empty;
/// an empty value is how the widget reports an unset parent field.
pub fn parse_constraint(raw: &str) -> Option<AppliedConstraint> {
    let (spec, value) = raw
        .find('=')
        .map_or((raw, ""), |eq| (&raw[..eq], &raw[eq + 1..]));

    if spec.is_empty() {
        warn!(raw, "dropping constraint parameter with empty field spec");
        return None;
    }

    let (field, lookup) = match spec.rfind("__") {
        Some(split) => {
            let (field, suffix) = (&spec[..split], &spec[split + 2..]);
            match LookupKind::parse(suffix) {
                Ok(lookup) if !field.is_empty() => (field, lookup),
                _ => {
                    warn!(raw, "dropping constraint parameter with unknown lookup");
                    return None;
                }
            }
        }
        None => (spec, LookupKind::Exact),
    };

    Some(AppliedConstraint::new(field, lookup, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_request() {
        let request = parse_request(
            "q=art&f=magazine_id__exact%3D7&f=status%3Dactive&e=id__in%3D1%2C2&p=3",
        );
        assert_eq!(request.term, "art");
        assert_eq!(request.page, 3);
        assert_eq!(request.filters.len(), 2);
        assert_eq!(request.excludes.len(), 1);

        assert_eq!(request.filters[0].field, "magazine_id");
        assert_eq!(request.filters[0].lookup, LookupKind::Exact);
        assert_eq!(request.filters[0].value, "7");

        assert_eq!(request.filters[1].field, "status");
        assert_eq!(request.filters[1].lookup, LookupKind::Exact);

        assert_eq!(request.excludes[0].lookup, LookupKind::In);
        assert_eq!(request.excludes[0].value, "1,2");
    }

    #[test]
    fn test_parse_empty_query_string() {
        let request = parse_request("");
        assert!(request.term.is_empty());
        assert_eq!(request.page, 1);
        assert!(request.filters.is_empty());
        assert!(request.excludes.is_empty());
    }

    #[test]
    fn test_page_defaults() {
        assert_eq!(parse_request("p=0").page, 1);
        assert_eq!(parse_request("p=abc").page, 1);
        assert_eq!(parse_request("p=-3").page, 1);
        assert_eq!(parse_request("p=7").page, 7);
    }

    #[test]
    fn test_constraint_without_lookup_is_exact() {
        let constraint = parse_constraint("magazine_id=7").unwrap();
        assert_eq!(constraint.field, "magazine_id");
        assert_eq!(constraint.lookup, LookupKind::Exact);
        assert_eq!(constraint.value, "7");
    }

    #[test]
    fn test_constraint_with_explicit_lookup() {
        let constraint = parse_constraint("title__icontains=war").unwrap();
        assert_eq!(constraint.field, "title");
        assert_eq!(constraint.lookup, LookupKind::IContains);
        assert_eq!(constraint.value, "war");
    }

    #[test]
    fn test_constraint_empty_value_kept() {
        // An unset parent field arrives as an empty value; the pipeline
        // decides what that means, not the parser.
        let constraint = parse_constraint("magazine_id__exact=").unwrap();
        assert_eq!(constraint.value, "");
    }

    #[test]
    fn test_constraint_field_with_inner_double_underscore() {
        // Only the trailing segment is a lookup; inner segments belong to
        // the flattened field key.
        let constraint = parse_constraint("author__name__icontains=tim").unwrap();
        assert_eq!(constraint.field, "author__name");
        assert_eq!(constraint.lookup, LookupKind::IContains);
    }

    #[test]
    fn test_malformed_constraints_dropped() {
        assert!(parse_constraint("").is_none());
        assert!(parse_constraint("=7").is_none());
        assert!(parse_constraint("magazine_id__eq=7").is_none());
        assert!(parse_constraint("__exact=7").is_none());
    }

    #[test]
    fn test_malformed_constraint_does_not_fail_request() {
        let request = parse_request("q=art&f=bad__eq%3D1&f=magazine_id%3D7");
        assert_eq!(request.filters.len(), 1);
        assert_eq!(request.filters[0].field, "magazine_id");
    }

    #[test]
    fn test_value_containing_equals_sign() {
        let constraint = parse_constraint("note__contains=a=b").unwrap();
        assert_eq!(constraint.value, "a=b");
    }
}
