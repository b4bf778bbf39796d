//! The autocomplete JSON response types.
//!
//! The widget consumes one JSON object per request:
//!
//! ```json
//! { "results": [ { "id": 1, "title": "..." } ], "has_more": true, "next_page": 2 }
//! ```
//!
//! Errors serialize to `{ "error": "..." }` with the status code carried
//! out of band by the HTTP layer.

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use tomselect_rs_core::error::TomSelectError;
use tomselect_rs_query::format::ResultFormatter;
use tomselect_rs_query::page::ResultPage;

/// A successful autocomplete response body.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AutocompleteResponse {
    /// The formatted result rows.
    pub results: Vec<Map<String, JsonValue>>,
    /// Whether another page exists.
    pub has_more: bool,
    /// The next page number, `null` on the last page.
    pub next_page: Option<u64>,
}

impl AutocompleteResponse {
    /// Builds a response body from a result page and a formatter.
    pub fn from_page(page: &ResultPage, formatter: &ResultFormatter) -> Self {
        Self {
            results: formatter.format(&page.records),
            has_more: page.has_more,
            next_page: page.next_page(),
        }
    }

    /// Builds a response body carrying a single created option.
    pub fn created(row: Map<String, JsonValue>) -> Self {
        Self {
            results: vec![row],
            has_more: false,
            next_page: None,
        }
    }
}

/// An error response body.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// A short human-readable message. Permission failures deliberately
    /// carry no detail about what exists.
    pub error: String,
}

impl ErrorResponse {
    /// Builds an error body and its status code from a toolkit error.
    pub fn from_error(err: &TomSelectError) -> (u16, Self) {
        let message = match err {
            TomSelectError::PermissionDenied(_) => "permission denied".to_string(),
            other => other.to_string(),
        };
        (err.status_code(), Self { error: message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tomselect_rs_query::record::Record;

    fn page() -> ResultPage {
        ResultPage::new(
            vec![
                Record::new().with("id", 1_i64).with("title", "Art History"),
                Record::new().with("id", 2_i64).with("title", "Modern Art"),
            ],
            1,
            true,
        )
    }

    #[test]
    fn test_from_page() {
        let response =
            AutocompleteResponse::from_page(&page(), &ResultFormatter::new("id", "title"));
        assert_eq!(response.results.len(), 2);
        assert!(response.has_more);
        assert_eq!(response.next_page, Some(2));
    }

    #[test]
    fn test_serializes_with_null_next_page() {
        let last = ResultPage::new(vec![], 3, false);
        let response =
            AutocompleteResponse::from_page(&last, &ResultFormatter::new("id", "title"));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["has_more"], serde_json::json!(false));
        assert_eq!(json["next_page"], serde_json::Value::Null);
        assert_eq!(json["results"], serde_json::json!([]));
    }

    #[test]
    fn test_wire_shape() {
        let response =
            AutocompleteResponse::from_page(&page(), &ResultFormatter::new("id", "title"));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["results"][0]["id"], serde_json::json!(1));
        assert_eq!(json["results"][0]["title"], serde_json::json!("Art History"));
        assert_eq!(json["next_page"], serde_json::json!(2));
    }

    #[test]
    fn test_created_response() {
        let mut row = Map::new();
        row.insert("id".to_string(), serde_json::json!(9));
        row.insert("name".to_string(), serde_json::json!("Poetry"));
        let response = AutocompleteResponse::created(row);
        assert_eq!(response.results.len(), 1);
        assert!(!response.has_more);
    }

    #[test]
    fn test_permission_denied_body_carries_no_detail() {
        let err = TomSelectError::PermissionDenied("autocomplete-book for user 7".to_string());
        let (status, body) = ErrorResponse::from_error(&err);
        assert_eq!(status, 403);
        assert_eq!(body.error, "permission denied");
        assert!(!body.error.contains("user 7"));
    }

    #[test]
    fn test_bad_request_body() {
        let err = TomSelectError::BadRequest("unparseable".to_string());
        let (status, body) = ErrorResponse::from_error(&err);
        assert_eq!(status, 400);
        assert!(body.error.contains("unparseable"));
    }
}
