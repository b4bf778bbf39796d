//! The autocomplete endpoint.
//!
//! [`AutocompleteView`] ties the layers together: it owns a data source, a
//! query pipeline, a result formatter, and a permission policy, and
//! answers the widget's requests. `GET` resolves a search; `POST` creates
//! a new option when the view enables creation; anything else is a 405.
//!
//! Views dispatch through the [`View`] trait so hosts can mount them
//! behind any router and tests can drive them without a server.

use std::sync::Arc;

use async_trait::async_trait;
use http::{Method, StatusCode};
use tracing::debug;

use tomselect_rs_auth::cache::{PermissionCache, PermissionPolicy};
use tomselect_rs_auth::user::RequestUser;
use tomselect_rs_core::error::TomSelectError;
use tomselect_rs_core::logging::autocomplete_span;
use tomselect_rs_http::response::{AutocompleteResponse, ErrorResponse};
use tomselect_rs_http::wire::parse_request;
use tomselect_rs_http::QueryParams;
use tomselect_rs_query::format::ResultFormatter;
use tomselect_rs_query::pipeline::QueryPipeline;
use tomselect_rs_query::source::DataSource;

/// The view's input: method, raw query string, form body, and the caller
/// the host resolved.
#[derive(Debug, Clone)]
pub struct ViewRequest {
    /// The HTTP method.
    pub method: Method,
    /// The raw query string, without the leading `?`.
    pub query_string: String,
    /// The form-encoded request body (POST only).
    pub body: String,
    /// The requesting user.
    pub user: RequestUser,
}

impl ViewRequest {
    /// A GET request for the given query string.
    pub fn get(query_string: impl Into<String>, user: RequestUser) -> Self {
        Self {
            method: Method::GET,
            query_string: query_string.into(),
            body: String::new(),
            user,
        }
    }

    /// A POST request with a form-encoded body.
    pub fn post(body: impl Into<String>, user: RequestUser) -> Self {
        Self {
            method: Method::POST,
            query_string: String::new(),
            body: body.into(),
            user,
        }
    }
}

/// The view's output: a status code and a JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The JSON body.
    pub body: serde_json::Value,
}

impl ViewResponse {
    fn ok(body: &AutocompleteResponse) -> Self {
        Self {
            status: StatusCode::OK,
            body: serde_json::to_value(body).unwrap_or_default(),
        }
    }

    fn error(err: &TomSelectError) -> Self {
        let (status, body) = ErrorResponse::from_error(err);
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body: serde_json::to_value(body).unwrap_or_default(),
        }
    }
}

/// HTTP method dispatch for autocomplete-style endpoints.
///
/// Default handlers answer 405; implementors override the methods they
/// support.
#[async_trait]
pub trait View: Send + Sync {
    /// Dispatches to the handler for the request's method.
    async fn dispatch(&self, request: ViewRequest) -> ViewResponse {
        match request.method {
            Method::GET | Method::HEAD => self.get(request).await,
            Method::POST => self.post(request).await,
            _ => self.http_method_not_allowed(&request),
        }
    }

    /// Handles GET requests. Returns 405 by default.
    async fn get(&self, request: ViewRequest) -> ViewResponse {
        self.http_method_not_allowed(&request)
    }

    /// Handles POST requests. Returns 405 by default.
    async fn post(&self, request: ViewRequest) -> ViewResponse {
        self.http_method_not_allowed(&request)
    }

    /// The 405 response.
    fn http_method_not_allowed(&self, request: &ViewRequest) -> ViewResponse {
        ViewResponse::error(&TomSelectError::MethodNotAllowed(
            request.method.to_string(),
        ))
    }
}

/// A configured autocomplete endpoint.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tomselect_rs_auth::{PermissionCache, PermissionPolicy};
/// use tomselect_rs_query::{MemorySource, QueryPipeline, Record, ResultFormatter, SearchField};
/// use tomselect_rs_views::autocomplete::AutocompleteView;
///
/// let source = Arc::new(MemorySource::new(vec![
///     Record::new().with("id", 1_i64).with("title", "Art History"),
/// ]));
/// let view = AutocompleteView::new("autocomplete-book", source, Arc::new(PermissionCache::new()))
///     .pipeline(QueryPipeline::new(20).search_field(SearchField::icontains("title")))
///     .formatter(ResultFormatter::new("id", "title"))
///     .policy(PermissionPolicy::anonymous());
/// ```
pub struct AutocompleteView {
    view_id: String,
    source: Arc<dyn DataSource>,
    pipeline: QueryPipeline,
    formatter: ResultFormatter,
    policy: PermissionPolicy,
    cache: Arc<PermissionCache>,
    create_enabled: bool,
}

impl AutocompleteView {
    /// Creates a view with a default pipeline and an `id`/`name` formatter.
    pub fn new(
        view_id: impl Into<String>,
        source: Arc<dyn DataSource>,
        cache: Arc<PermissionCache>,
    ) -> Self {
        Self {
            view_id: view_id.into(),
            source,
            pipeline: QueryPipeline::new(20),
            formatter: ResultFormatter::new("id", "name"),
            policy: PermissionPolicy::default(),
            cache,
            create_enabled: false,
        }
    }

    /// Sets the query pipeline.
    #[must_use]
    pub fn pipeline(mut self, pipeline: QueryPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Sets the result formatter.
    #[must_use]
    pub fn formatter(mut self, formatter: ResultFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Sets the permission policy.
    #[must_use]
    pub fn policy(mut self, policy: PermissionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enables the POST create flow.
    #[must_use]
    pub const fn enable_create(mut self) -> Self {
        self.create_enabled = true;
        self
    }

    /// Returns the view's identity, used in URLs and cache keys.
    pub fn view_id(&self) -> &str {
        &self.view_id
    }

    fn check_permission(&self, user: &RequestUser, action: &str) -> Result<(), TomSelectError> {
        if self.cache.check(user, &self.view_id, action, &self.policy) {
            Ok(())
        } else {
            Err(TomSelectError::PermissionDenied(self.view_id.clone()))
        }
    }
}

#[async_trait]
impl View for AutocompleteView {
    async fn get(&self, request: ViewRequest) -> ViewResponse {
        let span = autocomplete_span(&self.view_id);
        let _guard = span.enter();

        if let Err(err) = self.check_permission(&request.user, "view") {
            return ViewResponse::error(&err);
        }

        let parsed = parse_request(&request.query_string);
        debug!(term = %parsed.term, page = parsed.page, "resolving autocomplete request");

        let page = self.pipeline.resolve(self.source.load(), &parsed);
        ViewResponse::ok(&AutocompleteResponse::from_page(&page, &self.formatter))
    }

    async fn post(&self, request: ViewRequest) -> ViewResponse {
        let span = autocomplete_span(&self.view_id);
        let _guard = span.enter();

        if !self.create_enabled {
            return self.http_method_not_allowed(&request);
        }
        if let Err(err) = self.check_permission(&request.user, "create") {
            return ViewResponse::error(&err);
        }

        let form = QueryParams::parse(&request.body);
        let label = form.get("create").unwrap_or_default();
        match self.source.create_option(label) {
            Ok(record) => {
                debug!(label, "created option");
                ViewResponse::ok(&AutocompleteResponse::created(
                    self.formatter.format_one(&record),
                ))
            }
            Err(err) => ViewResponse::error(&err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tomselect_rs_query::pipeline::SearchField;
    use tomselect_rs_query::record::Record;
    use tomselect_rs_query::source::MemorySource;

    fn books() -> Arc<MemorySource> {
        Arc::new(MemorySource::new(
            (1..=25_i64)
                .map(|i| {
                    Record::new().with("id", i).with(
                        "title",
                        if i <= 12 { format!("Art {i}") } else { format!("Other {i}") },
                    )
                })
                .collect(),
        ))
    }

    fn view() -> AutocompleteView {
        AutocompleteView::new("autocomplete-book", books(), Arc::new(PermissionCache::new()))
            .pipeline(QueryPipeline::new(10).search_field(SearchField::icontains("title")))
            .formatter(ResultFormatter::new("id", "title"))
            .policy(PermissionPolicy::anonymous())
    }

    #[tokio::test]
    async fn test_get_searches_and_paginates() {
        let response = view()
            .dispatch(ViewRequest::get("q=art", RequestUser::anonymous()))
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["results"].as_array().unwrap().len(), 10);
        assert_eq!(response.body["has_more"], serde_json::json!(true));
        assert_eq!(response.body["next_page"], serde_json::json!(2));
    }

    #[tokio::test]
    async fn test_get_second_page() {
        let response = view()
            .dispatch(ViewRequest::get("q=art&p=2", RequestUser::anonymous()))
            .await;
        assert_eq!(response.body["results"].as_array().unwrap().len(), 2);
        assert_eq!(response.body["has_more"], serde_json::json!(false));
        assert_eq!(response.body["next_page"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_permission_denied_leaks_nothing() {
        let denied = AutocompleteView::new(
            "autocomplete-book",
            books(),
            Arc::new(PermissionCache::new()),
        )
        .policy(PermissionPolicy::require(["library.view_book"]));

        let response = denied
            .dispatch(ViewRequest::get("q=art", RequestUser::anonymous()))
            .await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert!(response.body.get("results").is_none());
    }

    #[tokio::test]
    async fn test_permitted_user_passes() {
        let guarded = AutocompleteView::new(
            "autocomplete-book",
            books(),
            Arc::new(PermissionCache::new()),
        )
        .pipeline(QueryPipeline::new(10).search_field(SearchField::icontains("title")))
        .formatter(ResultFormatter::new("id", "title"))
        .policy(PermissionPolicy::require(["library.view_book"]));

        let reader = RequestUser::new(1, "alice").with_permissions(["library.view_book"]);
        let response = guarded.dispatch(ViewRequest::get("q=art", reader)).await;
        assert_eq!(response.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unsupported_method_is_405() {
        let mut request = ViewRequest::get("", RequestUser::anonymous());
        request.method = Method::DELETE;
        let response = view().dispatch(request).await;
        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_post_without_create_is_405() {
        let response = view()
            .dispatch(ViewRequest::post("create=Poetry", RequestUser::anonymous()))
            .await;
        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_post_creates_option() {
        let source = Arc::new(
            MemorySource::new(vec![Record::new().with("id", 1_i64).with("name", "Fiction")])
                .with_create("id", "name"),
        );
        let creating = AutocompleteView::new(
            "autocomplete-genre",
            source,
            Arc::new(PermissionCache::new()),
        )
        .policy(PermissionPolicy::anonymous())
        .enable_create();

        let response = creating
            .dispatch(ViewRequest::post("create=Poetry", RequestUser::anonymous()))
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["results"][0]["name"], serde_json::json!("Poetry"));
        assert_eq!(response.body["results"][0]["id"], serde_json::json!(2));
    }

    #[tokio::test]
    async fn test_post_empty_label_is_400() {
        let source = Arc::new(MemorySource::new(vec![]).with_create("id", "name"));
        let creating = AutocompleteView::new(
            "autocomplete-genre",
            source,
            Arc::new(PermissionCache::new()),
        )
        .policy(PermissionPolicy::anonymous())
        .enable_create();

        let response = creating
            .dispatch(ViewRequest::post("create=", RequestUser::anonymous()))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_denied_then_invalidated_then_allowed() {
        let cache = Arc::new(PermissionCache::new());
        let guarded = AutocompleteView::new("autocomplete-book", books(), Arc::clone(&cache))
            .policy(PermissionPolicy::require(["library.view_book"]));

        let mut alice = RequestUser::new(1, "alice");
        let response = guarded
            .dispatch(ViewRequest::get("", alice.clone()))
            .await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);

        // The host grants the permission and invalidates; the next check
        // re-evaluates.
        alice.permissions.insert("library.view_book".to_string());
        let still_denied = guarded
            .dispatch(ViewRequest::get("", alice.clone()))
            .await;
        assert_eq!(still_denied.status, StatusCode::FORBIDDEN);

        cache.invalidate_user(1);
        let allowed = guarded.dispatch(ViewRequest::get("", alice)).await;
        assert_eq!(allowed.status, StatusCode::OK);
    }
}
