//! Axum router glue.
//!
//! Mounts each [`AutocompleteView`] at `/<view_id>/` and adapts the axum
//! request into a [`ViewRequest`]. The host authenticates the caller and
//! injects a [`RequestUser`] extension; requests without one run as the
//! anonymous user.

use std::sync::Arc;

use axum::extract::{Extension, RawQuery, State};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use http::Method;
use tower_http::trace::TraceLayer;

use tomselect_rs_auth::user::RequestUser;

use crate::autocomplete::{AutocompleteView, View, ViewRequest, ViewResponse};

impl IntoResponse for ViewResponse {
    fn into_response(self) -> Response {
        (self.status, axum::Json(self.body)).into_response()
    }
}

/// Builds a router serving the given views, each at `/<view_id>/`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tomselect_rs_auth::PermissionCache;
/// use tomselect_rs_query::MemorySource;
/// use tomselect_rs_views::autocomplete::AutocompleteView;
/// use tomselect_rs_views::routes::router;
///
/// let view = AutocompleteView::new(
///     "autocomplete-book",
///     Arc::new(MemorySource::new(vec![])),
///     Arc::new(PermissionCache::new()),
/// );
/// let app = router(vec![Arc::new(view)]);
/// # let _ = app;
/// ```
pub fn router(views: Vec<Arc<AutocompleteView>>) -> Router {
    let mut router = Router::new();
    for view in views {
        let path = format!("/{}/", view.view_id());
        router = router.route(&path, any(handle).with_state(view));
    }
    router.layer(TraceLayer::new_for_http())
}

async fn handle(
    State(view): State<Arc<AutocompleteView>>,
    method: Method,
    RawQuery(query): RawQuery,
    user: Option<Extension<RequestUser>>,
    body: String,
) -> ViewResponse {
    let request = ViewRequest {
        method,
        query_string: query.unwrap_or_default(),
        body,
        user: user.map_or_else(RequestUser::anonymous, |Extension(u)| u),
    };
    view.dispatch(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tomselect_rs_query::MemorySource;

    use tomselect_rs_auth::PermissionCache;

    #[test]
    fn test_router_builds_with_multiple_views() {
        let cache = Arc::new(PermissionCache::new());
        let app = router(vec![
            Arc::new(AutocompleteView::new(
                "autocomplete-book",
                Arc::new(MemorySource::new(vec![])),
                Arc::clone(&cache),
            )),
            Arc::new(AutocompleteView::new(
                "autocomplete-author",
                Arc::new(MemorySource::new(vec![])),
                cache,
            )),
        ]);
        let _ = app;
    }
}
