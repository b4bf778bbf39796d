//! Library demo: three autocomplete endpoints and a form page.
//!
//! Run with `cargo run -p library-demo`, then:
//!
//! ```text
//! curl 'http://127.0.0.1:8000/autocomplete-magazine/?q=art'
//! curl 'http://127.0.0.1:8000/autocomplete-edition/?q=art&f=magazine_id__exact%3D1'
//! curl -X POST -d 'create=New Author' 'http://127.0.0.1:8000/autocomplete-author/'
//! ```
//!
//! The edition endpoint is chained: its options are scoped to the magazine
//! chosen in the sibling `magazine` field, so an unset magazine yields an
//! empty dropdown.

mod data;

use std::sync::Arc;

use tomselect_rs_auth::{PermissionCache, PermissionPolicy};
use tomselect_rs_core::logging::setup_logging;
use tomselect_rs_core::Settings;
use tomselect_rs_forms::{SelectForm, TomSelectField, TomSelectMultipleField};
use tomselect_rs_forms::widgets::{TomSelectMultipleWidget, TomSelectWidget};
use tomselect_rs_query::{
    FilterConstraint, OrderBy, QueryPipeline, ResultFormatter, SearchField,
};
use tomselect_rs_views::{router, AutocompleteView};

fn demo_form() -> SelectForm {
    let magazine_field = TomSelectField::new(
        "magazine",
        Arc::new(data::magazines()),
        TomSelectWidget::new("/autocomplete-magazine/", "id", "name"),
    )
    .expect("magazine field config")
    .with_label("Magazine");

    let edition_field = TomSelectField::new(
        "edition",
        Arc::new(data::editions()),
        TomSelectWidget::new("/autocomplete-edition/", "id", "name").filter_by(
            FilterConstraint::bound("magazine", "magazine_id", "exact")
                .expect("edition filter config"),
        ),
    )
    .expect("edition field config")
    .with_label("Edition");

    let author_field = TomSelectMultipleField::new(
        "authors",
        Arc::new(data::authors()),
        TomSelectMultipleWidget::new("/autocomplete-author/", "id", "name"),
    )
    .expect("author field config")
    .with_label("Authors")
    .with_required(false);

    SelectForm::new(vec![
        Box::new(magazine_field),
        Box::new(edition_field),
        Box::new(author_field),
    ])
}

async fn form_page() -> axum::response::Html<String> {
    let form = demo_form();
    axum::response::Html(format!(
        "<!doctype html><html><head>{media}</head><body><form>{form}</form></body></html>",
        media = form.media().render(),
        form = form.render(),
    ))
}

async fn glue_js() -> impl axum::response::IntoResponse {
    (
        [("content-type", "application/javascript")],
        tomselect_rs_forms::GLUE_SOURCE,
    )
}

#[tokio::main]
async fn main() {
    let settings = Settings::default().with_env_overrides();
    setup_logging(&settings);

    let cache = Arc::new(if settings.permission_cache_enabled {
        PermissionCache::new()
    } else {
        PermissionCache::disabled()
    });

    let magazines = AutocompleteView::new(
        "autocomplete-magazine",
        Arc::new(data::magazines()),
        Arc::clone(&cache),
    )
    .pipeline(
        QueryPipeline::new(settings.default_page_size)
            .search_field(SearchField::icontains("name"))
            .order_by(OrderBy::asc("name")),
    )
    .formatter(ResultFormatter::new("id", "name"))
    .policy(PermissionPolicy::anonymous());

    let editions = AutocompleteView::new(
        "autocomplete-edition",
        Arc::new(data::editions()),
        Arc::clone(&cache),
    )
    .pipeline(
        QueryPipeline::new(settings.default_page_size)
            .search_field(SearchField::icontains("name"))
            .filter_by(
                FilterConstraint::bound("magazine", "magazine_id", "exact")
                    .expect("edition filter config"),
            )
            .order_by(OrderBy::asc("name")),
    )
    .formatter(ResultFormatter::new("id", "name").extra_field("year"))
    .policy(PermissionPolicy::anonymous());

    let authors = AutocompleteView::new(
        "autocomplete-author",
        Arc::new(data::authors()),
        cache,
    )
    .pipeline(QueryPipeline::new(settings.default_page_size).search_field(SearchField::icontains("name")))
    .formatter(ResultFormatter::new("id", "name"))
    .policy(PermissionPolicy::anonymous())
    .enable_create();

    let app = router(vec![
        Arc::new(magazines),
        Arc::new(editions),
        Arc::new(authors),
    ])
    .route("/", axum::routing::get(form_page))
    .route(
        "/static/tomselect/tomselect.js",
        axum::routing::get(glue_js),
    );

    let addr = "127.0.0.1:8000";
    tracing::info!(%addr, "library demo listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("bind demo address");
    axum::serve(listener, app).await.expect("serve demo");
}
