//! Logging integration for the tomselect-rs toolkit.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-request
//! spans around autocomplete handling.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The log level filter is read from `settings.log_level`. In debug mode a
/// pretty, human-readable format is used; otherwise structured JSON.
///
/// Installing a second subscriber is a no-op rather than a panic so tests
/// can call this freely.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for one autocomplete request.
///
/// Attach this span around request handling so every log entry emitted
/// while resolving the query carries the view identity.
///
/// # Examples
///
/// ```
/// use tomselect_rs_core::logging::autocomplete_span;
///
/// let span = autocomplete_span("autocomplete-author");
/// let _guard = span.enter();
/// tracing::debug!("resolving request");
/// ```
pub fn autocomplete_span(view_id: &str) -> tracing::Span {
    tracing::info_span!("autocomplete", view = view_id)
}
