//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;
use std::sync::LazyLock;

use regex::Regex;

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new("<[^>]*>").unwrap()
});

fn strip_tags(text: &str) -> String {
    HTML_TAG.replace_all(text, "").into_owned()
}

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Strips HTML tags from text.
///
/// Recipe summaries and instructions arrive from the API with embedded
/// markup; this renders them as plain text.
///
/// Usage in templates: `{{ recipe.summary|strip_html }}`
#[askama::filter_fn]
pub fn strip_html(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(strip_tags(&value.to_string()))
}
