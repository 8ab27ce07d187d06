//! Utility functions and helpers.

pub mod http;
pub mod table;

use url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Remove non-breaking spaces used as thousands separators.
pub fn strip_nbsp(text: &str) -> String {
    text.replace('\u{a0}', "")
}
