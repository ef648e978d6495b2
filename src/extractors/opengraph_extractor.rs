//! OpenGraph meta tags extraction
//!
//! Looks up og: and product: prefixed `<meta property>` tags and Twitter
//! Card `<meta name>` tags.

use scraper::Html;

use super::css_extractor::extract_css_first_attr;

/// Selector for `<meta property="...">`
pub fn meta_property_selector(property: &str) -> String {
    format!(r#"meta[property="{}"]"#, property)
}

/// Selector for `<meta name="...">`
pub fn meta_name_selector(name: &str) -> String {
    format!(r#"meta[name="{}"]"#, name)
}

/// `content` of the first `<meta property="...">` tag
///
/// Covers the `og:*` and `product:*` namespaces, e.g. `og:title` or
/// `product:price:amount`.
pub fn extract_meta_property(document: &Html, property: &str) -> Option<String> {
    extract_css_first_attr(document, &meta_property_selector(property), "content")
}

/// `content` of the first `<meta name="...">` tag (Twitter Card, description, ...)
pub fn extract_meta_name(document: &Html, name: &str) -> Option<String> {
    extract_css_first_attr(document, &meta_name_selector(name), "content")
}
