//! Microdata (schema.org HTML attributes) extraction
//!
//! Reference: https://html.spec.whatwg.org/multipage/microdata.html

use scraper::Html;

use super::css_extractor::extract_css_first_attr;

/// Selector for elements carrying `itemprop="..."`
pub fn itemprop_selector(prop: &str) -> String {
    format!(r#"[itemprop="{}"]"#, prop)
}

/// `content` attribute of the first element carrying `itemprop="..."`
///
/// Product pages usually mark the machine-readable amount this way, e.g.
/// `<meta itemprop="price" content="19.99">` or
/// `<span itemprop="price" content="19.99">$19.99</span>`. Only the first
/// element with the property is consulted, and its text is not used.
pub fn extract_itemprop_content(document: &Html, prop: &str) -> Option<String> {
    extract_css_first_attr(document, &itemprop_selector(prop), "content")
}
