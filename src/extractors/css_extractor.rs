//! CSS selector-based extraction
//!
//! Uses the scraper crate to select elements by CSS selectors. All lookups
//! run against an already parsed document and inspect the first match only.

use scraper::{ElementRef, Html, Selector};

/// First element matching a CSS selector
pub fn select_first<'a>(document: &'a Html, selector_str: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector_str).ok()?;

    document.select(&selector).next()
}

/// Text of the first element matched by a compiled selector
pub fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>())
}

/// Attribute of the first element matched by a compiled selector
pub fn first_attr(document: &Html, selector: &Selector, attr_name: &str) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr_name).map(String::from))
}

/// Extract first matching element's text
pub fn extract_css_first_text(document: &Html, selector_str: &str) -> Option<String> {
    select_first(document, selector_str).map(|el| el.text().collect::<String>())
}

/// Extract first matching element's attribute
pub fn extract_css_first_attr(
    document: &Html,
    selector_str: &str,
    attr_name: &str,
) -> Option<String> {
    select_first(document, selector_str)
        .and_then(|el| el.value().attr(attr_name).map(String::from))
}

/// Selector for elements whose `class` attribute contains `needle`.
///
/// Plain substring match, case-sensitive: "price" matches `item-price`,
/// `price-box` and `was-price` alike.
pub fn class_contains_selector(needle: &str) -> String {
    format!(r#"[class*="{}"]"#, needle)
}

/// Text of the first element whose `class` attribute contains `needle`
pub fn extract_class_contains_text(document: &Html, needle: &str) -> Option<String> {
    extract_css_first_text(document, &class_contains_selector(needle))
}
