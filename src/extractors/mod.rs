//! Product metadata extraction
//!
//! Each field is resolved independently through an ordered chain of
//! [`Candidate`] lookups. The first candidate yielding a non-empty trimmed
//! string wins; when none does, the field is absent.

mod css_extractor;
mod microdata_extractor;
mod opengraph_extractor;

pub use css_extractor::*;
pub use microdata_extractor::*;
pub use opengraph_extractor::*;

use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

/// Request body accepted by the scrape endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRequest {
    /// Absolute product page URL. Missing deserializes as empty.
    #[serde(default)]
    pub url: String,
}

impl ExtractionRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// The URL exactly as sent, or `None` when empty or blank
    ///
    /// Surrounding whitespace is kept: the fetch tolerates it and the
    /// result echoes the request unchanged.
    pub fn url(&self) -> Option<&str> {
        (!self.url.trim().is_empty()).then_some(self.url.as_str())
    }
}

/// Metadata extracted from one product page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// The URL exactly as requested
    pub url: String,
    pub title: Option<String>,
    pub image: Option<String>,
    /// Raw price text, no currency parsing
    pub price: Option<String>,
}

/// One place a field value may be found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    /// `content` of `<meta property="...">`
    MetaProperty(&'static str),
    /// `content` of `<meta name="...">`
    MetaName(&'static str),
    /// `content` attribute of the first `[itemprop="..."]` element
    ItemProp(&'static str),
    /// Text of the first element matching a CSS selector
    Text(&'static str),
    /// Text of the first element whose class contains the substring
    ClassContains(&'static str),
}

impl Candidate {
    /// Raw, untrimmed value of this candidate in `document`
    pub fn lookup(&self, document: &Html) -> Option<String> {
        match *self {
            Candidate::MetaProperty(property) => extract_meta_property(document, property),
            Candidate::MetaName(name) => extract_meta_name(document, name),
            Candidate::ItemProp(prop) => extract_itemprop_content(document, prop),
            Candidate::Text(selector) => extract_css_first_text(document, selector),
            Candidate::ClassContains(needle) => extract_class_contains_text(document, needle),
        }
    }

    /// CSS selector this candidate matches on
    pub fn selector(&self) -> String {
        match *self {
            Candidate::MetaProperty(property) => meta_property_selector(property),
            Candidate::MetaName(name) => meta_name_selector(name),
            Candidate::ItemProp(prop) => itemprop_selector(prop),
            Candidate::Text(selector) => selector.to_string(),
            Candidate::ClassContains(needle) => class_contains_selector(needle),
        }
    }

    /// Parse the selector once, for repeated lookups
    pub fn compile(&self) -> Option<CompiledCandidate> {
        let read = match self {
            Candidate::MetaProperty(_) | Candidate::MetaName(_) | Candidate::ItemProp(_) => {
                Read::Content
            }
            Candidate::Text(_) | Candidate::ClassContains(_) => Read::Text,
        };
        let selector = Selector::parse(&self.selector()).ok()?;

        Some(CompiledCandidate { selector, read })
    }
}

/// What a compiled candidate reads from its first match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Read {
    Content,
    Text,
}

/// A [`Candidate`] with its selector already parsed
#[derive(Debug, Clone)]
pub struct CompiledCandidate {
    selector: Selector,
    read: Read,
}

impl CompiledCandidate {
    /// Raw, untrimmed value in `document`; same result as [`Candidate::lookup`]
    pub fn lookup(&self, document: &Html) -> Option<String> {
        match self.read {
            Read::Content => first_attr(document, &self.selector, "content"),
            Read::Text => first_text(document, &self.selector),
        }
    }
}

pub const TITLE_CANDIDATES: &[Candidate] =
    &[Candidate::MetaProperty("og:title"), Candidate::Text("title")];

pub const IMAGE_CANDIDATES: &[Candidate] = &[
    Candidate::MetaProperty("og:image"),
    Candidate::MetaName("twitter:image"),
];

// Class substring match is the least reliable signal and must stay last.
pub const PRICE_CANDIDATES: &[Candidate] = &[
    Candidate::MetaProperty("product:price:amount"),
    Candidate::ItemProp("price"),
    Candidate::ClassContains("price"),
];

static TITLE_CHAIN: LazyLock<Vec<CompiledCandidate>> =
    LazyLock::new(|| compile_chain(TITLE_CANDIDATES));
static IMAGE_CHAIN: LazyLock<Vec<CompiledCandidate>> =
    LazyLock::new(|| compile_chain(IMAGE_CANDIDATES));
static PRICE_CHAIN: LazyLock<Vec<CompiledCandidate>> =
    LazyLock::new(|| compile_chain(PRICE_CANDIDATES));

/// Compile a chain, keeping its order
pub fn compile_chain(candidates: &[Candidate]) -> Vec<CompiledCandidate> {
    candidates.iter().filter_map(Candidate::compile).collect()
}

/// First non-blank value produced by `candidates`, trimmed
pub fn resolve(document: &Html, candidates: &[Candidate]) -> Option<String> {
    candidates
        .iter()
        .find_map(|candidate| candidate.lookup(document).and_then(normalize))
}

/// [`resolve`] over a precompiled chain
pub fn resolve_compiled(document: &Html, chain: &[CompiledCandidate]) -> Option<String> {
    chain
        .iter()
        .find_map(|candidate| candidate.lookup(document).and_then(normalize))
}

fn normalize(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse HTML leniently; broken markup is repaired the way browsers do
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

/// Run every field chain against a parsed document
pub fn extract_fields(url: &str, document: &Html) -> ExtractionResult {
    ExtractionResult {
        url: url.to_string(),
        title: resolve_compiled(document, &TITLE_CHAIN),
        image: resolve_compiled(document, &IMAGE_CHAIN),
        price: resolve_compiled(document, &PRICE_CHAIN),
    }
}

/// Parse `html` and extract product metadata from it
pub fn extract_from_html(url: &str, html: &str) -> ExtractionResult {
    let document = parse_document(html);
    extract_fields(url, &document)
}
