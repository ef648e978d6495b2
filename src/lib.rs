//! Product page metadata extraction
//!
//! Fetches a product page and extracts its title, image and price from:
//! - OpenGraph, product and Twitter Card meta tags
//! - Microdata (schema.org `itemprop`)
//! - CSS heuristics (`<title>`, class names containing "price")
//!
//! Exposed as a library ([`Extractor`]) and as an HTTP service ([`server`]).

pub mod config;
pub mod error;
pub mod extractors;
pub mod fetch;
pub mod scrape;
pub mod server;

pub use config::Config;
pub use error::{ExtractError, FetchError, FetchErrorKind, ParseError};
pub use extractors::{extract_from_html, ExtractionRequest, ExtractionResult};
pub use scrape::Extractor;
