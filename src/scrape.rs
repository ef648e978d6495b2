//! URL to product metadata: fetch, check, parse, extract.

use std::time::Instant;

use crate::config::Config;
use crate::error::{ExtractError, ParseError};
use crate::extractors::{extract_from_html, ExtractionResult};
use crate::fetch::{is_markup, HttpClient};

/// Stateless product page extractor.
///
/// Cloning is cheap; clones share the underlying connection pool. Calls to
/// [`Extractor::extract`] are independent and may run concurrently.
#[derive(Debug, Clone)]
pub struct Extractor {
    http: HttpClient,
}

impl Extractor {
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    /// Fetch `url` and extract its title, image and price.
    ///
    /// Missing fields are `None` in the result. Fetch and parse failures are
    /// errors and produce no result. Dropping the future cancels the request.
    pub async fn extract(&self, url: &str) -> Result<ExtractionResult, ExtractError> {
        let started = Instant::now();
        tracing::debug!(url, "fetching product page");

        let page = self.http.get(url).await?;
        tracing::debug!(
            url,
            final_url = %page.final_url,
            status = page.status,
            bytes = page.body.len(),
            "fetched product page"
        );

        if !is_markup(page.content_type.as_deref()) {
            return Err(ParseError {
                url: url.to_string(),
                content_type: page.content_type.unwrap_or_default(),
            }
            .into());
        }

        // The parsed document is not Send; it must not live across an await.
        let result = extract_from_html(url, &page.body);

        tracing::info!(
            url,
            title = result.title.is_some(),
            image = result.image.is_some(),
            price = result.price.is_some(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "extracted product metadata"
        );

        Ok(result)
    }
}
