//! Extraction orchestration: build URL → fetch → parse → fallback.

use std::sync::Arc;

use rand::Rng;
use tracing::{info, warn};
use url::Url;

use crate::config::ExtractorConfig;
use crate::error::FetchError;
use crate::extractors::MarkupExtractor;
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::lead::Lead;
use crate::synthetic;

/// Why the live path produced nothing.
#[derive(Debug)]
enum LiveFailure {
    Fetch(FetchError),
    NoListings,
}

/// Entry point for lead extraction.
///
/// Callers always receive a lead set: when the live page cannot be fetched or
/// contains no recognizable listings, synthetic leads are returned instead.
pub struct LeadExtractor {
    config: ExtractorConfig,
    fetcher: Arc<dyn PageFetcher>,
    extractor: MarkupExtractor,
}

impl LeadExtractor {
    /// Live extractor over HTTP with the default strategy chain.
    pub fn new(config: ExtractorConfig) -> Self {
        let fetcher = Arc::new(HttpFetcher::new(&config));
        Self::with_fetcher(config, fetcher)
    }

    /// Extractor over an injected fetch capability.
    pub fn with_fetcher(config: ExtractorConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            config,
            fetcher,
            extractor: MarkupExtractor::default(),
        }
    }

    /// Replace the strategy chain.
    pub fn with_extractor(mut self, extractor: MarkupExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Leads for `category` in `location`. Never fails; never empty unless
    /// the fallback is disabled in the configuration.
    pub async fn extract_leads(&self, category: &str, location: &str) -> Vec<Lead> {
        match self.extract_live(category, location).await {
            Ok(leads) => leads,
            Err(failure) => self.fallback(category, location, failure, || {
                synthetic::generate(category, location)
            }),
        }
    }

    /// Like [`extract_leads`](Self::extract_leads) with the fallback drawing
    /// from `rng`.
    pub async fn extract_leads_with<R: Rng + Send + ?Sized>(
        &self,
        category: &str,
        location: &str,
        rng: &mut R,
    ) -> Vec<Lead> {
        match self.extract_live(category, location).await {
            Ok(leads) => leads,
            Err(failure) => self.fallback(category, location, failure, || {
                synthetic::generate_with(category, location, rng)
            }),
        }
    }

    /// Listing URL `<base>/<location-slug>/<category-slug>`.
    pub fn listing_url(&self, category: &str, location: &str) -> Result<Url, FetchError> {
        listing_url(&self.config.base_url, category, location)
    }

    async fn extract_live(&self, category: &str, location: &str) -> Result<Vec<Lead>, LiveFailure> {
        let url = self
            .listing_url(category, location)
            .map_err(LiveFailure::Fetch)?;
        info!(category = %category, location = %location, url = %url, "Fetching listing page");

        let markup = self
            .fetcher
            .fetch(url.as_str())
            .await
            .map_err(LiveFailure::Fetch)?;

        let leads = self.extractor.extract(&markup, location, category);
        if leads.is_empty() {
            return Err(LiveFailure::NoListings);
        }
        info!(count = leads.len(), "Live extraction succeeded");
        Ok(leads)
    }

    fn fallback(
        &self,
        category: &str,
        location: &str,
        failure: LiveFailure,
        generate: impl FnOnce() -> Vec<Lead>,
    ) -> Vec<Lead> {
        match &failure {
            LiveFailure::Fetch(e) => {
                warn!(category = %category, location = %location, error = %e, "Listing fetch failed")
            }
            LiveFailure::NoListings => {
                warn!(category = %category, location = %location, "No listings recognized on page")
            }
        }

        if !self.config.fallback_enabled {
            warn!("Synthetic fallback disabled, returning no leads");
            return Vec::new();
        }

        let leads = generate();
        info!(count = leads.len(), "Using synthetic leads");
        leads
    }
}

/// Lower-case `text` and join its whitespace-separated words with `-`.
pub fn slugify(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Build `<base>/<location-slug>/<category-slug>`, percent-encoding segments.
pub fn listing_url(base: &str, category: &str, location: &str) -> Result<Url, FetchError> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| FetchError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .push(&slugify(location))
        .push(&slugify(category));
    Ok(url)
}
