//! Listing page extraction
//!
//! Each strategy targets one page template. [`MarkupExtractor`] runs them in
//! order and stops at the first one that yields records, so new template
//! variants are appended without touching the existing ones.

mod alternate;
mod dom;
pub mod glyph;
pub mod links;
mod listing;
mod structured;

pub use alternate::AlternateTemplate;
pub use listing::ResultBoxTemplate;
pub use structured::StructuredData;

use scraper::Html;
use tracing::{debug, info};

use crate::lead::Lead;

/// Search parameters the strategies need for defaults.
#[derive(Debug, Clone, Copy)]
pub struct ExtractContext<'a> {
    pub location: &'a str,
    pub category: &'a str,
}

/// One parsing approach tied to a known page template.
///
/// Implementations never fail as a whole: a block that cannot be parsed is
/// skipped, and an unrecognized page yields an empty vector.
pub trait ListingStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn extract(&self, document: &Html, ctx: &ExtractContext<'_>) -> Vec<Lead>;
}

/// Ordered chain of listing strategies.
pub struct MarkupExtractor {
    strategies: Vec<Box<dyn ListingStrategy>>,
}

impl Default for MarkupExtractor {
    fn default() -> Self {
        Self::new()
            .with_strategy(ResultBoxTemplate)
            .with_strategy(AlternateTemplate)
            .with_strategy(StructuredData)
    }
}

impl MarkupExtractor {
    /// Empty chain; see [`MarkupExtractor::default`] for the standard order.
    pub fn new() -> Self {
        Self { strategies: Vec::new() }
    }

    /// Append a strategy after the existing ones.
    pub fn with_strategy(mut self, strategy: impl ListingStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Leads from the first strategy that finds any. Empty when none does.
    pub fn extract(&self, markup: &str, location: &str, category: &str) -> Vec<Lead> {
        if markup.trim().is_empty() {
            debug!("Empty markup, nothing to extract");
            return Vec::new();
        }

        let document = Html::parse_document(markup);
        let ctx = ExtractContext { location, category };

        for strategy in &self.strategies {
            let leads = strategy.extract(&document, &ctx);
            if !leads.is_empty() {
                info!(
                    strategy = strategy.name(),
                    count = leads.len(),
                    "Extracted leads from listing page"
                );
                return leads;
            }
            debug!(strategy = strategy.name(), "Strategy found no listings");
        }

        Vec::new()
    }
}

/// Run the default strategy chain over `markup`.
pub fn extract(markup: &str, location: &str, category: &str) -> Vec<Lead> {
    MarkupExtractor::default().extract(markup, location, category)
}
