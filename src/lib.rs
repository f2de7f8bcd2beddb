//! Business lead extraction for directory listing pages
//!
//! Fetches one listing page for a (category, location) search and recovers
//! lead records from it:
//! - result-box template with phone numbers in data attributes
//! - legacy template with glyph-obfuscated phone numbers
//! - schema.org JSON-LD business objects
//!
//! When the page cannot be fetched or yields nothing, a synthetic lead set is
//! returned instead. Lead sets export to `.xlsx` with normalized phones.

pub mod config;
pub mod error;
pub mod export;
pub mod extractors;
pub mod fetch;
pub mod lead;
pub mod orchestrator;
pub mod phone;
pub mod synthetic;

pub use config::ExtractorConfig;
pub use error::{BlockError, ConfigError, ExportError, FetchError};
pub use export::{export_leads, export_to_excel, SpreadsheetWriter, XlsxWriter};
pub use extractors::{extract, ListingStrategy, MarkupExtractor};
pub use fetch::{HttpFetcher, MockFetcher, PageFetcher};
pub use lead::Lead;
pub use orchestrator::LeadExtractor;
pub use phone::normalize;
pub use synthetic::{generate, generate_with};
