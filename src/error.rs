//! Typed errors for the lead extractor.
//!
//! None of the extraction errors reach `extract_leads` callers; they are
//! logged and routed to the synthetic fallback. Export errors are returned.

use thiserror::Error;

/// Fetching the listing page failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, TLS, body read)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Listing URL could not be built
    #[error("invalid listing URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Canned failure from a test fetcher
    #[error("fetch failed: {0}")]
    Other(String),
}

/// A single listing block could not be turned into a lead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BlockError {
    #[error("listing block has no business name")]
    MissingName,
}

/// Writing the spreadsheet failed.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The spreadsheet backend rejected the data or the file
    #[error("spreadsheet writer error: {0}")]
    Writer(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Loading `ExtractorConfig` failed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;

pub type ExportResult<T> = std::result::Result<T, ExportError>;
