//! Extractor configuration with `LEADS_*` environment overrides.

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://www.justdial.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
pub const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
pub const DEFAULT_EXPORT_PREFIX: &str = "JustDial";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Listing site root; `/<location>/<category>` is appended
    pub base_url: String,
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    /// When false an empty live result is returned as-is (tests only)
    pub fallback_enabled: bool,
    /// First component of the export filename
    pub export_prefix: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            fallback_enabled: true,
            export_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
        }
    }
}

impl ExtractorConfig {
    /// Defaults overlaid with `LEADS_BASE_URL`, `LEADS_USER_AGENT`, ...
    pub fn from_env() -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("LEADS"))
            .build()?;
        let cfg: Self = settings.try_deserialize()?;
        url::Url::parse(&cfg.base_url)?;
        Ok(cfg)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn without_fallback(mut self) -> Self {
        self.fallback_enabled = false;
        self
    }
}
