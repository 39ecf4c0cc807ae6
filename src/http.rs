//! HTTP locale fetcher
//!
//! Fetches `<document-base>/<locales-path>/<lang>.json`, resolving the
//! locale path relative to the document base exactly as a browser resolves
//! a relative URL: `https://example.org/cv/index.html` with the default
//! locale path yields `https://example.org/cv/locales/en.json`.
//!
//! # Example
//!
//! ```ignore
//! use portfolio_i18n::{HttpLocaleFetcher, Language, LocaleFetcher};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = HttpLocaleFetcher::new("https://example.org/", Duration::from_secs(10))?;
//!     let table = fetcher.fetch(Language::En).await?;
//!     println!("{} keys", table.len());
//!     Ok(())
//! }
//! ```

use crate::config::SwitcherConfig;
use crate::error::{I18nError, I18nResult};
use crate::fetcher::LocaleFetcher;
use crate::language::Language;
use crate::loader::locale_file_name;
use crate::table::TranslationTable;
use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

/// Locale fetcher backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpLocaleFetcher {
    /// HTTP client for async requests
    client: reqwest::Client,
    /// Document base the locale path is resolved against
    base_url: Url,
    /// Locale directory relative to the base, without surrounding slashes
    locales_path: String,
}

impl HttpLocaleFetcher {
    /// Create a fetcher for locale files under `<base_url>/locales/`
    ///
    /// # Arguments
    ///
    /// * `base_url` - Absolute URL of the document (or its directory)
    /// * `timeout` - Upper bound for a single request
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New fetcher
    /// * `Err(I18nError::Config)` - If the URL is invalid or the client cannot be built
    pub fn new(base_url: &str, timeout: Duration) -> I18nResult<Self> {
        Self::with_locales_path(base_url, "locales", timeout)
    }

    /// Create a fetcher with a custom locale directory
    pub fn with_locales_path(
        base_url: &str,
        locales_path: &str,
        timeout: Duration,
    ) -> I18nResult<Self> {
        let base_url = Url::parse(base_url.trim()).map_err(|e| {
            I18nError::Config(format!("Invalid base URL '{}': {}", base_url, e))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(I18nError::Config(format!(
                "Base URL '{}' cannot resolve relative paths",
                base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| I18nError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            locales_path: locales_path.trim_matches('/').to_string(),
        })
    }

    /// Create a fetcher from the switcher configuration
    ///
    /// # Errors
    ///
    /// `Config` when no base URL is configured or it is invalid.
    pub fn from_config(config: &SwitcherConfig) -> I18nResult<Self> {
        let base_url = config.base_url.as_deref().ok_or_else(|| {
            I18nError::Config(format!(
                "No base URL configured (set {})",
                SwitcherConfig::ENV_BASE_URL
            ))
        })?;
        Self::with_locales_path(base_url, &config.locales_path, config.request_timeout)
    }

    /// The URL the locale file for `lang` is requested from
    pub fn locale_url(&self, lang: Language) -> I18nResult<Url> {
        let file = locale_file_name(lang);
        let relative = if self.locales_path.is_empty() {
            file
        } else {
            format!("{}/{}", self.locales_path, file)
        };

        self.base_url
            .join(&relative)
            .map_err(|e| I18nError::Config(format!("Cannot resolve '{}': {}", relative, e)))
    }
}

#[async_trait]
impl LocaleFetcher for HttpLocaleFetcher {
    async fn fetch(&self, lang: Language) -> I18nResult<TranslationTable> {
        let url = self.locale_url(lang)?;
        debug!(url = %url, "fetching locale file");

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(I18nError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        TranslationTable::from_json_str(&body)
    }

    fn source_name(&self) -> &str {
        "HTTP"
    }
}
