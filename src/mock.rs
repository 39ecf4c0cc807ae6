//! Mock locale fetcher for testing
//!
//! Deterministic, network-free `LocaleFetcher` for exercising the switcher's
//! caching, fallback and ordering behaviour.
//!
//! # Example
//!
//! ```ignore
//! use portfolio_i18n::{Language, LocaleFetcher, MockFetcher, MockMode};
//!
//! #[tokio::test]
//! async fn test_fetch() {
//!     let mock = MockFetcher::new(MockMode::Suffix);
//!     let table = mock.fetch(Language::En).await.unwrap();
//!     assert_eq!(table.get("nav.about"), Some("About_en"));
//! }
//! ```

use crate::embedded::embedded_table;
use crate::error::{I18nError, I18nResult};
use crate::fetcher::LocaleFetcher;
use crate::language::Language;
use crate::table::TranslationTable;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Mock fetch modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Embedded table with every value suffixed by `_<lang>`, so fetched
    /// data is distinguishable from fallback data
    Suffix,

    /// Predefined tables per language; languages without a table fail with
    /// a 404 status
    Tables(HashMap<Language, TranslationTable>),

    /// Simulate a transport failure
    Error(I18nError),

    /// Simulate a body that is not a flat JSON object
    Malformed,
}

/// Mock fetcher that simulates various locale-loading scenarios
///
/// Clones share the request counter, so a test can keep a handle after
/// moving the fetcher into a switcher.
#[derive(Debug, Clone)]
pub struct MockFetcher {
    mode: MockMode,
    /// Simulated latency per language
    delays: HashMap<Language, Duration>,
    requests: Arc<AtomicUsize>,
}

impl MockFetcher {
    /// Create a new MockFetcher with the given mode
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            delays: HashMap::new(),
            requests: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Add simulated latency for requests of `lang`
    pub fn with_delay(mut self, lang: Language, delay: Duration) -> Self {
        self.delays.insert(lang, delay);
        self
    }

    /// Number of `fetch` calls made so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn apply_mode(&self, lang: Language) -> I18nResult<TranslationTable> {
        match &self.mode {
            MockMode::Suffix => Ok(embedded_table(lang)
                .iter()
                .map(|(key, value)| (key.to_string(), format!("{}_{}", value, lang)))
                .collect()),
            MockMode::Tables(tables) => tables.get(&lang).cloned().ok_or(I18nError::Status(404)),
            MockMode::Error(err) => Err(err.clone()),
            MockMode::Malformed => TranslationTable::from_json_str("[\"not\", \"a\", \"table\"]"),
        }
    }
}

#[async_trait]
impl LocaleFetcher for MockFetcher {
    async fn fetch(&self, lang: Language) -> I18nResult<TranslationTable> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(&lang) {
            tokio::time::sleep(*delay).await;
        }

        self.apply_mode(lang)
    }

    fn source_name(&self) -> &str {
        "Mock"
    }
}
