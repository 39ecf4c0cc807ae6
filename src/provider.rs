//! Translation table loading with cache and embedded fallback
//!
//! `TableProvider` never fails: a successful fetch is cached for the rest of
//! the session, and any failure degrades to the compiled-in table. How a
//! table was obtained is recorded in a `LoadReport` so callers and tests can
//! tell a fallback from a real load without scraping logs.

use crate::embedded::embedded_table;
use crate::error::I18nError;
use crate::fetcher::LocaleFetcher;
use crate::language::Language;
use crate::lock;
use crate::table::TranslationTable;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, warn};

/// Where a translation table came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSource {
    /// Freshly fetched from the locale resource
    Network,
    /// Served from the in-memory session cache
    Cache,
    /// Compiled-in fallback, after a failed fetch
    Embedded,
}

/// Outcome of one table load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub language: Language,
    pub source: TableSource,
    /// Why the fetch failed, when the embedded table was used
    pub fallback_reason: Option<I18nError>,
}

impl LoadReport {
    pub fn used_fallback(&self) -> bool {
        self.source == TableSource::Embedded
    }
}

/// A table together with its load report
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTable {
    pub table: TranslationTable,
    pub report: LoadReport,
}

/// Loads tables through a `LocaleFetcher`, caching successes per language
pub struct TableProvider<F> {
    fetcher: F,
    cache: Mutex<HashMap<Language, TranslationTable>>,
}

impl<F: LocaleFetcher> TableProvider<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Cached table for `lang`, if a fetch for it has succeeded
    pub fn cached(&self, lang: Language) -> Option<TranslationTable> {
        lock(&self.cache).get(&lang).cloned()
    }

    pub fn clear_cache(&self) {
        lock(&self.cache).clear();
    }

    /// Obtain the table for `lang`
    ///
    /// Order of preference:
    /// 1. the session cache
    /// 2. the fetcher (result cached on success)
    /// 3. the embedded table (not cached, so a later load retries the fetcher)
    ///
    /// Concurrent loads of the same uncached language may both reach the
    /// fetcher; the later result overwrites the earlier one in the cache.
    pub async fn load(&self, lang: Language) -> LoadedTable {
        if let Some(table) = self.cached(lang) {
            debug!(lang = %lang, "translation table served from cache");
            return LoadedTable {
                table,
                report: LoadReport {
                    language: lang,
                    source: TableSource::Cache,
                    fallback_reason: None,
                },
            };
        }

        match self.fetcher.fetch(lang).await {
            Ok(table) => {
                debug!(
                    lang = %lang,
                    source = self.fetcher.source_name(),
                    keys = table.len(),
                    "translation table fetched"
                );
                lock(&self.cache).insert(lang, table.clone());
                LoadedTable {
                    table,
                    report: LoadReport {
                        language: lang,
                        source: TableSource::Network,
                        fallback_reason: None,
                    },
                }
            }
            Err(e) => {
                warn!(
                    lang = %lang,
                    source = self.fetcher.source_name(),
                    error = %e,
                    "could not load translations, using embedded copy"
                );
                LoadedTable {
                    table: embedded_table(lang),
                    report: LoadReport {
                        language: lang,
                        source: TableSource::Embedded,
                        fallback_reason: Some(e),
                    },
                }
            }
        }
    }
}
