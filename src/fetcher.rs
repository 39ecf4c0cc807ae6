//! Locale transport abstraction
//!
//! A `LocaleFetcher` obtains one language's table from wherever the page
//! keeps its locale files: over HTTP next to the document
//! (`HttpLocaleFetcher`), from a local directory (`DirLocaleFetcher`), or
//! from canned data in tests (`MockFetcher`).
//!
//! Fetchers report failures honestly; turning a failure into embedded
//! fallback data is the job of `TableProvider`.

use crate::error::{I18nError, I18nResult};
use crate::language::Language;
use crate::loader::{load_table_from_file, locale_file_name};
use crate::table::TranslationTable;
use async_trait::async_trait;
use std::path::PathBuf;

/// Source of per-language translation tables
///
/// All methods are async to support I/O-bound operations like network requests.
#[async_trait]
pub trait LocaleFetcher: Send + Sync {
    /// Fetch the translation table for `lang`
    ///
    /// # Returns
    ///
    /// * `Ok(TranslationTable)` - The parsed table
    /// * `Err(I18nError)` - If the resource is unreachable or malformed
    async fn fetch(&self, lang: Language) -> I18nResult<TranslationTable>;

    /// Get the name of this fetcher
    ///
    /// Used for logging to identify where a table came from.
    fn source_name(&self) -> &str;
}

/// Reads `<dir>/<lang>.json` from the local filesystem
#[derive(Debug, Clone)]
pub struct DirLocaleFetcher {
    dir: PathBuf,
}

impl DirLocaleFetcher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl LocaleFetcher for DirLocaleFetcher {
    async fn fetch(&self, lang: Language) -> I18nResult<TranslationTable> {
        let path = self.dir.join(locale_file_name(lang));
        tokio::task::spawn_blocking(move || load_table_from_file(&path))
            .await
            .map_err(|e| I18nError::Io(format!("Locale read task failed: {}", e)))?
    }

    fn source_name(&self) -> &str {
        "Locale directory"
    }
}
