//! Language switching for a bilingual (German/English) static portfolio page
//!
//! The switcher resolves a visitor's language from a stored preference or
//! the browser's locales, loads that language's translation table from
//! `locales/<lang>.json` next to the page (falling back to a compiled-in
//! copy when the fetch fails), and rewrites every element marked with a
//! translation key.
//!
//! The page itself is reached through the [`Document`] trait, preferences
//! through [`PreferenceStore`] and locale files through [`LocaleFetcher`],
//! so the whole procedure runs the same against a browser binding, the
//! in-memory [`MemoryDocument`], or test doubles.

use std::sync::{Mutex, MutexGuard, PoisonError};

pub mod apply;
pub mod config;
pub mod document;
pub mod embedded;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod language;
pub mod loader;
pub mod markup;
pub mod memory;
pub mod mock;
pub mod provider;
pub mod storage;
pub mod switcher;
pub mod table;

// Re-export main types for convenient access
pub use apply::{ApplyStats, apply_translation_table, update_control_states};
pub use config::{MarkerAttributes, MissingKeyPolicy, SwitcherConfig};
pub use document::{Document, NodeId};
pub use embedded::embedded_table;
pub use error::{I18nError, I18nResult};
pub use fetcher::{DirLocaleFetcher, LocaleFetcher};
pub use http::HttpLocaleFetcher;
pub use language::{Language, primary_subtag, resolve_initial_language};
pub use loader::{load_all_tables_from_dir, load_table_from_file};
pub use markup::scan_markup;
pub use memory::{Element, MemoryDocument};
pub use mock::{MockFetcher, MockMode};
pub use provider::{LoadReport, LoadedTable, TableProvider, TableSource};
pub use storage::{FileStore, MemoryStore, PreferenceStore};
pub use switcher::{LanguageSwitcher, Phase, SwitchOutcome};
pub use table::{PAGE_DESCRIPTION_KEY, PAGE_TITLE_KEY, TranslationTable};

/// Lock a mutex, recovering the data if a previous holder panicked
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
