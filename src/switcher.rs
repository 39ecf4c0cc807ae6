//! The language switcher session
//!
//! One `LanguageSwitcher` owns everything a page session needs: the
//! document, the preference store, the table provider and the current
//! language. Several instances can live side by side, which is what the
//! tests rely on.
//!
//! # Ordering
//!
//! Switches take `&self` and may overlap. Each switch records its language
//! as the requested one before loading; once its table arrives it is applied
//! only if no newer switch has been requested in the meantime. The page
//! therefore always ends up showing the most recently requested language.
//!
//! # Example
//!
//! ```ignore
//! use portfolio_i18n::{
//!     HttpLocaleFetcher, LanguageSwitcher, MemoryDocument, MemoryStore, SwitcherConfig,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SwitcherConfig::from_env()?;
//!     let fetcher = HttpLocaleFetcher::from_config(&config)?;
//!     let switcher = LanguageSwitcher::new(config, MemoryDocument::new(), MemoryStore::new(), fetcher);
//!
//!     switcher.init(&["en-US"]).await;
//!     switcher.switch_language("de").await;
//!     println!("{}", switcher.translate("hero.title"));
//!     Ok(())
//! }
//! ```

use crate::apply::{ApplyStats, apply_translation_table};
use crate::config::SwitcherConfig;
use crate::document::{Document, NodeId};
use crate::fetcher::LocaleFetcher;
use crate::language::{Language, resolve_initial_language};
use crate::lock;
use crate::provider::{LoadReport, TableProvider};
use crate::storage::PreferenceStore;
use crate::table::TranslationTable;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// Lifecycle of a switcher session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No table has been applied yet
    Initializing,
    /// A table has been applied to the document
    Ready,
}

/// Result of a switch request
#[derive(Debug, Clone, PartialEq)]
pub enum SwitchOutcome {
    /// The language was already current and applied; nothing happened
    Unchanged,
    /// The table was loaded and applied
    Applied { report: LoadReport, stats: ApplyStats },
    /// A newer request took over while the table was loading; the document
    /// was left alone
    Superseded { requested: Language, current: Language },
}

struct SessionState {
    /// Most recently requested language
    current: Language,
    /// Language of the table currently shown by the document
    applied: Option<Language>,
    active_table: Option<TranslationTable>,
    last_load: Option<LoadReport>,
}

/// Session-scoped language switcher over a document, a preference store and
/// a locale fetcher
pub struct LanguageSwitcher<D, S, F> {
    config: SwitcherConfig,
    document: Mutex<D>,
    store: Mutex<S>,
    provider: TableProvider<F>,
    state: Mutex<SessionState>,
}

impl<D, S, F> LanguageSwitcher<D, S, F>
where
    D: Document,
    S: PreferenceStore,
    F: LocaleFetcher,
{
    pub fn new(config: SwitcherConfig, document: D, store: S, fetcher: F) -> Self {
        let current = config.default_language;
        Self {
            config,
            document: Mutex::new(document),
            store: Mutex::new(store),
            provider: TableProvider::new(fetcher),
            state: Mutex::new(SessionState {
                current,
                applied: None,
                active_table: None,
                last_load: None,
            }),
        }
    }

    pub fn config(&self) -> &SwitcherConfig {
        &self.config
    }

    /// Resolve the starting language from the stored preference and the
    /// browser's locales
    pub fn resolve_initial_language<L: AsRef<str>>(&self, browser_locales: &[L]) -> Language {
        let stored = lock(&self.store).get(&self.config.storage_key);
        resolve_initial_language(
            stored.as_deref(),
            browser_locales,
            self.config.default_language,
        )
    }

    /// Start the session: resolve the initial language and apply it
    pub async fn init<L: AsRef<str>>(&self, browser_locales: &[L]) -> SwitchOutcome {
        let lang = self.resolve_initial_language(browser_locales);
        debug!(lang = %lang, "initial language resolved");
        self.switch_to(lang).await
    }

    /// Switch to the language named by `code`
    ///
    /// Codes outside the supported set are coerced to the default language.
    pub async fn switch_language(&self, code: &str) -> SwitchOutcome {
        let lang = Language::coerce(code, self.config.default_language);
        if !lang.code().eq_ignore_ascii_case(code.trim()) {
            debug!(requested = code, lang = %lang, "unsupported language requested, using default");
        }
        self.switch_to(lang).await
    }

    /// Switch to `lang`: persist it, load its table and apply it
    pub async fn switch_to(&self, lang: Language) -> SwitchOutcome {
        {
            let mut state = lock(&self.state);
            if state.current == lang && state.applied == Some(lang) {
                debug!(lang = %lang, "language already active");
                return SwitchOutcome::Unchanged;
            }
            state.current = lang;
        }

        lock(&self.store).set(&self.config.storage_key, lang.code());

        let loaded = self.provider.load(lang).await;

        let mut state = lock(&self.state);
        if state.current != lang {
            debug!(
                requested = %lang,
                current = %state.current,
                "discarding translations for superseded request"
            );
            return SwitchOutcome::Superseded {
                requested: lang,
                current: state.current,
            };
        }

        let stats = {
            let mut doc = lock(&self.document);
            apply_translation_table(&mut *doc, &loaded.table, lang, &self.config)
        };

        info!(
            lang = %lang,
            source = ?loaded.report.source,
            translated = stats.translated,
            missing = stats.missing.len(),
            "language applied"
        );

        state.applied = Some(lang);
        state.active_table = Some(loaded.table);
        state.last_load = Some(loaded.report.clone());

        SwitchOutcome::Applied {
            report: loaded.report,
            stats,
        }
    }

    /// Handle activation (a click) of a language control
    ///
    /// Returns `None` when `node` is not a language control.
    pub async fn activate_control(&self, node: NodeId) -> Option<SwitchOutcome> {
        let code = lock(&self.document).attribute(node, &self.config.markers.control)?;
        Some(self.switch_language(&code).await)
    }

    /// Most recently requested language
    pub fn current_language(&self) -> Language {
        lock(&self.state).current
    }

    /// Language whose table the document currently shows
    pub fn applied_language(&self) -> Option<Language> {
        lock(&self.state).applied
    }

    pub fn phase(&self) -> Phase {
        match lock(&self.state).applied {
            Some(_) => Phase::Ready,
            None => Phase::Initializing,
        }
    }

    /// How the most recently applied table was obtained
    pub fn last_load(&self) -> Option<LoadReport> {
        lock(&self.state).last_load.clone()
    }

    /// Look up `key` in the applied table, echoing the key when unknown
    pub fn translate(&self, key: &str) -> String {
        self.try_translate(key).unwrap_or_else(|| key.to_string())
    }

    pub fn try_translate(&self, key: &str) -> Option<String> {
        lock(&self.state)
            .active_table
            .as_ref()
            .and_then(|table| table.get(key))
            .map(str::to_string)
    }

    pub fn document(&self) -> MutexGuard<'_, D> {
        lock(&self.document)
    }

    pub fn store(&self) -> MutexGuard<'_, S> {
        lock(&self.store)
    }

    pub fn provider(&self) -> &TableProvider<F> {
        &self.provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedded::embedded_table;
    use crate::error::I18nError;
    use crate::memory::{Element, MemoryDocument};
    use crate::mock::{MockFetcher, MockMode};
    use crate::provider::TableSource;
    use crate::storage::MemoryStore;
    use std::time::Duration;

    type TestSwitcher = LanguageSwitcher<MemoryDocument, MemoryStore, MockFetcher>;

    const HERO: NodeId = 0;
    const ABOUT: NodeId = 1;
    const UNKNOWN: NodeId = 2;
    const DE_BTN: NodeId = 3;
    const EN_BTN: NodeId = 4;

    fn page() -> MemoryDocument {
        let mut doc = MemoryDocument::new();
        doc.push(
            Element::new("h1")
                .with_attr("data-i18n", "hero.title")
                .with_text("Softwareentwickler"),
        );
        doc.push(
            Element::new("a")
                .with_attr("data-i18n", "nav.about")
                .with_text("Über mich"),
        );
        doc.push(
            Element::new("p")
                .with_attr("data-i18n", "not.translated")
                .with_text("Static text"),
        );
        doc.push(Element::new("button").with_attr("data-lang-btn", "de"));
        doc.push(Element::new("button").with_attr("data-lang-btn", "en"));
        doc
    }

    fn switcher_with(fetcher: MockFetcher, store: MemoryStore) -> TestSwitcher {
        LanguageSwitcher::new(SwitcherConfig::default(), page(), store, fetcher)
    }

    fn switcher() -> TestSwitcher {
        switcher_with(MockFetcher::new(MockMode::Suffix), MemoryStore::new())
    }

    fn active_controls(switcher: &TestSwitcher) -> Vec<NodeId> {
        let doc = switcher.document();
        doc.elements_with_attribute("data-lang-btn")
            .into_iter()
            .filter(|&node| doc.element(node).is_some_and(|el| el.has_class("active")))
            .collect()
    }

    // ========== Initialization Tests ==========

    #[tokio::test]
    async fn test_starts_initializing() {
        let s = switcher();
        assert_eq!(s.phase(), Phase::Initializing);
        assert_eq!(s.applied_language(), None);
        assert_eq!(s.last_load(), None);
    }

    #[tokio::test]
    async fn test_init_uses_stored_preference() {
        let s = switcher_with(
            MockFetcher::new(MockMode::Suffix),
            MemoryStore::new().with_value("lang", "en"),
        );
        let outcome = s.init(&["de-DE"]).await;

        assert!(matches!(outcome, SwitchOutcome::Applied { .. }));
        assert_eq!(s.phase(), Phase::Ready);
        assert_eq!(s.current_language(), Language::En);
        assert_eq!(s.document().language(), Some("en"));
    }

    #[tokio::test]
    async fn test_init_uses_browser_locale() {
        let s = switcher();
        s.init(&["en-US"]).await;
        assert_eq!(s.applied_language(), Some(Language::En));

        let s = switcher();
        s.init(&["fr-FR"]).await;
        assert_eq!(s.applied_language(), Some(Language::De));
    }

    #[tokio::test]
    async fn test_init_persists_resolved_language() {
        let s = switcher();
        s.init(&["en-GB"]).await;
        assert_eq!(s.store().get("lang").as_deref(), Some("en"));
    }

    // ========== Switch Tests ==========

    #[tokio::test]
    async fn test_switch_updates_document_state_and_storage() {
        let s = switcher();
        s.init(&["de"]).await;
        s.switch_language("en").await;

        assert_eq!(active_controls(&s), vec![EN_BTN]);
        assert_eq!(
            s.document().attribute(EN_BTN, "aria-pressed").as_deref(),
            Some("true")
        );
        assert_eq!(
            s.document().attribute(DE_BTN, "aria-pressed").as_deref(),
            Some("false")
        );
        assert_eq!(s.document().language(), Some("en"));
        assert_eq!(s.store().get("lang").as_deref(), Some("en"));
        assert_eq!(s.document().text(HERO), "Software engineer focused on robust systems_en");
    }

    #[tokio::test]
    async fn test_missing_key_keeps_content() {
        let s = switcher();
        let outcome = s.init(&["en"]).await;

        assert_eq!(s.document().text(UNKNOWN), "Static text");
        match outcome {
            SwitchOutcome::Applied { stats, .. } => {
                assert_eq!(stats.missing, vec!["not.translated".to_string()]);
            }
            other => panic!("Expected Applied, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_switch_same_language_is_idempotent() {
        let s = switcher();
        s.init(&["de"]).await;
        s.switch_language("en").await;
        let after_first = s.document().clone();

        assert_eq!(s.switch_language("en").await, SwitchOutcome::Unchanged);
        assert_eq!(*s.document(), after_first);
    }

    #[tokio::test]
    async fn test_round_trip_restores_german() {
        let s = switcher();
        s.init(&["de"]).await;
        s.switch_language("en").await;
        s.switch_language("de").await;

        let de = embedded_table(Language::De);
        assert_eq!(
            s.document().text(HERO),
            format!("{}_de", de.get("hero.title").unwrap())
        );
        assert_eq!(
            s.document().text(ABOUT),
            format!("{}_de", de.get("nav.about").unwrap())
        );
        assert_eq!(active_controls(&s), vec![DE_BTN]);
    }

    #[tokio::test]
    async fn test_unsupported_code_coerced_to_default() {
        let s = switcher();
        s.init(&["en"]).await;
        s.switch_language("fr").await;

        assert_eq!(s.current_language(), Language::De);
        assert_eq!(s.document().language(), Some("de"));
        assert_eq!(s.store().get("lang").as_deref(), Some("de"));
    }

    #[tokio::test]
    async fn test_tables_are_cached_per_language() {
        let fetcher = MockFetcher::new(MockMode::Suffix);
        let handle = fetcher.clone();
        let s = switcher_with(fetcher, MemoryStore::new());

        s.init(&["de"]).await;
        s.switch_language("en").await;
        s.switch_language("de").await;
        s.switch_language("en").await;

        assert_eq!(handle.request_count(), 2);
        assert_eq!(s.last_load().unwrap().source, TableSource::Cache);
    }

    // ========== Fallback Tests ==========

    #[tokio::test]
    async fn test_fallback_is_observable_and_applied() {
        let s = switcher_with(
            MockFetcher::new(MockMode::Error(I18nError::Network("offline".into()))),
            MemoryStore::new(),
        );
        let outcome = s.init(&["en"]).await;

        match outcome {
            SwitchOutcome::Applied { report, .. } => {
                assert!(report.used_fallback());
                assert_eq!(report.fallback_reason, Some(I18nError::Network("offline".into())));
            }
            other => panic!("Expected Applied, got {:?}", other),
        }
        let en = embedded_table(Language::En);
        assert_eq!(s.document().text(HERO), en.get("hero.title").unwrap());
        assert_eq!(s.document().title(), en.get("page.title").unwrap());
    }

    // ========== Ordering Tests ==========

    #[tokio::test]
    async fn test_last_request_wins() {
        let fetcher =
            MockFetcher::new(MockMode::Suffix).with_delay(Language::En, Duration::from_millis(100));
        let s = switcher_with(fetcher, MemoryStore::new());
        s.init(&["de"]).await;

        let (slow, fast) = tokio::join!(s.switch_language("en"), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            s.switch_language("de").await
        });

        assert!(matches!(fast, SwitchOutcome::Applied { .. }));
        assert_eq!(
            slow,
            SwitchOutcome::Superseded {
                requested: Language::En,
                current: Language::De
            }
        );
        assert_eq!(s.applied_language(), Some(Language::De));
        assert_eq!(s.document().language(), Some("de"));
        assert!(s.document().text(HERO).ends_with("_de"));
        assert_eq!(s.store().get("lang").as_deref(), Some("de"));
    }

    #[tokio::test]
    async fn test_hanging_load_keeps_previous_language() {
        let fetcher =
            MockFetcher::new(MockMode::Suffix).with_delay(Language::En, Duration::from_secs(60));
        let s = switcher_with(fetcher, MemoryStore::new());
        s.init(&["de"]).await;

        let result =
            tokio::time::timeout(Duration::from_millis(50), s.switch_language("en")).await;
        assert!(result.is_err());

        assert_eq!(s.current_language(), Language::En);
        assert_eq!(s.applied_language(), Some(Language::De));
        assert_eq!(s.document().language(), Some("de"));
    }

    // ========== Runtime API Tests ==========

    #[tokio::test]
    async fn test_activate_control() {
        let s = switcher();
        s.init(&["de"]).await;

        let outcome = s.activate_control(EN_BTN).await;
        assert!(matches!(outcome, Some(SwitchOutcome::Applied { .. })));
        assert_eq!(s.current_language(), Language::En);

        assert_eq!(s.activate_control(HERO).await, None);
    }

    #[tokio::test]
    async fn test_translate_lookup() {
        let s = switcher();
        assert_eq!(s.translate("nav.about"), "nav.about");

        s.init(&["en"]).await;
        assert_eq!(s.translate("nav.about"), "About_en");
        assert_eq!(s.try_translate("nav.nowhere"), None);
        assert_eq!(s.translate("nav.nowhere"), "nav.nowhere");
    }

    #[tokio::test]
    async fn test_independent_sessions() {
        let a = switcher();
        let b = switcher();
        a.init(&["en"]).await;
        b.init(&["de"]).await;

        assert_eq!(a.current_language(), Language::En);
        assert_eq!(b.current_language(), Language::De);
        assert_eq!(a.document().language(), Some("en"));
        assert_eq!(b.document().language(), Some("de"));
    }
}
