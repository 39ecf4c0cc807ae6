//! Compiled-in copies of the locale files
//!
//! The same files the page serves under `locales/` are bundled into the
//! binary, so a failed fetch (offline, `file://` access, broken deploy)
//! still yields a complete table.

use crate::language::Language;
use crate::table::TranslationTable;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::error;

const DE_JSON: &str = include_str!("../locales/de.json");
const EN_JSON: &str = include_str!("../locales/en.json");

static EMBEDDED: LazyLock<HashMap<Language, TranslationTable>> = LazyLock::new(|| {
    Language::ALL
        .into_iter()
        .map(|lang| (lang, parse_embedded(lang)))
        .collect()
});

/// Raw JSON source of the embedded locale file for `lang`
pub fn embedded_source(lang: Language) -> &'static str {
    match lang {
        Language::De => DE_JSON,
        Language::En => EN_JSON,
    }
}

fn parse_embedded(lang: Language) -> TranslationTable {
    match TranslationTable::from_json_str(embedded_source(lang)) {
        Ok(table) => table,
        Err(e) => {
            error!(lang = %lang, error = %e, "embedded locale data is broken");
            TranslationTable::new()
        }
    }
}

/// The embedded fallback table for `lang`
pub fn embedded_table(lang: Language) -> TranslationTable {
    EMBEDDED.get(&lang).cloned().unwrap_or_default()
}
