//! Supported languages and initial-language resolution
//!
//! The page ships in exactly two languages. A browser reports locales as
//! BCP 47 tags (`en-US`, `de-AT`, sometimes `en_us`); only the primary
//! language subtag matters when matching them against the supported set.

use crate::error::{I18nError, I18nResult};
use icu_locale::LanguageIdentifier;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A language the page is translated into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    De,
    En,
}

impl Language {
    /// Every supported language, in display order
    pub const ALL: [Language; 2] = [Language::De, Language::En];

    /// The ISO 639-1 code, as used in storage, file names and `lang` attributes
    pub fn code(self) -> &'static str {
        match self {
            Language::De => "de",
            Language::En => "en",
        }
    }

    /// Look up a supported language by code, ignoring case and surrounding whitespace
    pub fn from_code(code: &str) -> Option<Language> {
        let code = code.trim();
        Language::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
    }

    /// Map any requested code onto the supported set, using `default` for
    /// anything unknown
    pub fn coerce(code: &str, default: Language) -> Language {
        Language::from_code(code).unwrap_or(default)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = I18nError;

    fn from_str(s: &str) -> I18nResult<Self> {
        Language::from_code(s).ok_or_else(|| I18nError::UnsupportedLanguage(s.to_string()))
    }
}

/// Extract the primary language subtag of a locale tag
///
/// Converts locale tags to their lowercase base language:
/// - `en-US` → `en`
/// - `de_AT` → `de`
/// - `EN` → `en`
///
/// Tags that do not parse as BCP 47 fall back to their first two letters,
/// which is what browsers without proper tags tend to send.
pub fn primary_subtag(locale: &str) -> Option<String> {
    let locale = locale.trim();
    if locale.is_empty() {
        return None;
    }

    let normalized = locale.replace('_', "-");
    if let Ok(id) = LanguageIdentifier::try_from_str(&normalized) {
        let language = id.language.as_str();
        if language != "und" {
            return Some(language.to_string());
        }
    }

    let prefix: String = locale.chars().take(2).collect();
    if prefix.len() == 2 && prefix.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(prefix.to_ascii_lowercase())
    } else {
        None
    }
}

/// Resolve the language a fresh page session starts in
///
/// Priority order:
/// 1. the persisted preference, if it names a supported language
/// 2. the first browser locale whose primary subtag is supported
/// 3. `default`
///
/// # Arguments
///
/// * `stored` - Value read from preference storage, if any
/// * `browser_locales` - Locales reported by the browser, most preferred first
/// * `default` - Language used when nothing else matches
///
/// # Example
///
/// ```ignore
/// let lang = resolve_initial_language(None, &["en-US"], Language::De);
/// assert_eq!(lang, Language::En);
/// ```
pub fn resolve_initial_language<S: AsRef<str>>(
    stored: Option<&str>,
    browser_locales: &[S],
    default: Language,
) -> Language {
    if let Some(lang) = stored.and_then(Language::from_code) {
        return lang;
    }

    browser_locales
        .iter()
        .filter_map(|locale| primary_subtag(locale.as_ref()))
        .find_map(|subtag| Language::from_code(&subtag))
        .unwrap_or(default)
}
