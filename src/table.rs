use crate::error::{I18nError, I18nResult};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

/// Key reserved for the document title
pub const PAGE_TITLE_KEY: &str = "page.title";
/// Key reserved for the meta description
pub const PAGE_DESCRIPTION_KEY: &str = "page.description";

/// One language's mapping from translation key to display string
///
/// Keys follow the dotted convention (`hero.title`, `nav.projects`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable(HashMap<String, String>);

impl TranslationTable {
    pub fn new() -> Self {
        TranslationTable(HashMap::new())
    }

    pub fn with_message(&mut self, key: &str, message: &str) -> &mut Self {
        self.0.insert(key.to_owned(), message.to_owned());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Look up `key`, echoing the key itself when it is unknown
    pub fn get_or_key(&self, key: &str) -> String {
        self.get(key).unwrap_or(key).to_string()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keys in lexical order, for stable output
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.0.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Parse a locale file body
    ///
    /// The body must be a flat JSON object:
    /// ```json
    /// {
    ///     "@metadata": { ... },  // Ignored
    ///     "page.title": "Portfolio",
    ///     "hero.title": "Hello"
    /// }
    /// ```
    ///
    /// Keys starting with `@` are skipped, as are non-string values (with a
    /// warning). Anything that is not a JSON object is a `Parse` error.
    pub fn from_json_str(content: &str) -> I18nResult<Self> {
        let json: Value = serde_json::from_str(content)?;
        Self::from_json_value(&json)
    }

    pub fn from_json_value(json: &Value) -> I18nResult<Self> {
        let obj = json
            .as_object()
            .ok_or_else(|| I18nError::Parse("root must be an object".to_string()))?;

        let mut table = TranslationTable::new();
        for (key, value) in obj {
            if key.starts_with('@') {
                continue;
            }

            if let Some(message) = value.as_str() {
                table.with_message(key, message);
            } else {
                warn!(key = %key, "translation value is not a string, skipping");
            }
        }

        Ok(table)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TranslationTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        TranslationTable(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
