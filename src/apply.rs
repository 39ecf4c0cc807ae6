use crate::config::{MissingKeyPolicy, SwitcherConfig};
use crate::document::Document;
use crate::language::Language;
use crate::table::{PAGE_DESCRIPTION_KEY, PAGE_TITLE_KEY, TranslationTable};

/// What one application of a table changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyStats {
    /// Text and attribute bindings that received a translation
    pub translated: usize,
    /// Keys referenced by markup but absent from the table, first occurrence order
    pub missing: Vec<String>,
}

impl ApplyStats {
    fn record_missing(&mut self, key: &str) {
        if !self.missing.iter().any(|k| k == key) {
            self.missing.push(key.to_string());
        }
    }
}

/// Rewrite `doc` for `lang` using `table`
///
/// - elements marked with the text marker get the translated text
/// - elements marked with the title / aria-label markers get the translated
///   `title` / `aria-label` attribute
/// - unknown keys follow `config.missing_key_policy`
/// - the root `lang` attribute, the title and the meta description are set
///   (the latter two only when the table has `page.title` / `page.description`)
/// - exactly the language controls for `lang` are marked active
pub fn apply_translation_table<D: Document + ?Sized>(
    doc: &mut D,
    table: &TranslationTable,
    lang: Language,
    config: &SwitcherConfig,
) -> ApplyStats {
    let mut stats = ApplyStats::default();
    let markers = &config.markers;

    for node in doc.elements_with_attribute(&markers.text) {
        let Some(key) = doc.attribute(node, &markers.text).filter(|k| !k.is_empty()) else {
            continue;
        };
        match table.get(&key) {
            Some(value) => {
                doc.set_text(node, value);
                stats.translated += 1;
            }
            None => {
                if config.missing_key_policy == MissingKeyPolicy::EchoKey {
                    doc.set_text(node, &key);
                }
                stats.record_missing(&key);
            }
        }
    }

    for (marker, target) in [(&markers.title, "title"), (&markers.aria_label, "aria-label")] {
        for node in doc.elements_with_attribute(marker) {
            let Some(key) = doc.attribute(node, marker).filter(|k| !k.is_empty()) else {
                continue;
            };
            match table.get(&key) {
                Some(value) => {
                    doc.set_attribute(node, target, value);
                    stats.translated += 1;
                }
                None => {
                    if config.missing_key_policy == MissingKeyPolicy::EchoKey {
                        doc.set_attribute(node, target, &key);
                    }
                    stats.record_missing(&key);
                }
            }
        }
    }

    doc.set_language(lang.code());

    if let Some(title) = table.get(PAGE_TITLE_KEY) {
        doc.set_title(title);
    }
    if let Some(description) = table.get(PAGE_DESCRIPTION_KEY) {
        doc.set_meta_description(description);
    }

    update_control_states(doc, lang, config);

    stats
}

/// Mark the language controls for `lang` active and every other one inactive
pub fn update_control_states<D: Document + ?Sized>(
    doc: &mut D,
    lang: Language,
    config: &SwitcherConfig,
) {
    for node in doc.elements_with_attribute(&config.markers.control) {
        let active = doc
            .attribute(node, &config.markers.control)
            .and_then(|code| Language::from_code(&code))
            == Some(lang);
        doc.set_class(node, &config.active_class, active);
        doc.set_attribute(node, "aria-pressed", if active { "true" } else { "false" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Element, MemoryDocument};

    struct Page {
        doc: MemoryDocument,
        title: usize,
        missing: usize,
        link: usize,
        de_btn: usize,
        en_btn: usize,
    }

    fn page() -> Page {
        let mut doc = MemoryDocument::new();
        let title = doc.push(
            Element::new("h1")
                .with_attr("data-i18n", "hero.title")
                .with_text("Softwareentwickler"),
        );
        let missing = doc.push(
            Element::new("p")
                .with_attr("data-i18n", "hero.unknown")
                .with_text("Static intro"),
        );
        let link = doc.push(
            Element::new("a")
                .with_attr("data-i18n-title", "contact.email")
                .with_attr("data-i18n-aria-label", "contact.title"),
        );
        let de_btn = doc.push(
            Element::new("button")
                .with_attr("data-lang-btn", "de")
                .with_attr("class", "lang-btn active"),
        );
        let en_btn = doc.push(
            Element::new("button")
                .with_attr("data-lang-btn", "en")
                .with_attr("class", "lang-btn"),
        );
        Page {
            doc,
            title,
            missing,
            link,
            de_btn,
            en_btn,
        }
    }

    fn en_table() -> TranslationTable {
        [
            ("page.title", "Portfolio"),
            ("page.description", "Projects and contact"),
            ("hero.title", "Software engineer"),
            ("contact.email", "Send an email"),
            ("contact.title", "Contact"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_text_replaced_and_missing_kept() {
        let mut p = page();
        let stats = apply_translation_table(&mut p.doc, &en_table(), Language::En, &SwitcherConfig::default());

        assert_eq!(p.doc.text(p.title), "Software engineer");
        assert_eq!(p.doc.text(p.missing), "Static intro");
        assert_eq!(stats.translated, 3);
        assert_eq!(stats.missing, vec!["hero.unknown".to_string()]);
    }

    #[test]
    fn test_echo_key_policy() {
        let mut p = page();
        let config = SwitcherConfig {
            missing_key_policy: MissingKeyPolicy::EchoKey,
            ..SwitcherConfig::default()
        };
        apply_translation_table(&mut p.doc, &en_table(), Language::En, &config);
        assert_eq!(p.doc.text(p.missing), "hero.unknown");
    }

    #[test]
    fn test_accessibility_attributes() {
        let mut p = page();
        apply_translation_table(&mut p.doc, &en_table(), Language::En, &SwitcherConfig::default());
        assert_eq!(p.doc.attribute(p.link, "title").as_deref(), Some("Send an email"));
        assert_eq!(p.doc.attribute(p.link, "aria-label").as_deref(), Some("Contact"));
    }

    #[test]
    fn test_document_level_updates() {
        let mut p = page();
        apply_translation_table(&mut p.doc, &en_table(), Language::En, &SwitcherConfig::default());
        assert_eq!(p.doc.language(), Some("en"));
        assert_eq!(p.doc.title(), "Portfolio");
        assert_eq!(p.doc.meta_description(), Some("Projects and contact"));
    }

    #[test]
    fn test_title_untouched_without_reserved_keys() {
        let mut p = page();
        p.doc.set_title("Existing");
        let table: TranslationTable = [("hero.title", "x")].into_iter().collect();
        apply_translation_table(&mut p.doc, &table, Language::De, &SwitcherConfig::default());
        assert_eq!(p.doc.title(), "Existing");
        assert_eq!(p.doc.meta_description(), None);
    }

    #[test]
    fn test_exactly_one_control_active() {
        let mut p = page();
        apply_translation_table(&mut p.doc, &en_table(), Language::En, &SwitcherConfig::default());

        let de = p.doc.element(p.de_btn).unwrap();
        let en = p.doc.element(p.en_btn).unwrap();
        assert!(!de.has_class("active"));
        assert!(de.has_class("lang-btn"));
        assert!(en.has_class("active"));
        assert_eq!(p.doc.attribute(p.de_btn, "aria-pressed").as_deref(), Some("false"));
        assert_eq!(p.doc.attribute(p.en_btn, "aria-pressed").as_deref(), Some("true"));
    }

    #[test]
    fn test_empty_table_changes_no_text() {
        let mut p = page();
        let before = p.doc.text(p.title);
        let stats = apply_translation_table(
            &mut p.doc,
            &TranslationTable::new(),
            Language::De,
            &SwitcherConfig::default(),
        );
        assert_eq!(p.doc.text(p.title), before);
        assert_eq!(stats.translated, 0);
        assert_eq!(p.doc.language(), Some("de"));
    }
}
