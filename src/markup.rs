//! Static HTML scanning
//!
//! Pulls the parts of a page the switcher cares about out of its HTML
//! source: elements carrying marker attributes, the root `lang` attribute,
//! `<title>` and the meta description. This is a pattern scan, not an HTML
//! parser; it expects the plain markup of a hand-written static page.

use crate::config::MarkerAttributes;
use crate::document::Document;
use crate::memory::{Element, MemoryDocument};
use regex::Regex;
use std::sync::LazyLock;

static START_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<([a-zA-Z][a-zA-Z0-9-]*)((?:\s+[^\s"'>/=]+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'>]+))?)*)\s*/?>"#)
        .expect("start tag pattern is valid")
});

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
        .expect("attribute pattern is valid")
});

fn parse_attributes(source: &str) -> Vec<(String, String)> {
    ATTRIBUTE
        .captures_iter(source)
        .map(|caps| {
            let name = caps[1].to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            (name, value)
        })
        .collect()
}

/// Text directly following a start tag, up to the next tag
fn leading_text(html: &str, from: usize) -> String {
    let rest = &html[from..];
    let end = rest.find('<').unwrap_or(rest.len());
    rest[..end].split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Scan `html` into a `MemoryDocument`
///
/// Only elements carrying one of the `markers` attributes become elements
/// of the result, in source order; their text is the whitespace-normalized
/// text up to the next tag.
pub fn scan_markup(html: &str, markers: &MarkerAttributes) -> MemoryDocument {
    let mut doc = MemoryDocument::new();
    let marker_names = [
        markers.text.to_ascii_lowercase(),
        markers.title.to_ascii_lowercase(),
        markers.aria_label.to_ascii_lowercase(),
        markers.control.to_ascii_lowercase(),
    ];

    for caps in START_TAG.captures_iter(html) {
        let tag = caps[1].to_ascii_lowercase();
        let attributes = parse_attributes(caps.get(2).map_or("", |m| m.as_str()));
        let end = caps.get(0).map_or(0, |m| m.end());

        match tag.as_str() {
            "html" => {
                if let Some((_, lang)) = attributes.iter().find(|(name, _)| name == "lang") {
                    doc.set_language(lang);
                }
            }
            "title" => doc.set_title(&leading_text(html, end)),
            "meta" => {
                let is_description = attributes
                    .iter()
                    .any(|(name, value)| name == "name" && value.eq_ignore_ascii_case("description"));
                if is_description {
                    if let Some((_, content)) = attributes.iter().find(|(name, _)| name == "content") {
                        doc.set_meta_description(content);
                    }
                }
            }
            _ => {}
        }

        let marked = attributes
            .iter()
            .any(|(name, _)| marker_names.contains(name));
        if !marked {
            continue;
        }

        let element = attributes
            .iter()
            .fold(Element::new(&tag), |el, (name, value)| el.with_attr(name, value))
            .with_text(&leading_text(html, end));
        doc.push(element);
    }

    doc
}
