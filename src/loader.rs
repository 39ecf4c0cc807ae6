use crate::error::{I18nError, I18nResult};
use crate::language::Language;
use crate::table::TranslationTable;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// File name of the locale file for `lang`, e.g. `de.json`
pub fn locale_file_name(lang: Language) -> String {
    format!("{}.json", lang.code())
}

/// Load a translation table from a single JSON file
///
/// The JSON file should have the following structure:
/// ```json
/// {
///     "@metadata": { ... },  // Ignored
///     "hero.title": "message text",
///     "nav.about": "another message"
/// }
/// ```
///
/// # Errors
/// - `Io` when the file cannot be read
/// - `Parse` when the content is not a flat JSON object
pub fn load_table_from_file(path: &Path) -> I18nResult<TranslationTable> {
    let content = fs::read_to_string(path)
        .map_err(|e| I18nError::Io(format!("Failed to read '{}': {}", path.display(), e)))?;

    TranslationTable::from_json_str(&content).map_err(|e| match e {
        I18nError::Parse(msg) => I18nError::Parse(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}

/// Load every supported language's table from a locale directory
///
/// Scans the directory for `*.json` files and uses the file stem as the
/// language code (`en.json` -> `en`). Files for languages outside the
/// supported set are ignored.
///
/// # Errors
/// - Directory not found or unreadable
/// - Any supported locale file failing to load
pub fn load_all_tables_from_dir(dir: &Path) -> I18nResult<HashMap<Language, TranslationTable>> {
    if !dir.is_dir() {
        return Err(I18nError::Io(format!(
            "Not a directory: {}",
            dir.display()
        )));
    }

    let mut tables = HashMap::new();

    let entries = fs::read_dir(dir)
        .map_err(|e| I18nError::Io(format!("Failed to read '{}': {}", dir.display(), e)))?;

    for entry in entries {
        let path = entry?.path();

        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }

        let Some(lang) = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(Language::from_code)
        else {
            debug!(path = %path.display(), "skipping locale file for unsupported language");
            continue;
        };

        tables.insert(lang, load_table_from_file(&path)?);
    }

    if tables.is_empty() {
        warn!(dir = %dir.display(), "no locale files found");
    }

    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "portfolio-i18n-loader-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_single_file() {
        let dir = scratch_dir("single");
        let path = dir.join("en.json");
        fs::write(&path, r#"{"hero.title": "Hello"}"#).unwrap();

        let table = load_table_from_file(&path).unwrap();
        assert_eq!(table.get("hero.title"), Some("Hello"));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_table_from_file(Path::new("/nonexistent/portfolio/de.json"));
        assert!(matches!(result, Err(I18nError::Io(_))));
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = scratch_dir("broken");
        let path = dir.join("de.json");
        fs::write(&path, "not json").unwrap();

        match load_table_from_file(&path) {
            Err(I18nError::Parse(msg)) => assert!(msg.contains("de.json")),
            other => panic!("Expected Parse error, got {:?}", other),
        }
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_load_dir_skips_unsupported() {
        let dir = scratch_dir("dir");
        fs::write(dir.join("de.json"), r#"{"nav.about": "Über mich"}"#).unwrap();
        fs::write(dir.join("en.json"), r#"{"nav.about": "About"}"#).unwrap();
        fs::write(dir.join("fr.json"), r#"{"nav.about": "À propos"}"#).unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let tables = load_all_tables_from_dir(&dir).unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[&Language::De].get("nav.about"), Some("Über mich"));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_load_dir_not_found() {
        assert!(load_all_tables_from_dir(Path::new("/nonexistent/locales")).is_err());
    }

    #[test]
    fn test_repository_locales_load() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("locales");
        let tables = load_all_tables_from_dir(&dir).unwrap();
        assert_eq!(tables.len(), Language::ALL.len());
    }
}
