// 🌐 Translation Table - Flat multilingual UI-string lookup
//
// A single static table: language tag → (string key → localized text).
// Lookup falls back to the default language and finally to the key itself,
// so rendering code never has to handle a missing translation.

use anyhow::{Context, Result};
use std::collections::HashMap;

const TRANSLATIONS_JSON: &str = include_str!("data/translations.json");

/// Fallback language for keys missing from the selected language
pub const DEFAULT_LANGUAGE: &str = "en";

pub struct Translations {
    table: HashMap<String, HashMap<String, String>>,
}

impl Translations {
    /// Parse the embedded translation bundle.
    pub fn load() -> Result<Self> {
        let table: HashMap<String, HashMap<String, String>> =
            serde_json::from_str(TRANSLATIONS_JSON).context("parsing bundled translations")?;
        Ok(Translations { table })
    }

    /// Look up `key` in `lang`, falling back lang → default → key.
    pub fn translate<'a>(&'a self, lang: &str, key: &'a str) -> &'a str {
        if let Some(text) = self.table.get(lang).and_then(|m| m.get(key)) {
            return text;
        }
        if let Some(text) = self.table.get(DEFAULT_LANGUAGE).and_then(|m| m.get(key)) {
            return text;
        }
        key
    }

    /// Available language tags, sorted
    pub fn languages(&self) -> Vec<&str> {
        let mut langs: Vec<&str> = self.table.keys().map(|k| k.as_str()).collect();
        langs.sort_unstable();
        langs
    }

    pub fn has_language(&self, lang: &str) -> bool {
        self.table.contains_key(lang)
    }

    /// The full table for one language (used by the JSON API)
    pub fn language_table(&self, lang: &str) -> Option<&HashMap<String, String>> {
        self.table.get(lang)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_direct_hit() {
        let t = Translations::load().unwrap();
        assert_eq!(t.translate("en", "nav.library"), "Library");
        assert_eq!(t.translate("hi", "nav.library"), "ग्रंथालय");
    }

    #[test]
    fn test_fallback_to_default_language() {
        let t = Translations::load().unwrap();

        // "reader.show_more" is only authored in English
        assert_eq!(t.translate("hi", "reader.show_more"), "Show all verses");
    }

    #[test]
    fn test_fallback_to_key() {
        let t = Translations::load().unwrap();

        // Unknown key in a known language
        assert_eq!(t.translate("en", "no.such.key"), "no.such.key");

        // Unknown language and unknown key
        assert_eq!(t.translate("xx", "also.missing"), "also.missing");
    }

    #[test]
    fn test_unknown_language_falls_back() {
        let t = Translations::load().unwrap();
        assert_eq!(t.translate("fr", "nav.mala"), "Mala");
    }

    #[test]
    fn test_languages_listed() {
        let t = Translations::load().unwrap();
        let langs = t.languages();
        assert!(langs.contains(&"en"));
        assert!(langs.contains(&"hi"));
        assert!(t.has_language("en"));
        assert!(!t.has_language("de"));
    }
}
