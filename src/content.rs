// 📖 Content Library - Scriptures, verses, and dharma cards
//
// All content is hand-authored and bundled at build time (include_str! of
// src/data/*.json). Nothing here is created, mutated, or destroyed at
// runtime: the library is loaded once and handed around by reference.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Embedded content bundle
const SCRIPTURES_JSON: &str = include_str!("data/scriptures.json");
const DHARMA_JSON: &str = include_str!("data/dharma.json");

// ============================================================================
// CATEGORIES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptureCategory {
    /// Forty-verse praise hymns (e.g. Hanuman Chalisa)
    Chalisa,

    /// Hymns of praise (stotras)
    Stotra,

    /// Single or short Vedic formulas
    Mantra,

    /// Chapters of the Bhagavad Gita
    Gita,
}

impl ScriptureCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptureCategory::Chalisa => "Chalisa",
            ScriptureCategory::Stotra => "Stotra",
            ScriptureCategory::Mantra => "Mantra",
            ScriptureCategory::Gita => "Gita",
        }
    }

    /// All categories, in display order
    pub fn all() -> &'static [ScriptureCategory] {
        &[
            ScriptureCategory::Chalisa,
            ScriptureCategory::Stotra,
            ScriptureCategory::Mantra,
            ScriptureCategory::Gita,
        ]
    }

    /// Parse the lowercase slug used in the bundle and in API queries
    pub fn from_slug(slug: &str) -> Option<ScriptureCategory> {
        match slug {
            "chalisa" => Some(ScriptureCategory::Chalisa),
            "stotra" => Some(ScriptureCategory::Stotra),
            "mantra" => Some(ScriptureCategory::Mantra),
            "gita" => Some(ScriptureCategory::Gita),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DharmaCategory {
    Philosophy,
    Practice,
    Festival,
    Deity,
}

impl DharmaCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DharmaCategory::Philosophy => "Philosophy",
            DharmaCategory::Practice => "Practice",
            DharmaCategory::Festival => "Festival",
            DharmaCategory::Deity => "Deity",
        }
    }

    pub fn all() -> &'static [DharmaCategory] {
        &[
            DharmaCategory::Philosophy,
            DharmaCategory::Practice,
            DharmaCategory::Festival,
            DharmaCategory::Deity,
        ]
    }

    pub fn from_slug(slug: &str) -> Option<DharmaCategory> {
        match slug {
            "philosophy" => Some(DharmaCategory::Philosophy),
            "practice" => Some(DharmaCategory::Practice),
            "festival" => Some(DharmaCategory::Festival),
            "deity" => Some(DharmaCategory::Deity),
            _ => None,
        }
    }
}

// ============================================================================
// VERSE
// ============================================================================

/// A single numbered unit of a scripture.
///
/// Number 0 signifies an introductory couplet (doha/dhyana shloka) and is
/// displayed with the opening-couplet label rather than "Verse 0".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verse {
    pub number: u32,

    /// Source-script text (Devanagari)
    pub text: String,

    /// Roman transliteration
    pub transliteration: String,

    /// Translated meaning
    pub meaning: String,

    /// Optional illustration reference (relative asset path)
    pub illustration: Option<String>,
}

impl Verse {
    /// Whether this is the introductory couplet
    pub fn is_opening(&self) -> bool {
        self.number == 0
    }
}

// ============================================================================
// SCRIPTURE
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scripture {
    /// Stable slug identifier (e.g. "hanuman-chalisa")
    pub id: String,

    /// Title in source script
    pub title: String,

    /// Transliterated title
    pub title_translit: String,

    pub description: String,
    pub category: ScriptureCategory,

    /// Cover image reference (relative asset path)
    pub cover: String,

    /// Ordered verses; empty means the text is not yet available
    pub verses: Vec<Verse>,
}

impl Scripture {
    /// A scripture with no verses is shown as a "coming soon" placeholder.
    pub fn is_available(&self) -> bool {
        !self.verses.is_empty()
    }

    pub fn verse_count(&self) -> usize {
        self.verses.len()
    }

    /// Whether the scripture opens with a doha/introductory couplet
    pub fn has_opening_couplet(&self) -> bool {
        self.verses.first().map(|v| v.is_opening()).unwrap_or(false)
    }
}

// ============================================================================
// DHARMA CARD
// ============================================================================

/// A knowledge-summary tile, independent of any scripture's verses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DharmaCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: DharmaCategory,
    pub cover: String,
}

// ============================================================================
// CONTENT LIBRARY
// ============================================================================

/// The full bundled content set, loaded once at startup.
pub struct ContentLibrary {
    scriptures: Vec<Scripture>,
    dharma_cards: Vec<DharmaCard>,
}

impl ContentLibrary {
    /// Parse the embedded bundle.
    ///
    /// A malformed bundle is a build/packaging defect, so this is a startup
    /// error rather than a runtime condition.
    pub fn load() -> Result<Self> {
        let scriptures: Vec<Scripture> =
            serde_json::from_str(SCRIPTURES_JSON).context("parsing bundled scriptures")?;
        let dharma_cards: Vec<DharmaCard> =
            serde_json::from_str(DHARMA_JSON).context("parsing bundled dharma cards")?;

        let library = ContentLibrary {
            scriptures,
            dharma_cards,
        };
        library.verify()?;
        Ok(library)
    }

    /// Verify bundle invariants: unique ids, verses sorted by number.
    fn verify(&self) -> Result<()> {
        let mut ids: Vec<&str> = self
            .scriptures
            .iter()
            .map(|s| s.id.as_str())
            .chain(self.dharma_cards.iter().map(|c| c.id.as_str()))
            .collect();
        ids.sort_unstable();
        for pair in ids.windows(2) {
            if pair[0] == pair[1] {
                bail!("duplicate content id in bundle: {}", pair[0]);
            }
        }

        for scripture in &self.scriptures {
            for pair in scripture.verses.windows(2) {
                if pair[0].number >= pair[1].number {
                    bail!(
                        "verses out of order in '{}': {} then {}",
                        scripture.id,
                        pair[0].number,
                        pair[1].number
                    );
                }
            }
        }

        Ok(())
    }

    // ========================================================================
    // LOOKUPS
    // ========================================================================

    /// Find a scripture by id. Unknown ids return None and callers render
    /// the not-found fallback.
    pub fn scripture(&self, id: &str) -> Option<&Scripture> {
        self.scriptures.iter().find(|s| s.id == id)
    }

    pub fn dharma_card(&self, id: &str) -> Option<&DharmaCard> {
        self.dharma_cards.iter().find(|c| c.id == id)
    }

    pub fn scriptures(&self) -> &[Scripture] {
        &self.scriptures
    }

    pub fn dharma_cards(&self) -> &[DharmaCard] {
        &self.dharma_cards
    }

    pub fn scripture_count(&self) -> usize {
        self.scriptures.len()
    }

    pub fn dharma_count(&self) -> usize {
        self.dharma_cards.len()
    }

    // ========================================================================
    // FILTERING & SEARCH
    // ========================================================================

    pub fn scriptures_by_category(&self, category: ScriptureCategory) -> Vec<&Scripture> {
        self.scriptures
            .iter()
            .filter(|s| s.category == category)
            .collect()
    }

    pub fn dharma_by_category(&self, category: DharmaCategory) -> Vec<&DharmaCard> {
        self.dharma_cards
            .iter()
            .filter(|c| c.category == category)
            .collect()
    }

    /// Case-insensitive search over title, transliterated title, and
    /// description. An empty query matches everything.
    pub fn search_scriptures(&self, query: &str) -> Vec<&Scripture> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.scriptures.iter().collect();
        }

        self.scriptures
            .iter()
            .filter(|s| {
                s.title.to_lowercase().contains(&needle)
                    || s.title_translit.to_lowercase().contains(&needle)
                    || s.description.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_loads() {
        let library = ContentLibrary::load().unwrap();
        assert!(library.scripture_count() >= 4);
        assert!(library.dharma_count() >= 6);
    }

    #[test]
    fn test_scripture_lookup() {
        let library = ContentLibrary::load().unwrap();

        let chalisa = library.scripture("hanuman-chalisa");
        assert!(chalisa.is_some());
        assert_eq!(chalisa.unwrap().title_translit, "Hanuman Chalisa");

        // Unknown id returns None (not-found fallback)
        assert!(library.scripture("unknown-text").is_none());
    }

    #[test]
    fn test_dharma_card_lookup() {
        let library = ContentLibrary::load().unwrap();

        let card = library.dharma_card("why-108");
        assert!(card.is_some());
        assert_eq!(card.unwrap().category, DharmaCategory::Practice);

        assert!(library.dharma_card("nope").is_none());
    }

    #[test]
    fn test_opening_couplet_is_verse_zero() {
        let library = ContentLibrary::load().unwrap();
        let chalisa = library.scripture("hanuman-chalisa").unwrap();

        assert!(chalisa.has_opening_couplet());
        let first = &chalisa.verses[0];
        assert_eq!(first.number, 0);
        assert!(first.is_opening());

        // Stotram starts at verse 1, no doha
        let tandava = library.scripture("shiva-tandava-stotram").unwrap();
        assert!(!tandava.has_opening_couplet());
    }

    #[test]
    fn test_verses_are_ordered() {
        let library = ContentLibrary::load().unwrap();
        for scripture in library.scriptures() {
            let numbers: Vec<u32> = scripture.verses.iter().map(|v| v.number).collect();
            let mut sorted = numbers.clone();
            sorted.sort_unstable();
            assert_eq!(numbers, sorted, "verses out of order in {}", scripture.id);
        }
    }

    #[test]
    fn test_unavailable_scripture_placeholder() {
        let library = ContentLibrary::load().unwrap();
        let gita = library.scripture("bhagavad-gita-12").unwrap();

        assert!(!gita.is_available());
        assert_eq!(gita.verse_count(), 0);
    }

    #[test]
    fn test_filter_by_category() {
        let library = ContentLibrary::load().unwrap();

        let chalisas = library.scriptures_by_category(ScriptureCategory::Chalisa);
        assert_eq!(chalisas.len(), 1);
        assert_eq!(chalisas[0].id, "hanuman-chalisa");

        let practice = library.dharma_by_category(DharmaCategory::Practice);
        assert!(practice.iter().any(|c| c.id == "japa-practice"));
        assert!(practice.iter().all(|c| c.category == DharmaCategory::Practice));
    }

    #[test]
    fn test_search_scriptures() {
        let library = ContentLibrary::load().unwrap();

        // Matches transliterated title, case-insensitive
        let hits = library.search_scriptures("hanuman");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "hanuman-chalisa");

        // Matches description text
        let hits = library.search_scriptures("Rigveda");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "gayatri-mantra");

        // Empty query matches all
        let hits = library.search_scriptures("   ");
        assert_eq!(hits.len(), library.scripture_count());

        // No match
        assert!(library.search_scriptures("zzzz").is_empty());
    }

    #[test]
    fn test_category_as_str() {
        assert_eq!(ScriptureCategory::Chalisa.as_str(), "Chalisa");
        assert_eq!(DharmaCategory::Deity.as_str(), "Deity");
        assert_eq!(ScriptureCategory::all().len(), 4);
        assert_eq!(DharmaCategory::all().len(), 4);
    }

    #[test]
    fn test_category_from_slug() {
        assert_eq!(
            ScriptureCategory::from_slug("mantra"),
            Some(ScriptureCategory::Mantra)
        );
        assert_eq!(ScriptureCategory::from_slug("Mantra"), None);
        assert_eq!(
            DharmaCategory::from_slug("deity"),
            Some(DharmaCategory::Deity)
        );
        assert_eq!(DharmaCategory::from_slug(""), None);
    }
}
