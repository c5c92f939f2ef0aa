// Svadhyaya - Devotional Content Browser - Core Library
// Exposes all modules for use in the TUI binary, API server, and tests

pub mod content;
pub mod counter;
pub mod export;
pub mod i18n;
pub mod prefs;
pub mod reader;

// Re-export commonly used types
pub use content::{
    ContentLibrary, DharmaCard, DharmaCategory, Scripture, ScriptureCategory, Verse,
};
pub use counter::{MalaCounter, CHANT_PHRASES, MALA_SIZE};
pub use export::export_scripture;
pub use i18n::{Translations, DEFAULT_LANGUAGE};
pub use prefs::Preferences;
pub use reader::{FlipDirection, ReaderSession, ReaderView};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
