// 💾 Preferences - The two persisted UI strings
//
// The only state that survives a restart: the selected chant phrase and
// the UI language. Stored as pretty-printed JSON under the platform
// config directory. A missing or corrupt file silently loads defaults —
// preferences are never worth failing startup over.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::i18n::DEFAULT_LANGUAGE;

const PREFS_DIR: &str = "svadhyaya";
const PREFS_FILE: &str = "preferences.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Selected chant phrase for the mala counter
    pub chant_phrase: Option<String>,

    /// UI language tag
    pub language: String,

    /// Last save time
    pub updated_at: DateTime<Utc>,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            chant_phrase: None,
            language: DEFAULT_LANGUAGE.to_string(),
            updated_at: Utc::now(),
        }
    }
}

impl Preferences {
    /// Platform preferences path (~/.config/svadhyaya/preferences.json on
    /// Linux). None when the platform exposes no config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PREFS_DIR).join(PREFS_FILE))
    }

    /// Load from the platform path, defaults when anything is off.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from an explicit path. Missing or unparseable files load
    /// defaults silently.
    pub fn load_from(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(prefs) => prefs,
            Err(_) => Self::default(),
        }
    }

    /// Save to the platform path.
    pub fn save(&mut self) -> Result<()> {
        let path = Self::default_path()
            .context("no platform config directory for preferences")?;
        self.save_to(&path)
    }

    /// Save to an explicit path, creating parent directories.
    pub fn save_to(&mut self, path: &Path) -> Result<()> {
        self.updated_at = Utc::now();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.chant_phrase, None);
        assert_eq!(prefs.language, DEFAULT_LANGUAGE);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let prefs = Preferences::load_from(&dir.path().join("nope.json"));
        assert_eq!(prefs.language, DEFAULT_LANGUAGE);
    }

    #[test]
    fn test_corrupt_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{not json at all").unwrap();

        let prefs = Preferences::load_from(&path);
        assert_eq!(prefs.chant_phrase, None);
        assert_eq!(prefs.language, DEFAULT_LANGUAGE);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        // Nested path: save_to must create parent directories
        let path = dir.path().join("svadhyaya").join("preferences.json");

        let mut prefs = Preferences::default();
        prefs.chant_phrase = Some("ॐ नमः शिवाय".to_string());
        prefs.language = "hi".to_string();
        prefs.save_to(&path).unwrap();

        let reloaded = Preferences::load_from(&path);
        assert_eq!(reloaded.chant_phrase.as_deref(), Some("ॐ नमः शिवाय"));
        assert_eq!(reloaded.language, "hi");
    }
}
