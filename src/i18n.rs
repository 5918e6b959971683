use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

/// Translates user-facing text. Keys are the English source strings.
pub trait Localizer: Send + Sync {
    fn lang(&self) -> &str;
    fn trans(&self, text: &str) -> String;
}

/// English, returns every key unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct Identity;

impl Localizer for Identity {
    fn lang(&self) -> &str {
        "en"
    }

    fn trans(&self, text: &str) -> String {
        text.to_string()
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read translation catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid translation catalog: {0}")]
    Json(#[from] serde_json::Error),
}

/// Translation table loaded from a flat JSON object of source text to translation.
/// Missing keys fall back to the source text.
#[derive(Clone, Debug)]
pub struct Catalog {
    lang: String,
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn new<I>(lang: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self { lang: lang.into(), entries: entries.into_iter().collect() }
    }

    pub fn from_json_str(lang: impl Into<String>, raw: &str) -> Result<Self, CatalogError> {
        let entries: HashMap<String, String> = serde_json::from_str(raw)?;
        Ok(Self { lang: lang.into(), entries })
    }

    pub fn load(lang: impl Into<String>, path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(lang, &raw)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Localizer for Catalog {
    fn lang(&self) -> &str {
        &self.lang
    }

    fn trans(&self, text: &str) -> String {
        match self.entries.get(text) {
            Some(translated) if !translated.is_empty() => translated.clone(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_translates_known_keys_and_falls_back() {
        let catalog = Catalog::from_json_str("cs", r#"{"Save changes": "Uložit změny", "Empty": ""}"#).unwrap();
        assert_eq!(catalog.lang(), "cs");
        assert_eq!(catalog.trans("Save changes"), "Uložit změny");
        assert_eq!(catalog.trans("Discard changes"), "Discard changes");
        assert_eq!(catalog.trans("Empty"), "Empty");
    }

    #[test]
    fn catalog_rejects_non_object_json() {
        assert!(matches!(Catalog::from_json_str("cs", "[1, 2]"), Err(CatalogError::Json(_))));
    }

    #[test]
    fn missing_catalog_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Catalog::load("cs", dir.path().join("missing.json"));
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }

    #[test]
    fn identity_is_english() {
        assert_eq!(Identity.lang(), "en");
        assert_eq!(Identity.trans("Save changes"), "Save changes");
    }
}
