//! Persisted language preference.
//!
//! The locale string tables themselves live in the UI layer; the core only
//! owns which language is active and keeps the persisted value sane.

use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;

use shared::Language;

use crate::storage::KeyValueStorage;

/// Storage key of the language preference.
pub const LANGUAGE_KEY: &str = "language";

/// Reads and writes the persisted language code.
#[derive(Clone)]
pub struct LanguageService {
    storage: Arc<dyn KeyValueStorage>,
}

impl LanguageService {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// The active language. A missing key yields the default; an invalid
    /// persisted value is reset to the default on disk and returned as such.
    pub fn language(&self) -> Result<Language> {
        let raw = match self.storage.get(LANGUAGE_KEY)? {
            Some(raw) => raw,
            None => return Ok(Language::default()),
        };

        let code: String = serde_json::from_str(&raw).unwrap_or(raw);
        match Language::from_code(&code) {
            Some(language) => Ok(language),
            None => {
                warn!(
                    "🌐 LANGUAGE: invalid persisted language {:?}, resetting to {}",
                    code,
                    Language::default().code()
                );
                self.set_language(Language::default())?;
                Ok(Language::default())
            }
        }
    }

    /// Persist a new language preference.
    pub fn set_language(&self, language: Language) -> Result<()> {
        let encoded = serde_json::to_string(language.code())?;
        self.storage.set(LANGUAGE_KEY, &encoded)?;
        info!("🌐 LANGUAGE: set language to {}", language.code());
        Ok(())
    }
}
