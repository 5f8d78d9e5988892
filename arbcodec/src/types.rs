//! Core, format-agnostic types for arbcodec.
//! The CSV and ARB adapters decode into these; encoders serialize these.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Display,
};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The normalized localization model every conversion passes through.
///
/// Locales are kept lower-case and in lexical order, so the column and document
/// order of any serialization derived from a catalog is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Catalog {
    /// All locales known to this catalog.
    pub locales: BTreeSet<String>,

    /// Entries keyed by their (unique, non-empty) key name.
    pub entries: BTreeMap<String, Entry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a locale. The id is lower-cased; registering it twice is an error.
    pub fn add_locale(&mut self, locale: &str) -> Result<(), Error> {
        let locale = locale.to_lowercase();
        if self.locales.contains(&locale) {
            return Err(Error::DuplicateLocale {
                first: locale.clone(),
                second: locale.clone(),
                locale,
            });
        }
        self.locales.insert(locale);
        Ok(())
    }

    pub fn has_locale(&self, locale: &str) -> bool {
        self.locales.contains(&locale.to_lowercase())
    }

    /// Adds a new entry under `key`.
    pub fn insert_entry(&mut self, key: impl Into<String>, entry: Entry) -> Result<(), Error> {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return Err(Error::DuplicateKey { key });
        }
        self.entries.insert(key, entry);
        Ok(())
    }

    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// Fails with [`Error::MissingDefaultLocale`] unless `locale` is one of the catalog's locales.
    pub fn ensure_default_locale(&self, locale: &str) -> Result<(), Error> {
        if self.has_locale(locale) {
            Ok(())
        } else {
            Err(Error::MissingDefaultLocale {
                locale: locale.to_lowercase(),
            })
        }
    }

    /// Checks the structural invariants a hand-built catalog may violate:
    /// empty key names and translations for locales the catalog does not list.
    pub fn validate(&self) -> Result<(), Error> {
        for (key, entry) in &self.entries {
            if key.is_empty() {
                return Err(Error::UnnamedEntry);
            }
            if let Some(locale) = entry
                .translations
                .keys()
                .find(|locale| !self.locales.contains(*locale))
            {
                return Err(Error::UnknownLocale {
                    key: key.clone(),
                    locale: locale.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Display for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Catalog {{ locales: [{}], entries: {} }}",
            self.locales.iter().cloned().collect::<Vec<_>>().join(", "),
            self.entries.len()
        )
    }
}

/// One translatable key's full record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Entry {
    /// Description for translators. Only the default locale's metadata feeds this.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Locale → translated text. A missing locale is an absent key; an empty
    /// string is an explicit (untranslated) value.
    pub translations: BTreeMap<String, String>,

    /// Named placeholders used by the translations.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub parameters: BTreeSet<String>,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translation(&self, locale: &str) -> Option<&str> {
        self.translations.get(locale).map(String::as_str)
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Entry {{ description: {:?}, translations: {}, parameters: [{}] }}",
            self.description,
            self.translations.len(),
            self.parameters.iter().cloned().collect::<Vec<_>>().join(", ")
        )
    }
}
