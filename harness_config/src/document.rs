//! In-memory representation of default and custom documents.

use std::collections::BTreeMap;

use crate::value::Scalar;

/// One top-level entry: a primary value plus optional named settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigEntry {
    /// Primary value; its kind is authoritative in the default document.
    pub value: Scalar,
    /// Settings sub-values keyed by sub-key; empty when the entry has none.
    pub settings: BTreeMap<String, Scalar>,
}

impl ConfigEntry {
    /// Creates an entry without settings.
    #[must_use]
    pub const fn new(value: Scalar) -> Self {
        Self {
            value,
            settings: BTreeMap::new(),
        }
    }

    /// Adds a settings sub-value, replacing any previous one.
    #[must_use]
    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }
}

/// A decoded configuration document keyed by case-sensitive entry name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument {
    entries: BTreeMap<String, ConfigEntry>,
}

impl ConfigDocument {
    /// Creates an empty document.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Inserts an entry, returning the document for chaining.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, entry: ConfigEntry) -> Self {
        self.entries.insert(key.into(), entry);
        self
    }

    /// Looks up an entry by its exact key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigEntry> {
        self.entries.get(key)
    }

    /// Returns `true` if `key` is defined.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates over keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over entries in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the document has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, ConfigEntry)> for ConfigDocument {
    fn from_iter<I: IntoIterator<Item = (String, ConfigEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
