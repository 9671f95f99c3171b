//! Explicit per-key schema derived from the default document.
//!
//! The default document is the schema: the kind of each value (and of each
//! settings sub-value) is recorded once, together with the flattened
//! attribute name it binds, so merging compares against a declared kind
//! rather than inspecting a live value.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::Arc;

use crate::document::ConfigDocument;
use crate::value::ValueKind;
use crate::{ConfigError, ConfigResult};

/// Attribute name and declared kind of one settings sub-key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingSchema {
    /// Flattened attribute name, `lower(key)_lower(sub)`.
    pub attribute: String,
    /// Kind declared by the default document.
    pub kind: ValueKind,
}

/// Attribute name, declared kind, and settings of one top-level key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySchema {
    /// Flattened attribute name, `lower(key)`.
    pub attribute: String,
    /// Kind declared by the default document.
    pub kind: ValueKind,
    /// Declared settings keyed by their original sub-key.
    pub settings: BTreeMap<String, SettingSchema>,
}

/// Schema for every key declared by a default document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSchema {
    entries: BTreeMap<String, EntrySchema>,
    attributes: BTreeMap<String, ValueKind>,
}

/// Flattened attribute name of a top-level key.
///
/// ```
/// assert_eq!(harness_config::schema::attribute_name("Logs_Path"), "logs_path");
/// ```
#[must_use]
pub fn attribute_name(key: &str) -> String {
    key.to_lowercase()
}

/// Flattened attribute name of a settings sub-key.
///
/// ```
/// assert_eq!(
///     harness_config::schema::setting_attribute_name("Proxy", "Port"),
///     "proxy_port"
/// );
/// ```
#[must_use]
pub fn setting_attribute_name(key: &str, setting: &str) -> String {
    format!("{}_{}", key.to_lowercase(), setting.to_lowercase())
}

impl DocumentSchema {
    /// Derives the schema from the default document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AttributeCollision`] when two declarations
    /// flatten to the same attribute name, for example `Timeout` and
    /// `timeout`, or a key `proxy_port` next to a `proxy` entry with a `port`
    /// setting.
    pub fn from_default(document: &ConfigDocument) -> ConfigResult<Self> {
        let mut origins: BTreeMap<String, String> = BTreeMap::new();
        let mut schema = Self::default();

        for (key, entry) in document.iter() {
            let attribute = attribute_name(key);
            claim(&mut origins, &attribute, key.to_owned())?;
            schema.attributes.insert(attribute.clone(), entry.value.kind());

            let mut settings = BTreeMap::new();
            for (sub_key, sub_value) in &entry.settings {
                let sub_attribute = setting_attribute_name(key, sub_key);
                claim(&mut origins, &sub_attribute, format!("{key}.settings.{sub_key}"))?;
                schema
                    .attributes
                    .insert(sub_attribute.clone(), sub_value.kind());
                settings.insert(
                    sub_key.clone(),
                    SettingSchema {
                        attribute: sub_attribute,
                        kind: sub_value.kind(),
                    },
                );
            }

            schema.entries.insert(
                key.to_owned(),
                EntrySchema {
                    attribute,
                    kind: entry.value.kind(),
                    settings,
                },
            );
        }
        Ok(schema)
    }

    /// Schema of a top-level key, looked up by its exact spelling.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&EntrySchema> {
        self.entries.get(key)
    }

    /// Iterates over declared keys in sorted order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &EntrySchema)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Declared kind of a flattened attribute.
    #[must_use]
    pub fn attribute_kind(&self, attribute: &str) -> Option<ValueKind> {
        self.attributes.get(attribute).copied()
    }

    /// Iterates over every flattened attribute and its declared kind.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, ValueKind)> {
        self.attributes
            .iter()
            .map(|(name, kind)| (name.as_str(), *kind))
    }

    /// Declares an attribute that is derived after merging rather than read
    /// from the document. The derived kind replaces any declared one because
    /// the derived value overwrites the merged value.
    pub(crate) fn declare_derived(&mut self, attribute: &str, kind: ValueKind) {
        self.attributes.insert(attribute.to_owned(), kind);
    }
}

fn claim(
    origins: &mut BTreeMap<String, String>,
    attribute: &str,
    origin: String,
) -> ConfigResult<()> {
    match origins.entry(attribute.to_owned()) {
        Entry::Vacant(slot) => {
            slot.insert(origin);
            Ok(())
        }
        Entry::Occupied(existing) => Err(Arc::new(ConfigError::AttributeCollision {
            name: attribute.to_owned(),
            first: existing.get().clone(),
            second: origin,
        })),
    }
}
