//! Flattened attribute namespace produced by merging.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::value::{Scalar, ValueKind};
use crate::{ConfigError, ConfigResult};

/// Merged configuration values keyed by attribute name.
///
/// Names are `lower(key)` for top-level entries and
/// `lower(key)_lower(setting)` for settings sub-values, plus the derived
/// runtime paths.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AttributeSet {
    values: BTreeMap<String, Scalar>,
}

impl AttributeSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Binds `name`, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: Scalar) {
        self.values.insert(name.into(), value);
    }

    /// Looks up an attribute.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Scalar> {
        self.values.get(name)
    }

    /// Returns `true` if `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterates over attributes in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of bound attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns a text attribute.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingAttribute`] when `name` is unbound and
    /// [`ConfigError::AttributeType`] when it holds another kind.
    pub fn text(&self, name: &str) -> ConfigResult<&str> {
        match self.require(name)? {
            Scalar::Text(text) => Ok(text),
            other => Err(type_error(name, ValueKind::Text, other)),
        }
    }

    /// Returns a non-empty text attribute, treating `""` as unset.
    ///
    /// # Errors
    ///
    /// As [`AttributeSet::text`], and [`ConfigError::MissingAttribute`] for
    /// empty text.
    pub fn non_empty_text(&self, name: &str) -> ConfigResult<&str> {
        let text = self.text(name)?;
        if text.is_empty() {
            Err(missing(name))
        } else {
            Ok(text)
        }
    }

    pub(crate) fn require(&self, name: &str) -> ConfigResult<&Scalar> {
        self.values.get(name).ok_or_else(|| missing(name))
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = (&'a String, &'a Scalar);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Scalar>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

pub(crate) fn missing(name: &str) -> Arc<ConfigError> {
    Arc::new(ConfigError::MissingAttribute {
        name: name.to_owned(),
    })
}

pub(crate) fn type_error(name: &str, expected: ValueKind, found: &Scalar) -> Arc<ConfigError> {
    Arc::new(ConfigError::AttributeType {
        name: name.to_owned(),
        expected,
        actual: found.kind(),
    })
}
