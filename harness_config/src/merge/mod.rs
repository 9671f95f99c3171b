//! Merging of the custom document over the default document.
//!
//! # Merging Semantics
//!
//! - **Values** are replaced wholesale: when the custom document defines a
//!   key, its `value` wins.
//! - **Settings** are merged per sub-key: a sub-key the custom entry defines
//!   wins, every other declared sub-key keeps the default.
//! - **Kinds** must match exactly the kind the default document declares,
//!   for values and for each settings sub-value.
//!
//! The result is built into a fresh [`AttributeSet`] and only returned when
//! every key merged successfully.

use std::sync::Arc;

use crate::attributes::AttributeSet;
use crate::document::{ConfigDocument, ConfigEntry};
use crate::schema::DocumentSchema;
use crate::tokens::TokenResolver;
use crate::value::{Scalar, ValueKind};
use crate::{ConfigError, ConfigResult};

/// Merges `custom` over `default`, checking kinds against `schema`.
///
/// `schema` must have been derived from `default`; every key it declares is
/// bound, whether or not the custom document overrides it.
///
/// # Examples
///
/// ```
/// use harness_config::document::{ConfigDocument, ConfigEntry};
/// use harness_config::merge::merge_documents;
/// use harness_config::schema::DocumentSchema;
/// use harness_config::tokens::{TokenResolver, UserContext};
/// use harness_config::Scalar;
///
/// # fn main() -> harness_config::ConfigResult<()> {
/// let default = ConfigDocument::new().with_entry("Timeout", ConfigEntry::new(30_i64.into()));
/// let custom = ConfigDocument::new().with_entry("Timeout", ConfigEntry::new(45_i64.into()));
/// let schema = DocumentSchema::from_default(&default)?;
/// let resolver = TokenResolver::new(UserContext::unknown());
///
/// let merged = merge_documents(&schema, &default, &custom, &resolver)?;
/// assert_eq!(merged.get("timeout"), Some(&Scalar::Integer(45)));
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`ConfigError::TypeMismatch`] for the first key (in sorted order)
/// whose effective value or settings sub-value has the wrong kind, and
/// [`ConfigError::UserLookup`] when token resolution fails.
pub fn merge_documents(
    schema: &DocumentSchema,
    default: &ConfigDocument,
    custom: &ConfigDocument,
    resolver: &TokenResolver,
) -> ConfigResult<AttributeSet> {
    let mut attributes = AttributeSet::new();

    for (key, default_entry) in default.iter() {
        let Some(entry_schema) = schema.entry(key) else {
            continue;
        };
        let override_entry = custom.get(key);
        let effective = override_entry.map_or(&default_entry.value, |entry| &entry.value);

        check_kind(key, None, entry_schema.kind, effective)?;
        attributes.insert(entry_schema.attribute.clone(), resolver.resolve(effective)?);

        for (sub_key, setting_schema) in &entry_schema.settings {
            let Some(sub_value) = effective_setting(sub_key, default_entry, override_entry) else {
                continue;
            };
            check_kind(key, Some(sub_key), setting_schema.kind, sub_value)?;
            attributes.insert(setting_schema.attribute.clone(), resolver.resolve(sub_value)?);
        }
    }

    Ok(attributes)
}

fn effective_setting<'a>(
    sub_key: &str,
    default_entry: &'a ConfigEntry,
    override_entry: Option<&'a ConfigEntry>,
) -> Option<&'a Scalar> {
    override_entry
        .and_then(|entry| entry.settings.get(sub_key))
        .or_else(|| default_entry.settings.get(sub_key))
}

fn check_kind(
    key: &str,
    setting: Option<&str>,
    expected: ValueKind,
    value: &Scalar,
) -> ConfigResult<()> {
    let actual = value.kind();
    if actual == expected {
        return Ok(());
    }
    tracing::debug!(
        key,
        setting,
        %expected,
        %actual,
        %value,
        "rejected override with mismatched kind"
    );
    Err(Arc::new(ConfigError::TypeMismatch {
        key: key.to_owned(),
        setting: setting.map(str::to_owned),
        expected,
        actual,
        value: value.to_string(),
    }))
}

#[cfg(test)]
mod tests;
