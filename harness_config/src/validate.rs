//! Override key validation.
//!
//! Runs before merging so a typo in the custom document fails fast with the
//! full list of keys the default document supports.

use std::sync::Arc;

use crate::document::ConfigDocument;
use crate::{ConfigError, ConfigResult};

/// Ensures the custom document only overrides keys (and settings sub-keys)
/// the default document declares.
///
/// # Examples
///
/// ```
/// use harness_config::document::{ConfigDocument, ConfigEntry};
/// use harness_config::validate::validate_override_keys;
///
/// let default = ConfigDocument::new().with_entry("timeout", ConfigEntry::new(30_i64.into()));
/// let custom = ConfigDocument::new().with_entry("bogus_key", ConfigEntry::new(1_i64.into()));
/// assert!(validate_override_keys(&default, &custom).is_err());
/// ```
///
/// # Errors
///
/// Returns [`ConfigError::UnsupportedKeys`] listing every unknown key, or
/// [`ConfigError::UnsupportedSettings`] for the first overridden entry whose
/// settings name sub-keys the default entry lacks.
pub fn validate_override_keys(default: &ConfigDocument, custom: &ConfigDocument) -> ConfigResult<()> {
    let unknown: Vec<String> = custom
        .keys()
        .filter(|key| !default.contains_key(key))
        .map(str::to_owned)
        .collect();
    if !unknown.is_empty() {
        return Err(Arc::new(ConfigError::UnsupportedKeys {
            keys: unknown,
            supported: default.keys().map(str::to_owned).collect(),
        }));
    }

    for (key, custom_entry) in custom.iter() {
        let Some(default_entry) = default.get(key) else {
            continue;
        };
        let unknown_settings: Vec<String> = custom_entry
            .settings
            .keys()
            .filter(|sub_key| !default_entry.settings.contains_key(sub_key.as_str()))
            .cloned()
            .collect();
        if !unknown_settings.is_empty() {
            return Err(Arc::new(ConfigError::UnsupportedSettings {
                key: key.to_owned(),
                settings: unknown_settings,
                supported: default_entry.settings.keys().cloned().collect(),
            }));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ConfigEntry;
    use crate::value::Scalar;
    use rstest::{fixture, rstest};

    #[fixture]
    fn default_document() -> ConfigDocument {
        ConfigDocument::new()
            .with_entry("timeout", ConfigEntry::new(Scalar::Integer(30)))
            .with_entry(
                "proxy",
                ConfigEntry::new(Scalar::Boolean(false)).with_setting("host", "localhost"),
            )
    }

    #[rstest]
    fn subset_overrides_are_accepted(default_document: ConfigDocument) {
        let custom = ConfigDocument::new().with_entry(
            "proxy",
            ConfigEntry::new(Scalar::Boolean(true)).with_setting("host", "proxy.local"),
        );
        assert!(validate_override_keys(&default_document, &custom).is_ok());
    }

    #[rstest]
    fn identical_documents_are_accepted(default_document: ConfigDocument) {
        assert!(validate_override_keys(&default_document, &default_document).is_ok());
    }

    #[rstest]
    fn unknown_keys_are_listed_with_supported_keys(default_document: ConfigDocument) {
        let custom = ConfigDocument::new()
            .with_entry("zeta", ConfigEntry::new(Scalar::Integer(1)))
            .with_entry("bogus_key", ConfigEntry::new(Scalar::Integer(1)))
            .with_entry("timeout", ConfigEntry::new(Scalar::Integer(5)));

        let err = validate_override_keys(&default_document, &custom).expect_err("unknown keys");
        match err.as_ref() {
            ConfigError::UnsupportedKeys { keys, supported } => {
                assert_eq!(keys, &["bogus_key", "zeta"]);
                assert_eq!(supported, &["proxy", "timeout"]);
            }
            other => panic!("expected UnsupportedKeys, got {other:?}"),
        }
    }

    #[rstest]
    fn keys_are_case_sensitive(default_document: ConfigDocument) {
        let custom = ConfigDocument::new().with_entry("Timeout", ConfigEntry::new(Scalar::Integer(5)));
        let err = validate_override_keys(&default_document, &custom).expect_err("case differs");
        assert!(matches!(err.as_ref(), ConfigError::UnsupportedKeys { .. }));
    }

    #[rstest]
    fn unknown_settings_are_rejected(default_document: ConfigDocument) {
        let custom = ConfigDocument::new().with_entry(
            "proxy",
            ConfigEntry::new(Scalar::Boolean(true)).with_setting("port", 8080_i64),
        );

        let err = validate_override_keys(&default_document, &custom).expect_err("unknown setting");
        match err.as_ref() {
            ConfigError::UnsupportedSettings {
                key,
                settings,
                supported,
            } => {
                assert_eq!(key, "proxy");
                assert_eq!(settings, &["port"]);
                assert_eq!(supported, &["host"]);
            }
            other => panic!("expected UnsupportedSettings, got {other:?}"),
        }
    }
}
