//! Unit tests for key-by-key merging and kind checks.

use super::*;
use crate::tokens::UserContext;
use rstest::{fixture, rstest};

#[fixture]
fn default_document() -> ConfigDocument {
    ConfigDocument::new()
        .with_entry("Timeout", ConfigEntry::new(Scalar::Integer(30)))
        .with_entry("home_dir", ConfigEntry::new(Scalar::from("~/data")))
        .with_entry("ratio", ConfigEntry::new(Scalar::Float(0.5)))
        .with_entry(
            "Proxy",
            ConfigEntry::new(Scalar::Boolean(false))
                .with_setting("Host", "localhost")
                .with_setting("port", 8080_i64),
        )
}

#[fixture]
fn resolver() -> TokenResolver {
    TokenResolver::new(UserContext::new("/home/ci", "ci"))
}

fn merge(
    default: &ConfigDocument,
    custom: &ConfigDocument,
    resolver: &TokenResolver,
) -> ConfigResult<AttributeSet> {
    let schema = DocumentSchema::from_default(default)?;
    merge_documents(&schema, default, custom, resolver)
}

#[rstest]
fn defaults_bind_every_declared_attribute(
    default_document: ConfigDocument,
    resolver: TokenResolver,
) {
    let merged = merge(&default_document, &ConfigDocument::new(), &resolver).expect("merge");

    assert_eq!(merged.len(), 6);
    assert_eq!(merged.get("timeout"), Some(&Scalar::Integer(30)));
    assert_eq!(merged.get("home_dir"), Some(&Scalar::from("/home/ci/data")));
    assert_eq!(merged.get("proxy"), Some(&Scalar::Boolean(false)));
    assert_eq!(merged.get("proxy_host"), Some(&Scalar::from("localhost")));
    assert_eq!(merged.get("proxy_port"), Some(&Scalar::Integer(8080)));
}

#[rstest]
fn merging_a_document_with_itself_matches_defaults(
    default_document: ConfigDocument,
    resolver: TokenResolver,
) {
    let only_defaults = merge(&default_document, &ConfigDocument::new(), &resolver).expect("merge");
    let self_merged = merge(&default_document, &default_document, &resolver).expect("merge");
    assert_eq!(only_defaults, self_merged);
}

#[rstest]
fn matching_overrides_win(default_document: ConfigDocument, resolver: TokenResolver) {
    let custom = ConfigDocument::new()
        .with_entry("Timeout", ConfigEntry::new(Scalar::Integer(90)))
        .with_entry("home_dir", ConfigEntry::new(Scalar::from("/srv/%USERPROFILE%")));

    let merged = merge(&default_document, &custom, &resolver).expect("merge");
    assert_eq!(merged.get("timeout"), Some(&Scalar::Integer(90)));
    assert_eq!(merged.get("home_dir"), Some(&Scalar::from("/srv/ci")));
    assert_eq!(merged.get("ratio"), Some(&Scalar::Float(0.5)));
}

#[rstest]
fn settings_merge_per_sub_key(default_document: ConfigDocument, resolver: TokenResolver) {
    let custom = ConfigDocument::new().with_entry(
        "Proxy",
        ConfigEntry::new(Scalar::Boolean(true)).with_setting("port", 3128_i64),
    );

    let merged = merge(&default_document, &custom, &resolver).expect("merge");
    assert_eq!(merged.get("proxy"), Some(&Scalar::Boolean(true)));
    assert_eq!(merged.get("proxy_port"), Some(&Scalar::Integer(3128)));
    assert_eq!(merged.get("proxy_host"), Some(&Scalar::from("localhost")));
}

#[rstest]
fn overriding_the_value_keeps_default_settings(
    default_document: ConfigDocument,
    resolver: TokenResolver,
) {
    let custom =
        ConfigDocument::new().with_entry("Proxy", ConfigEntry::new(Scalar::Boolean(true)));

    let merged = merge(&default_document, &custom, &resolver).expect("merge");
    assert_eq!(merged.get("proxy_host"), Some(&Scalar::from("localhost")));
    assert_eq!(merged.get("proxy_port"), Some(&Scalar::Integer(8080)));
}

#[rstest]
#[case::text_for_integer("Timeout", Scalar::from("30"), ValueKind::Integer, ValueKind::Text)]
#[case::integer_for_float("ratio", Scalar::Integer(1), ValueKind::Float, ValueKind::Integer)]
#[case::boolean_for_integer("Timeout", Scalar::Boolean(true), ValueKind::Integer, ValueKind::Boolean)]
#[case::integer_for_text("home_dir", Scalar::Integer(1), ValueKind::Text, ValueKind::Integer)]
fn mismatched_values_are_rejected(
    default_document: ConfigDocument,
    resolver: TokenResolver,
    #[case] key: &str,
    #[case] value: Scalar,
    #[case] expected_kind: ValueKind,
    #[case] actual_kind: ValueKind,
) {
    let custom = ConfigDocument::new().with_entry(key, ConfigEntry::new(value));

    let err = merge(&default_document, &custom, &resolver).expect_err("mismatch");
    match err.as_ref() {
        ConfigError::TypeMismatch {
            key: found,
            setting,
            expected,
            actual,
            ..
        } => {
            assert_eq!(found, key);
            assert_eq!(setting, &None);
            assert_eq!(*expected, expected_kind);
            assert_eq!(*actual, actual_kind);
        }
        other => panic!("expected TypeMismatch, got {other:?}"),
    }
}

#[rstest]
fn mismatched_settings_name_the_sub_key(
    default_document: ConfigDocument,
    resolver: TokenResolver,
) {
    let custom = ConfigDocument::new().with_entry(
        "Proxy",
        ConfigEntry::new(Scalar::Boolean(true)).with_setting("port", "3128"),
    );

    let err = merge(&default_document, &custom, &resolver).expect_err("mismatch");
    match err.as_ref() {
        ConfigError::TypeMismatch {
            key, setting, value, ..
        } => {
            assert_eq!(key, "Proxy");
            assert_eq!(setting.as_deref(), Some("port"));
            assert_eq!(value, "\"3128\"");
        }
        other => panic!("expected TypeMismatch, got {other:?}"),
    }
    assert!(err.to_string().contains("Proxy.settings.port"));
}

#[rstest]
fn token_failures_abort_the_merge(default_document: ConfigDocument) {
    let resolver = TokenResolver::new(UserContext::unknown());
    let err = merge(&default_document, &ConfigDocument::new(), &resolver).expect_err("lookup");
    assert!(matches!(err.as_ref(), ConfigError::UserLookup { .. }));
}
