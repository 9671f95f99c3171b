//! Tests for error rendering and construction wrappers.

use super::*;
use crate::value::ValueKind;
use rstest::rstest;
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn mismatch(setting: Option<&str>) -> ConfigError {
    ConfigError::TypeMismatch {
        key: "Proxy".to_owned(),
        setting: setting.map(str::to_owned),
        expected: ValueKind::Integer,
        actual: ValueKind::Text,
        value: "\"8080\"".to_owned(),
    }
}

#[rstest]
#[case::value(None, "Proxy is not supported type integer")]
#[case::setting(Some("port"), "Proxy.settings.port is not supported type integer")]
fn type_mismatch_names_the_key(#[case] setting: Option<&str>, #[case] prefix: &str) {
    let message = mismatch(setting).to_string();
    assert!(message.starts_with(prefix), "unexpected message: {message}");
    assert!(message.ends_with("value \"8080\" has type text"), "{message}");
}

#[test]
fn construction_message_points_at_the_sample() {
    let stage = Arc::new(ConfigError::MissingAttribute {
        name: "logs_path".to_owned(),
    });
    let err = ConfigError::construction(Some(PathBuf::from("/opt/sample.json")), stage);
    assert_eq!(
        err.to_string(),
        "Failed to complete setting configuration, Required attribute logs_path is not set. \
         Sample file is located - /opt/sample.json"
    );
    assert_eq!(err.sample(), Some(Path::new("/opt/sample.json")));
}

#[test]
fn construction_without_sample_omits_the_hint() {
    let stage = Arc::new(ConfigError::UnknownAttribute {
        name: "bogus".to_owned(),
    });
    let err = ConfigError::construction(None, stage);
    assert!(!err.to_string().contains("Sample file"));
    assert_eq!(err.sample(), None);
}

#[test]
fn root_cause_unwraps_nested_construction() {
    let stage = Arc::new(mismatch(None));
    let inner = Arc::new(ConfigError::construction(None, stage));
    let outer = ConfigError::construction(Some(PathBuf::from("sample.json")), inner);
    assert!(matches!(
        outer.root_cause(),
        ConfigError::TypeMismatch { key, .. } if key == "Proxy"
    ));
}

#[test]
fn root_cause_of_a_stage_error_is_itself() {
    let err = mismatch(Some("port"));
    assert!(std::ptr::eq(err.root_cause(), &err));
}

#[test]
fn unsupported_keys_lists_everything() {
    let err = ConfigError::UnsupportedKeys {
        keys: vec!["bogus_key".to_owned()],
        supported: vec!["retries".to_owned(), "timeout".to_owned()],
    };
    assert_eq!(
        err.to_string(),
        "[\"bogus_key\"] key is not supported. Supported keys are [\"retries\", \"timeout\"]"
    );
}
