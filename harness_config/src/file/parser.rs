//! JSON decoding of configuration documents.

use std::collections::BTreeMap;
use std::path::Path;

use figment::{
    Figment,
    providers::{Format, Json},
};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::ConfigResult;
use crate::document::{ConfigDocument, ConfigEntry};
use crate::value::Scalar;

use super::error::{decode_error, empty_document, malformed_entry};

/// Shape of one entry before its values are narrowed to scalars.
#[derive(Debug, Deserialize)]
struct RawEntry {
    value: JsonValue,
    #[serde(default)]
    settings: Option<BTreeMap<String, JsonValue>>,
}

/// Mirrors the truthiness rules the documents were historically checked with.
fn is_falsy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::Bool(flag) => !flag,
        JsonValue::Number(number) => number.as_f64().is_some_and(|n| n == 0.0),
        JsonValue::String(text) => text.is_empty(),
        JsonValue::Array(items) => items.is_empty(),
        JsonValue::Object(map) => map.is_empty(),
    }
}

fn narrow_entry(path: &Path, key: &str, raw: RawEntry) -> ConfigResult<ConfigEntry> {
    let value = Scalar::from_json(&raw.value)
        .map_err(|message| malformed_entry(path, key, format!("value: {message}")))?;
    let mut entry = ConfigEntry::new(value);
    for (sub_key, raw_value) in raw.settings.unwrap_or_default() {
        let sub_value = Scalar::from_json(&raw_value).map_err(|message| {
            malformed_entry(path, key, format!("settings.{sub_key}: {message}"))
        })?;
        entry.settings.insert(sub_key, sub_value);
    }
    Ok(entry)
}

/// Parse a JSON document into a [`ConfigDocument`].
///
/// The text is validated with `serde_json` first so syntax errors and falsy
/// documents are reported against this file before Figment decodes the
/// entry shape (and names the offending key on failure).
///
/// # Errors
///
/// Returns [`crate::ConfigError::Decode`] for invalid JSON or a wrong entry
/// shape, [`crate::ConfigError::EmptyDocument`] for falsy content, and
/// [`crate::ConfigError::MalformedEntry`] for unsupported value kinds.
pub(super) fn parse_document(path: &Path, data: &str) -> ConfigResult<ConfigDocument> {
    let probe: JsonValue = serde_json::from_str(data).map_err(|e| decode_error(path, e))?;
    if is_falsy(&probe) {
        return Err(empty_document(path));
    }

    let raw: BTreeMap<String, RawEntry> = Figment::from(Json::string(data))
        .extract()
        .map_err(|e| decode_error(path, e))?;

    raw.into_iter()
        .map(|(key, entry)| narrow_entry(path, &key, entry).map(|narrowed| (key, narrowed)))
        .collect()
}
