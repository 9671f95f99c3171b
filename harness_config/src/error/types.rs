//! Primary error enum for configuration construction.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::value::ValueKind;

/// Errors that can occur while building the harness configuration.
///
/// Every variant is fatal: construction aborts on the first failure and no
/// partially populated configuration is returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A required document (default, custom, or sample) does not exist.
    #[error("Config file path does not exist: '{path}'")]
    ResourceNotFound {
        /// Path that was expected to reference an existing file.
        path: PathBuf,
    },

    /// The custom document does not carry the JSON extension.
    #[error("only json config files are supported, got '{path}'")]
    UnsupportedFileType {
        /// Offending custom document path.
        path: PathBuf,
    },

    /// Reading a configuration file failed.
    #[error("Configuration file error in '{path}': {source}")]
    File {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The document is not valid JSON or does not have the entry shape.
    #[error("failed to decode '{path}': {source}")]
    Decode {
        /// Path of the document being decoded.
        path: PathBuf,
        /// Decoder error, including the offending key path where known.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The document decoded to an empty or falsy structure.
    #[error("'{path}' is empty or did not contain a json document")]
    EmptyDocument {
        /// Path of the empty document.
        path: PathBuf,
    },

    /// An entry holds a value outside the supported scalar kinds.
    #[error("entry '{key}' in '{path}' is malformed: {message}")]
    MalformedEntry {
        /// Document containing the entry.
        path: PathBuf,
        /// Top-level key of the entry.
        key: String,
        /// Human-readable description of the problem.
        message: String,
    },

    /// The custom document defines keys absent from the default document.
    #[error("{keys:?} key is not supported. Supported keys are {supported:?}")]
    UnsupportedKeys {
        /// Offending keys, sorted.
        keys: Vec<String>,
        /// Every key the default document declares, sorted.
        supported: Vec<String>,
    },

    /// The custom document defines settings absent from the default entry.
    #[error(
        "{settings:?} settings are not supported for '{key}'. Supported settings are {supported:?}"
    )]
    UnsupportedSettings {
        /// Top-level key whose settings were overridden.
        key: String,
        /// Offending settings sub-keys, sorted.
        settings: Vec<String>,
        /// Settings sub-keys the default entry declares, sorted.
        supported: Vec<String>,
    },

    /// Two keys of the default document flatten to the same attribute name.
    #[error("attribute '{name}' is declared more than once (by '{first}' and '{second}')")]
    AttributeCollision {
        /// Flattened attribute name.
        name: String,
        /// Source of the first declaration.
        first: String,
        /// Source of the conflicting declaration.
        second: String,
    },

    /// An effective value does not have the kind the default declares.
    #[error(
        "{} is not supported type {expected}: value {value} has type {actual}",
        qualified_key(.key, .setting.as_deref())
    )]
    TypeMismatch {
        /// Top-level key being merged.
        key: String,
        /// Settings sub-key, when the mismatch is inside `settings`.
        setting: Option<String>,
        /// Kind declared by the default document.
        expected: ValueKind,
        /// Kind of the effective value.
        actual: ValueKind,
        /// Rendered effective value.
        value: String,
    },

    /// A path token could not be substituted.
    #[error("cannot resolve '{token}': the invoking user's {missing} is unknown")]
    UserLookup {
        /// Token found in the value.
        token: &'static str,
        /// Which part of the user context is missing.
        missing: &'static str,
    },

    /// A required attribute is unset or empty.
    #[error("Required attribute {name} is not set")]
    MissingAttribute {
        /// Attribute name.
        name: String,
    },

    /// An attribute exists but holds a different kind.
    #[error("attribute '{name}' holds {actual}, not {expected}")]
    AttributeType {
        /// Attribute name.
        name: String,
        /// Kind requested by the caller.
        expected: ValueKind,
        /// Kind actually stored.
        actual: ValueKind,
    },

    /// An attribute that no document declares was requested.
    #[error("attribute '{name}' is not defined by the default configuration")]
    UnknownAttribute {
        /// Attribute name.
        name: String,
    },

    /// A required directory could not be created.
    #[error("failed to create directory '{path}': {source}")]
    DirectoryCreation {
        /// Directory path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A required directory is still missing after creation.
    #[error("required directory '{path}' for {name} does not exist")]
    MissingDirectory {
        /// Attribute naming the directory.
        name: String,
        /// Directory path.
        path: PathBuf,
    },

    /// Construction failed; carries the pointer to the sample document.
    #[error(
        "Failed to complete setting configuration, {source}{}",
        sample_hint(.sample.as_deref())
    )]
    Construction {
        /// Sample document users can copy from, when configured.
        sample: Option<PathBuf>,
        /// Error raised by the failing stage.
        #[source]
        source: Arc<ConfigError>,
    },
}

fn qualified_key(key: &str, setting: Option<&str>) -> String {
    setting.map_or_else(|| key.to_owned(), |sub| format!("{key}.settings.{sub}"))
}

fn sample_hint(sample: Option<&Path>) -> String {
    sample.map_or_else(String::new, |path| {
        format!(". Sample file is located - {}", path.display())
    })
}
