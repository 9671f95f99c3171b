//! Error constructors shared by document loading helpers.

use crate::ConfigError;

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

/// Construct a [`ConfigError::File`] for a configuration path.
pub(super) fn file_error(
    path: &Path,
    err: impl Into<Box<dyn Error + Send + Sync>>,
) -> Arc<ConfigError> {
    Arc::new(ConfigError::File {
        path: path.to_path_buf(),
        source: err.into(),
    })
}

pub(super) fn decode_error(
    path: &Path,
    err: impl Into<Box<dyn Error + Send + Sync>>,
) -> Arc<ConfigError> {
    Arc::new(ConfigError::Decode {
        path: path.to_path_buf(),
        source: err.into(),
    })
}

pub(super) fn not_found(path: &Path) -> Arc<ConfigError> {
    Arc::new(ConfigError::ResourceNotFound {
        path: path.to_path_buf(),
    })
}

pub(super) fn empty_document(path: &Path) -> Arc<ConfigError> {
    Arc::new(ConfigError::EmptyDocument {
        path: path.to_path_buf(),
    })
}

pub(super) fn malformed_entry(path: &Path, key: &str, message: String) -> Arc<ConfigError> {
    Arc::new(ConfigError::MalformedEntry {
        path: path.to_path_buf(),
        key: key.to_owned(),
        message,
    })
}

pub(super) fn unsupported_file_type(path: &Path) -> Arc<ConfigError> {
    Arc::new(ConfigError::UnsupportedFileType {
        path: path.to_path_buf(),
    })
}
