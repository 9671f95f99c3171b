//! Runtime loading entrypoints for configuration documents.

use std::path::Path;

use tracing::debug;

use crate::ConfigResult;
use crate::document::ConfigDocument;

use super::error::{file_error, not_found, unsupported_file_type};
use super::parser::parse_document;

/// Fail with [`crate::ConfigError::ResourceNotFound`] unless `path` is an
/// existing regular file.
///
/// # Errors
///
/// Returns an error when the path is empty, missing, or not a file.
pub fn require_file(path: &Path) -> ConfigResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(not_found(path))
    }
}

/// Fail with [`crate::ConfigError::UnsupportedFileType`] unless `path` has a
/// `json` extension (compared case-insensitively).
///
/// ```
/// use std::path::Path;
/// use harness_config::file::ensure_json_extension;
///
/// assert!(ensure_json_extension(Path::new("custom.json")).is_ok());
/// assert!(ensure_json_extension(Path::new("custom.toml")).is_err());
/// ```
///
/// # Errors
///
/// Returns an error when the extension is missing or not `json`.
pub fn ensure_json_extension(path: &Path) -> ConfigResult<()> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        Ok(())
    } else {
        Err(unsupported_file_type(path))
    }
}

/// Load a configuration document.
///
/// Loading is all-or-nothing: either every entry decodes into a supported
/// scalar or an error is returned.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
/// use harness_config::file::load_document;
///
/// # fn run() -> harness_config::ConfigResult<()> {
/// let document = load_document(Path::new("settings/default_Linux_configuration.json"))?;
/// assert!(!document.is_empty());
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`crate::ConfigError::ResourceNotFound`] for a missing file,
/// [`crate::ConfigError::File`] when reading fails, and the decoding errors
/// described on the parser.
pub fn load_document(path: &Path) -> ConfigResult<ConfigDocument> {
    require_file(path)?;
    let data = std::fs::read_to_string(path).map_err(|e| file_error(path, e))?;
    let document = parse_document(path, &data)?;
    debug!(
        path = %path.display(),
        entries = document.len(),
        "loaded configuration document"
    );
    Ok(document)
}
