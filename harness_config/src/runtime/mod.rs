//! Runtime log, download, and config directories.
//!
//! Automation harnesses redirect logs by exporting a results directory. The
//! configured `logs_path` is recorded as `config_path` before any
//! redirection, so `config_path` always names the configured location even
//! when logs end up under the harness results directory.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::attributes::AttributeSet;
use crate::env::Environment;
use crate::value::Scalar;
use crate::{ConfigError, ConfigResult, ConfigResultExt};

/// Attribute holding the effective log directory.
pub const LOGS_PATH: &str = "logs_path";
/// Attribute holding the download directory.
pub const DOWNLOAD_PATH: &str = "download_path";
/// Attribute holding the configured (pre-redirection) log directory.
pub const CONFIG_PATH: &str = "config_path";

/// Directories that must exist once the configuration is built.
pub const REQUIRED_DIRECTORIES: [&str; 3] = [LOGS_PATH, DOWNLOAD_PATH, CONFIG_PATH];

/// Results-directory variables, highest priority first.
pub const RESULTS_DIR_VARS: [&str; 3] = ["ATF_RESULTSDIRECTORY", "TESTRESULTPATH", "BARLI_DEST_PATH"];

/// Directory appended to a harness results directory.
pub const LOGS_SUBDIRECTORY: &str = "Automation_Logs";

/// Returns the redirected log directory, if a harness requested one.
///
/// The first *defined* variable decides: an empty value stops the search
/// without redirecting.
#[must_use]
pub fn results_directory(env: &dyn Environment) -> Option<PathBuf> {
    let (name, value) = RESULTS_DIR_VARS
        .iter()
        .find_map(|name| env.var(name).map(|value| (*name, value)))?;
    if value.is_empty() {
        debug!(variable = name, "results directory variable is empty; keeping logs_path");
        return None;
    }
    Some(Path::new(&value).join(LOGS_SUBDIRECTORY))
}

/// Derives `config_path` and the effective `logs_path`.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use harness_config::{AttributeSet, Scalar};
/// use harness_config::runtime::derive_runtime_paths;
///
/// # fn main() -> harness_config::ConfigResult<()> {
/// let mut attributes = AttributeSet::new();
/// attributes.insert("logs_path", Scalar::from("/var/log/harness"));
/// let env = BTreeMap::from([("TESTRESULTPATH".to_owned(), "/tmp/results".to_owned())]);
///
/// let derived = derive_runtime_paths(attributes, &env)?;
/// assert_eq!(derived.text("config_path")?, "/var/log/harness");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`ConfigError::MissingAttribute`] when `logs_path` is unset or
/// empty and [`ConfigError::AttributeType`] when it is not text.
pub fn derive_runtime_paths(
    mut attributes: AttributeSet,
    env: &dyn Environment,
) -> ConfigResult<AttributeSet> {
    let configured = attributes.non_empty_text(LOGS_PATH)?.to_owned();

    if let Some(redirected) = results_directory(env) {
        let logs = redirected.to_string_lossy().into_owned();
        debug!(configured = %configured, redirected = %logs, "redirecting logs_path");
        attributes.insert(LOGS_PATH, Scalar::Text(logs));
    }
    attributes.insert(CONFIG_PATH, Scalar::Text(configured));
    Ok(attributes)
}

/// Creates every required directory that does not exist yet.
///
/// # Errors
///
/// Returns [`ConfigError::MissingAttribute`] or
/// [`ConfigError::AttributeType`] for an unusable attribute and
/// [`ConfigError::DirectoryCreation`] when creation fails.
pub fn ensure_required_directories(attributes: &AttributeSet) -> ConfigResult<()> {
    for name in REQUIRED_DIRECTORIES {
        let path = Path::new(attributes.non_empty_text(name)?);
        if path.exists() {
            continue;
        }
        std::fs::create_dir_all(path)
            .map_err(|source| ConfigError::DirectoryCreation {
                path: path.to_path_buf(),
                source,
            })
            .into_config()?;
        debug!(attribute = name, path = %path.display(), "created directory");
    }
    Ok(())
}

/// Confirms every required directory exists.
///
/// # Errors
///
/// Returns [`ConfigError::MissingDirectory`] when a path is not a directory,
/// or the attribute errors of [`ensure_required_directories`].
pub fn verify_required_directories(attributes: &AttributeSet) -> ConfigResult<()> {
    for name in REQUIRED_DIRECTORIES {
        let path = Path::new(attributes.non_empty_text(name)?);
        if !path.is_dir() {
            return Err(ConfigError::MissingDirectory {
                name: name.to_owned(),
                path: path.to_path_buf(),
            })
            .into_config();
        }
    }
    Ok(())
}
