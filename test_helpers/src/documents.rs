//! Writers for default and custom configuration documents.
//!
//! A [`SettingsDir`] wraps a scratch directory and fills in the
//! `logs_path` and `download_path` entries every default document needs, so
//! tests only spell out the keys they exercise.
//!
//! # Examples
//!
//! ```no_run
//! use serde_json::json;
//! use harness_config_test_helpers::documents::SettingsDir;
//!
//! # fn main() -> anyhow::Result<()> {
//! let dir = SettingsDir::new("/tmp/settings");
//! dir.write_default("default_Linux_configuration.json", &json!({
//!     "timeout": {"value": 30}
//! }))?;
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Value, json};

/// Scratch directory holding configuration documents.
#[derive(Debug, Clone)]
pub struct SettingsDir {
    root: Utf8PathBuf,
}

impl SettingsDir {
    /// Wraps `root`; nothing is created until a document is written.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory documents are written to.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Log directory the default document declares unless overridden.
    #[must_use]
    pub fn logs_dir(&self) -> Utf8PathBuf {
        self.root.join("logs")
    }

    /// Download directory the default document declares unless overridden.
    #[must_use]
    pub fn downloads_dir(&self) -> Utf8PathBuf {
        self.root.join("downloads")
    }

    /// Writes `body` verbatim to `name`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Fails when the directory or file cannot be written.
    pub fn write(&self, name: &str, body: &str) -> Result<Utf8PathBuf> {
        std::fs::create_dir_all(&self.root)
            .with_context(|| format!("create settings directory {}", self.root))?;
        let path = self.root.join(name);
        std::fs::write(&path, body).with_context(|| format!("write {path}"))?;
        Ok(path)
    }

    /// Writes a JSON document to `name`.
    ///
    /// # Errors
    ///
    /// Fails when serialisation or writing fails.
    pub fn write_json(&self, name: &str, document: &Value) -> Result<Utf8PathBuf> {
        let body = serde_json::to_string_pretty(document).context("serialise document")?;
        self.write(name, &body)
    }

    /// Writes a default document, adding `logs_path` and `download_path`
    /// entries pointing inside the settings directory when `entries` does
    /// not declare them.
    ///
    /// # Errors
    ///
    /// Fails when `entries` is not a JSON object or writing fails.
    pub fn write_default(&self, name: &str, entries: &Value) -> Result<Utf8PathBuf> {
        let Value::Object(declared) = entries else {
            bail!("default document entries must be a JSON object, got {entries}");
        };
        let mut document = declared.clone();
        document
            .entry("logs_path")
            .or_insert_with(|| json!({ "value": self.logs_dir().as_str() }));
        document
            .entry("download_path")
            .or_insert_with(|| json!({ "value": self.downloads_dir().as_str() }));
        self.write_json(name, &Value::Object(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::ensure;
    use tempfile::TempDir;

    fn scratch() -> Result<(TempDir, SettingsDir)> {
        let scratch = TempDir::new()?;
        let root = Utf8PathBuf::from_path_buf(scratch.path().join("settings"))
            .map_err(|path| anyhow::anyhow!("non UTF-8 temp dir {}", path.display()))?;
        Ok((scratch, SettingsDir::new(root)))
    }

    #[test]
    fn default_documents_gain_required_paths() -> Result<()> {
        let (_scratch, dir) = scratch()?;
        let path = dir.write_default(
            "default_Linux_configuration.json",
            &json!({ "timeout": { "value": 30 } }),
        )?;
        let written: Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        ensure!(written["timeout"]["value"] == json!(30), "timeout lost");
        ensure!(
            written["logs_path"]["value"] == json!(dir.logs_dir().as_str()),
            "logs_path missing"
        );
        ensure!(
            written["download_path"]["value"] == json!(dir.downloads_dir().as_str()),
            "download_path missing"
        );
        Ok(())
    }

    #[test]
    fn declared_paths_are_kept() -> Result<()> {
        let (_scratch, dir) = scratch()?;
        let path = dir.write_default(
            "default.json",
            &json!({ "logs_path": { "value": "~/logs" } }),
        )?;
        let written: Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        ensure!(written["logs_path"]["value"] == json!("~/logs"), "logs_path replaced");
        Ok(())
    }

    #[test]
    fn non_object_entries_are_rejected() -> Result<()> {
        let (_scratch, dir) = scratch()?;
        ensure!(dir.write_default("default.json", &json!([1, 2])).is_err());
        Ok(())
    }
}
