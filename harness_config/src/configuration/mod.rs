//! Builder and immutable handle for the merged harness configuration.
//!
//! [`ConfigurationBuilder::build`] runs every stage once, in order:
//!
//! 1. locate the platform default document (and the sample, when set);
//! 2. resolve the custom document from the override variable, falling back
//!    to the default document;
//! 3. require the custom document to be JSON;
//! 4. load both documents and derive the schema from the default;
//! 5. reject override keys the default does not declare;
//! 6. merge, resolving user tokens;
//! 7. derive `config_path` and the effective `logs_path`;
//! 8. create and verify the required directories.
//!
//! Any failure is wrapped in [`ConfigError::Construction`] so callers can
//! point users at the sample document.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{error, info};

use crate::attributes::{AttributeSet, missing, type_error};
use crate::env::{Environment, ProcessEnvironment};
use crate::file::{ensure_json_extension, load_document, require_file};
use crate::merge::merge_documents;
use crate::platform::Platform;
use crate::runtime::{
    CONFIG_PATH, DOWNLOAD_PATH, LOGS_PATH, REQUIRED_DIRECTORIES, derive_runtime_paths,
    ensure_required_directories, verify_required_directories,
};
use crate::schema::DocumentSchema;
use crate::tokens::{TokenResolver, UserContext};
use crate::validate::validate_override_keys;
use crate::value::{Scalar, ValueKind};
use crate::{ConfigError, ConfigResult};

/// Environment variable naming the custom document unless overridden.
pub const DEFAULT_OVERRIDE_ENV_VAR: &str = "CONFIG";

/// Builder for [`Configuration`].
///
/// # Examples
///
/// ```rust,no_run
/// use harness_config::ConfigurationBuilder;
///
/// # fn run() -> harness_config::ConfigResult<()> {
/// let config = ConfigurationBuilder::new("settings")
///     .sample_path("settings/sample_configuration.json")
///     .build()?;
/// let timeout = config.integer("timeout")?;
/// # let _ = timeout;
/// # Ok(())
/// # }
/// ```
pub struct ConfigurationBuilder {
    settings_dir: PathBuf,
    platform: Platform,
    sample_path: Option<PathBuf>,
    override_env_var: String,
    environment: Box<dyn Environment>,
    user_context: Option<UserContext>,
}

impl fmt::Debug for ConfigurationBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurationBuilder")
            .field("settings_dir", &self.settings_dir)
            .field("platform", &self.platform)
            .field("sample_path", &self.sample_path)
            .field("override_env_var", &self.override_env_var)
            .field("user_context", &self.user_context)
            .finish_non_exhaustive()
    }
}

impl ConfigurationBuilder {
    /// Creates a builder reading default documents from `settings_dir`.
    ///
    /// The builder targets [`Platform::current`], reads the process
    /// environment, and consults [`DEFAULT_OVERRIDE_ENV_VAR`].
    #[must_use]
    pub fn new(settings_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings_dir: settings_dir.into(),
            platform: Platform::current(),
            sample_path: None,
            override_env_var: String::from(DEFAULT_OVERRIDE_ENV_VAR),
            environment: Box::new(ProcessEnvironment),
            user_context: None,
        }
    }

    /// Selects the platform whose default document is loaded.
    #[must_use]
    pub const fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Sets the sample document that must exist and is named in errors.
    #[must_use]
    pub fn sample_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.sample_path = Some(path.into());
        self
    }

    /// Sets the environment variable naming the custom document.
    #[must_use]
    pub fn override_env_var(mut self, name: impl Into<String>) -> Self {
        self.override_env_var = name.into();
        self
    }

    /// Replaces the environment consulted for the override path, the
    /// results directory, and (unless set explicitly) the user context.
    #[must_use]
    pub fn environment(mut self, environment: impl Environment + 'static) -> Self {
        self.environment = Box::new(environment);
        self
    }

    /// Fixes the user context used for token resolution.
    #[must_use]
    pub fn user_context(mut self, context: UserContext) -> Self {
        self.user_context = Some(context);
        self
    }

    /// Loads, validates, and merges the documents.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Construction`] wrapping the first stage
    /// failure; [`ConfigError::root_cause`] exposes it.
    pub fn build(self) -> ConfigResult<Configuration> {
        let sample = self.sample_path.clone();
        self.assemble().map_err(|err| {
            let hint = sample
                .as_deref()
                .map_or_else(|| String::from("<none>"), |path| path.display().to_string());
            error!(error = %err, sample = %hint, "failed to complete setting configuration");
            Arc::new(ConfigError::construction(sample, err))
        })
    }

    fn assemble(self) -> ConfigResult<Configuration> {
        let env = self.environment.as_ref();

        let default_path = self
            .settings_dir
            .join(self.platform.default_document_name());
        require_file(&default_path)?;
        if let Some(sample) = self.sample_path.as_deref() {
            require_file(sample)?;
        }

        let override_path = env
            .var(&self.override_env_var)
            .map(PathBuf::from);
        let overridden = override_path.is_some();
        let custom_path = override_path.unwrap_or_else(|| default_path.clone());
        require_file(&custom_path)?;
        ensure_json_extension(&custom_path)?;

        let default = load_document(&default_path)?;
        let custom = if overridden {
            load_document(&custom_path)?
        } else {
            default.clone()
        };
        let mut schema = DocumentSchema::from_default(&default)?;
        for name in REQUIRED_DIRECTORIES {
            schema.declare_derived(name, ValueKind::Text);
        }

        validate_override_keys(&default, &custom)?;

        let context = self
            .user_context
            .unwrap_or_else(|| UserContext::from_environment(env));
        let resolver = TokenResolver::new(context);
        let merged = merge_documents(&schema, &default, &custom, &resolver)?;

        let attributes = derive_runtime_paths(merged, env)?;
        ensure_required_directories(&attributes)?;
        verify_required_directories(&attributes)?;

        let logs_path = Utf8PathBuf::from(attributes.non_empty_text(LOGS_PATH)?);
        let download_path = Utf8PathBuf::from(attributes.non_empty_text(DOWNLOAD_PATH)?);
        let config_path = Utf8PathBuf::from(attributes.non_empty_text(CONFIG_PATH)?);
        info!(path = %logs_path, "logs path");
        info!(path = %download_path, "downloads path");
        info!(path = %config_path, "config path");

        Ok(Configuration {
            attributes,
            schema,
            platform: self.platform,
            default_path,
            custom_path,
            sample_path: self.sample_path,
            overridden,
            logs_path,
            download_path,
            config_path,
        })
    }
}

/// Immutable merged configuration.
///
/// Built once by [`ConfigurationBuilder::build`] and shared by reference;
/// the handle is `Send + Sync` and never changes after construction.
#[derive(Debug, Clone)]
pub struct Configuration {
    attributes: AttributeSet,
    schema: DocumentSchema,
    platform: Platform,
    default_path: PathBuf,
    custom_path: PathBuf,
    sample_path: Option<PathBuf>,
    overridden: bool,
    logs_path: Utf8PathBuf,
    download_path: Utf8PathBuf,
    config_path: Utf8PathBuf,
}

impl Configuration {
    /// Creates a builder; shorthand for [`ConfigurationBuilder::new`].
    #[must_use]
    pub fn builder(settings_dir: impl Into<PathBuf>) -> ConfigurationBuilder {
        ConfigurationBuilder::new(settings_dir)
    }

    /// Looks up an attribute declared by the default document or derived
    /// at runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownAttribute`] for undeclared names.
    pub fn get(&self, name: &str) -> ConfigResult<&Scalar> {
        if self.schema.attribute_kind(name).is_none() {
            return Err(Arc::new(ConfigError::UnknownAttribute {
                name: name.to_owned(),
            }));
        }
        self.attributes.get(name).ok_or_else(|| missing(name))
    }

    /// Returns a text attribute.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownAttribute`] for undeclared names and
    /// [`ConfigError::AttributeType`] for other kinds.
    pub fn text(&self, name: &str) -> ConfigResult<&str> {
        match self.get(name)? {
            Scalar::Text(text) => Ok(text),
            other => Err(type_error(name, ValueKind::Text, other)),
        }
    }

    /// Returns an integer attribute.
    ///
    /// # Errors
    ///
    /// As [`Configuration::text`].
    pub fn integer(&self, name: &str) -> ConfigResult<i64> {
        match self.get(name)? {
            Scalar::Integer(number) => Ok(*number),
            other => Err(type_error(name, ValueKind::Integer, other)),
        }
    }

    /// Returns a float attribute.
    ///
    /// # Errors
    ///
    /// As [`Configuration::text`].
    pub fn float(&self, name: &str) -> ConfigResult<f64> {
        match self.get(name)? {
            Scalar::Float(number) => Ok(*number),
            other => Err(type_error(name, ValueKind::Float, other)),
        }
    }

    /// Returns a boolean attribute.
    ///
    /// # Errors
    ///
    /// As [`Configuration::text`].
    pub fn boolean(&self, name: &str) -> ConfigResult<bool> {
        match self.get(name)? {
            Scalar::Boolean(flag) => Ok(*flag),
            other => Err(type_error(name, ValueKind::Boolean, other)),
        }
    }

    /// Returns a text attribute as a path.
    ///
    /// # Errors
    ///
    /// As [`Configuration::text`].
    pub fn path(&self, name: &str) -> ConfigResult<Utf8PathBuf> {
        self.text(name).map(Utf8PathBuf::from)
    }

    /// Effective log directory, redirected under a harness results
    /// directory when one was exported.
    #[must_use]
    pub fn logs_path(&self) -> &Utf8Path {
        &self.logs_path
    }

    /// Download directory.
    #[must_use]
    pub fn download_path(&self) -> &Utf8Path {
        &self.download_path
    }

    /// Log directory as configured, before any redirection.
    #[must_use]
    pub fn config_path(&self) -> &Utf8Path {
        &self.config_path
    }

    /// Every bound attribute.
    #[must_use]
    pub const fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    /// Iterates over attributes in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.attributes.iter()
    }

    /// Platform whose default document was loaded.
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Path of the default document.
    #[must_use]
    pub fn default_path(&self) -> &Path {
        &self.default_path
    }

    /// Path of the custom document; equals [`Configuration::default_path`]
    /// when no override was supplied.
    #[must_use]
    pub fn custom_path(&self) -> &Path {
        &self.custom_path
    }

    /// Sample document, when configured.
    #[must_use]
    pub fn sample_path(&self) -> Option<&Path> {
        self.sample_path.as_deref()
    }

    /// Returns `true` when the override variable named a custom document.
    #[must_use]
    pub const fn is_overridden(&self) -> bool {
        self.overridden
    }

    /// Schema derived from the default document.
    #[must_use]
    pub const fn schema(&self) -> &DocumentSchema {
        &self.schema
    }
}

impl<'a> IntoIterator for &'a Configuration {
    type Item = (&'a String, &'a Scalar);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Scalar>;

    fn into_iter(self) -> Self::IntoIter {
        (&self.attributes).into_iter()
    }
}
