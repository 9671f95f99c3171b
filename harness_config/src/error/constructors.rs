//! Constructors and inspection helpers for `ConfigError`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::ConfigError;

impl ConfigError {
    /// Returns the stage error underneath any [`ConfigError::Construction`]
    /// wrappers.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use harness_config::ConfigError;
    ///
    /// let stage = Arc::new(ConfigError::MissingAttribute { name: "logs_path".into() });
    /// let err = ConfigError::construction(None, stage);
    /// assert!(matches!(err.root_cause(), ConfigError::MissingAttribute { .. }));
    /// ```
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        let mut current = self;
        while let Self::Construction { source, .. } = current {
            current = source.as_ref();
        }
        current
    }

    /// Wraps a stage failure together with the sample document pointer.
    #[must_use]
    pub const fn construction(sample: Option<PathBuf>, source: Arc<Self>) -> Self {
        Self::Construction { sample, source }
    }

    /// Returns the sample document pointer carried by a construction failure.
    #[must_use]
    pub fn sample(&self) -> Option<&Path> {
        match self {
            Self::Construction { sample, .. } => sample.as_deref(),
            _ => None,
        }
    }
}
