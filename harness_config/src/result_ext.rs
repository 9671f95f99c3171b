//! Extensions for mapping errors to `ConfigResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(...))` patterns
//! when converting owned [`ConfigError`] values into the crate's
//! `ConfigResult<T>` alias (`Result<T, Arc<ConfigError>>`).
//!
//! # Examples
//!
//! ```
//! use harness_config::{ConfigError, ConfigResult, ConfigResultExt};
//!
//! fn require(flag: bool) -> ConfigResult<()> {
//!     let outcome: Result<(), ConfigError> = if flag {
//!         Ok(())
//!     } else {
//!         Err(ConfigError::MissingAttribute { name: "logs_path".into() })
//!     };
//!     outcome.into_config()
//! }
//!
//! assert!(require(false).is_err());
//! ```

use crate::{ConfigError, ConfigResult};
use std::sync::Arc;

/// Generic extension for mapping any `Result<T, E>` with `E: Into<ConfigError>`
/// into a `ConfigResult<T>`.
pub trait ConfigResultExt<T, E> {
    /// Convert `Result<T, E>` into `ConfigResult<T>` using `Into<ConfigError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<ConfigError>`.
    fn into_config(self) -> ConfigResult<T>;
}

impl<T, E> ConfigResultExt<T, E> for Result<T, E>
where
    E: Into<ConfigError>,
{
    fn into_config(self) -> ConfigResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
