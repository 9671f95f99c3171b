//! Layered configuration loading for automation harnesses.
//!
//! A platform-specific default JSON document declares every supported key,
//! its value kind, and optional `settings`. A custom document named by the
//! `CONFIG` environment variable may override any of those keys, provided it
//! keeps the declared kinds. The merged result is flattened into an
//! immutable attribute set, with `~` and `%USERPROFILE%` tokens resolved and
//! the log, download, and config directories created.
//!
//! ```rust,no_run
//! use harness_config::ConfigurationBuilder;
//!
//! # fn run() -> harness_config::ConfigResult<()> {
//! let config = ConfigurationBuilder::new("settings").build()?;
//! for (name, value) in config.iter() {
//!     tracing::info!(%name, %value, "attribute");
//! }
//! # Ok(())
//! # }
//! ```

mod attributes;
mod configuration;
pub mod document;
pub mod env;
mod error;
pub mod file;
pub mod merge;
mod platform;
mod result_ext;
pub mod runtime;
pub mod schema;
pub mod tokens;
pub mod validate;
mod value;

use std::sync::Arc;

pub use attributes::AttributeSet;
pub use configuration::{Configuration, ConfigurationBuilder, DEFAULT_OVERRIDE_ENV_VAR};
pub use env::{Environment, ProcessEnvironment};
pub use error::ConfigError;
pub use platform::Platform;
pub use result_ext::ConfigResultExt;
pub use tokens::{TokenResolver, UserContext};
pub use value::{Scalar, ValueKind};

/// Result alias for configuration operations.
///
/// Errors are shared behind an [`Arc`] so a stage failure can be wrapped in
/// [`ConfigError::Construction`] and still be inspected through
/// [`ConfigError::root_cause`].
pub type ConfigResult<T> = Result<T, Arc<ConfigError>>;
