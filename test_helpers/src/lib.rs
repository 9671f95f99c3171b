//! Test helpers shared across the harness-config workspace.
//!
//! - [`documents`] writes default and custom documents into a scratch
//!   settings directory.
//! - [`env`] mutates the process environment behind a global lock.
//! - [`jail`] runs a closure inside a [`figment::Jail`].

pub mod documents;
pub mod env;
pub mod jail;
