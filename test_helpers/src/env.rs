//! Scoped mutation of the process environment for tests.
//!
//! Every mutation holds a global re-entrant lock and returns a guard that
//! restores the previous value (or removes the variable) when dropped.
//! Guards for the same key restore in LIFO order.
//!
//! ```
//! use harness_config_test_helpers::env;
//!
//! let _scope = env::HarnessEnv::isolated();
//! let _guard = env::set_var("CONFIG", "/tmp/custom.json");
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Variables the configuration loader reads to choose documents and
/// redirect logs.
pub const HARNESS_VARS: [&str; 4] = [
    "CONFIG",
    "ATF_RESULTSDIRECTORY",
    "TESTRESULTPATH",
    "BARLI_DEST_PATH",
];

/// Restores an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
#[derive(Debug)]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

/// Sets `key` to `value` until the guard drops.
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    let name = key.into();
    let _lock = ENV_MUTEX.lock();
    let original = env::var_os(&name);
    // SAFETY: environment writes are serialised by ENV_MUTEX.
    unsafe { env::set_var(&name, value) };
    EnvVarGuard {
        key: name,
        original,
    }
}

/// Removes `key` until the guard drops.
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    let name = key.into();
    let _lock = ENV_MUTEX.lock();
    let original = env::var_os(&name);
    // SAFETY: environment writes are serialised by ENV_MUTEX.
    unsafe { env::remove_var(&name) };
    EnvVarGuard {
        key: name,
        original,
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _lock = ENV_MUTEX.lock();
        match self.original.take() {
            // SAFETY: environment writes are serialised by ENV_MUTEX.
            Some(value) => unsafe { env::set_var(&self.key, value) },
            // SAFETY: environment writes are serialised by ENV_MUTEX.
            None => unsafe { env::remove_var(&self.key) },
        }
    }
}

/// Holds the environment lock with every [`HARNESS_VARS`] entry removed.
///
/// Further [`set_var`] calls on the same thread still succeed because the
/// lock is re-entrant; other threads wait until the scope drops.
#[must_use = "dropping releases the lock and restores the variables"]
pub struct HarnessEnv {
    guards: Vec<EnvVarGuard>,
    _lock: ReentrantMutexGuard<'static, ()>,
}

impl HarnessEnv {
    /// Clears the harness variables for the lifetime of the scope.
    pub fn isolated() -> Self {
        let lock = ENV_MUTEX.lock();
        let guards = HARNESS_VARS.iter().map(|key| remove_var(*key)).collect();
        Self {
            guards,
            _lock: lock,
        }
    }
}

impl Drop for HarnessEnv {
    fn drop(&mut self) {
        while let Some(guard) = self.guards.pop() {
            drop(guard);
        }
    }
}
