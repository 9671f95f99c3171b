//! Read-only access to environment variables.
//!
//! The loader never reads `std::env` directly; it goes through
//! [`Environment`] so tests (and embedders) can supply a fixed set of
//! variables without mutating the process environment.

use std::collections::{BTreeMap, HashMap};

/// Source of environment variables.
pub trait Environment {
    /// Returns the value of `key`, or `None` when it is not defined.
    ///
    /// A variable that is defined but empty returns `Some("")`.
    fn var(&self, key: &str) -> Option<String>;
}

/// The environment of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
    }
}

impl Environment for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<S: std::hash::BuildHasher> Environment for HashMap<String, String, S> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

/// Returns the first non-empty value among `keys`, checked in order.
pub(crate) fn first_non_empty(env: &dyn Environment, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| env.var(key))
        .find(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn first_non_empty_skips_blank_values() {
        let env = vars(&[("A", ""), ("B", "b"), ("C", "c")]);
        assert_eq!(first_non_empty(&env, &["A", "B", "C"]), Some("b".to_owned()));
    }

    #[test]
    fn first_non_empty_returns_none_when_nothing_is_set() {
        let env = vars(&[]);
        assert_eq!(first_non_empty(&env, &["A", "B"]), None);
    }

    #[test]
    fn references_delegate() {
        let env = vars(&[("KEY", "value")]);
        let by_ref: &dyn Environment = &env;
        assert_eq!((&by_ref).var("KEY"), Some("value".to_owned()));
    }
}
