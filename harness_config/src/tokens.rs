//! Substitution of user-specific tokens in textual values.
//!
//! Two tokens are recognised, checked in this order, and at most one of them
//! is applied to a value:
//!
//! - `~` expands to the invoking user's home directory when it leads the
//!   value (`~`, `~/logs`, `~\logs`). A tilde anywhere else leaves the value
//!   untouched but still ends the scan. `~user` forms are not expanded: the
//!   resolver only knows the invoking user's home, so `~other/data` is kept
//!   as written.
//! - `%USERPROFILE%` is replaced by the user's account *name*, not a profile
//!   directory. Existing documents depend on this.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dirs::home_dir;

use crate::env::{Environment, first_non_empty};
use crate::value::Scalar;
use crate::{ConfigError, ConfigResult};

/// Home-directory shorthand.
pub const HOME_TOKEN: &str = "~";

/// Placeholder replaced by the user's account name.
pub const USER_PROFILE_TOKEN: &str = "%USERPROFILE%";

const HOME_VARS: [&str; 2] = ["HOME", "USERPROFILE"];
const USER_VARS: [&str; 4] = ["LOGNAME", "USER", "LNAME", "USERNAME"];

/// Identity of the invoking user, used to resolve tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserContext {
    home: Option<PathBuf>,
    user: Option<String>,
}

impl UserContext {
    /// Creates a context from a known home directory and account name.
    #[must_use]
    pub fn new(home: impl Into<PathBuf>, user: impl Into<String>) -> Self {
        Self {
            home: Some(home.into()),
            user: Some(user.into()),
        }
    }

    /// Creates a context in which neither token can be resolved.
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            home: None,
            user: None,
        }
    }

    /// Resolves the user's home directory and account name.
    ///
    /// The home directory comes from `HOME`, then `USERPROFILE`, then the
    /// platform lookup in [`dirs::home_dir`]. The account name comes from
    /// `LOGNAME`, `USER`, `LNAME`, `USERNAME`, and finally the last
    /// component of the home directory.
    #[must_use]
    pub fn from_environment(env: &dyn Environment) -> Self {
        let home = first_non_empty(env, &HOME_VARS)
            .map(PathBuf::from)
            .or_else(home_dir);
        let user = first_non_empty(env, &USER_VARS).or_else(|| {
            home.as_deref()
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().into_owned())
        });
        Self { home, user }
    }

    /// Home directory, when known.
    #[must_use]
    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Account name, when known.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }
}

/// Applies token substitution to configuration values.
#[derive(Debug, Clone, Default)]
pub struct TokenResolver {
    context: UserContext,
}

impl TokenResolver {
    /// Creates a resolver for `context`.
    #[must_use]
    pub const fn new(context: UserContext) -> Self {
        Self { context }
    }

    /// User context backing this resolver.
    #[must_use]
    pub const fn context(&self) -> &UserContext {
        &self.context
    }

    /// Resolves tokens in a scalar. Non-text values pass through unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use harness_config::tokens::{TokenResolver, UserContext};
    /// use harness_config::Scalar;
    ///
    /// # fn main() -> harness_config::ConfigResult<()> {
    /// let resolver = TokenResolver::new(UserContext::new("/home/ci", "ci"));
    /// assert_eq!(resolver.resolve(&Scalar::from("~/data"))?, Scalar::from("/home/ci/data"));
    /// assert_eq!(resolver.resolve(&Scalar::from(3_i64))?, Scalar::from(3_i64));
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UserLookup`] when the value carries a token
    /// whose replacement is unknown.
    pub fn resolve(&self, value: &Scalar) -> ConfigResult<Scalar> {
        match value {
            Scalar::Text(text) => self.resolve_text(text).map(Scalar::Text),
            other => Ok(other.clone()),
        }
    }

    /// Resolves tokens in a text value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UserLookup`] when the value carries a token
    /// whose replacement is unknown.
    pub fn resolve_text(&self, text: &str) -> ConfigResult<String> {
        if text.contains(HOME_TOKEN) {
            return self.expand_home(text);
        }
        if text.contains(USER_PROFILE_TOKEN) {
            let user = self.context.user().ok_or_else(|| {
                Arc::new(ConfigError::UserLookup {
                    token: USER_PROFILE_TOKEN,
                    missing: "account name",
                })
            })?;
            return Ok(text.replace(USER_PROFILE_TOKEN, user));
        }
        Ok(text.to_owned())
    }

    fn expand_home(&self, text: &str) -> ConfigResult<String> {
        let Some(rest) = text.strip_prefix(HOME_TOKEN) else {
            return Ok(text.to_owned());
        };
        if !(rest.is_empty() || rest.starts_with(['/', '\\'])) {
            return Ok(text.to_owned());
        }
        let home = self.context.home().ok_or_else(|| {
            Arc::new(ConfigError::UserLookup {
                token: HOME_TOKEN,
                missing: "home directory",
            })
        })?;
        let home_text = home.to_string_lossy();
        let trimmed = home_text.trim_end_matches(['/', '\\']);
        let expanded = format!("{trimmed}{rest}");
        if expanded.is_empty() {
            Ok("/".to_owned())
        } else {
            Ok(expanded)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::collections::BTreeMap;

    #[fixture]
    fn resolver() -> TokenResolver {
        TokenResolver::new(UserContext::new("/home/ci", "ci"))
    }

    #[rstest]
    #[case("~", "/home/ci")]
    #[case("~/data", "/home/ci/data")]
    #[case("~\\data", "/home/ci\\data")]
    #[case("~other/data", "~other/data")]
    #[case("/var/~tmp", "/var/~tmp")]
    #[case("~/%USERPROFILE%", "/home/ci/%USERPROFILE%")]
    #[case("C:\\Users\\%USERPROFILE%\\logs", "C:\\Users\\ci\\logs")]
    #[case("%USERPROFILE%-%USERPROFILE%", "ci-ci")]
    #[case("/opt/logs", "/opt/logs")]
    #[case("", "")]
    fn resolves_text(resolver: TokenResolver, #[case] raw: &str, #[case] expected: &str) {
        assert_eq!(resolver.resolve_text(raw).expect("resolve"), expected);
    }

    #[rstest]
    #[case(Scalar::Integer(7))]
    #[case(Scalar::Float(0.5))]
    #[case(Scalar::Boolean(true))]
    fn non_text_passes_through(resolver: TokenResolver, #[case] value: Scalar) {
        assert_eq!(resolver.resolve(&value).expect("resolve"), value);
    }

    #[rstest]
    #[case("/opt/logs")]
    #[case("plain")]
    #[case("~/data")]
    #[case("%USERPROFILE%/x")]
    fn resolution_is_idempotent(resolver: TokenResolver, #[case] raw: &str) {
        let once = resolver.resolve(&Scalar::from(raw)).expect("first pass");
        let twice = resolver.resolve(&once).expect("second pass");
        assert_eq!(once, twice);
    }

    #[test]
    fn trailing_separator_in_home_is_trimmed() {
        let resolver = TokenResolver::new(UserContext::new("/home/ci/", "ci"));
        assert_eq!(resolver.resolve_text("~/data").expect("resolve"), "/home/ci/data");
    }

    #[test]
    fn root_home_expands_to_root() {
        let resolver = TokenResolver::new(UserContext::new("/", "root"));
        assert_eq!(resolver.resolve_text("~").expect("resolve"), "/");
    }

    #[rstest]
    #[case("~/data", HOME_TOKEN)]
    #[case("%USERPROFILE%", USER_PROFILE_TOKEN)]
    fn unknown_user_context_is_an_error(#[case] raw: &str, #[case] token: &str) {
        let resolver = TokenResolver::new(UserContext::unknown());
        let err = resolver.resolve_text(raw).expect_err("lookup failure");
        assert!(matches!(
            err.as_ref(),
            ConfigError::UserLookup { token: found, .. } if *found == token
        ));
    }

    #[test]
    fn unknown_context_still_passes_plain_text() {
        let resolver = TokenResolver::new(UserContext::unknown());
        assert_eq!(resolver.resolve_text("/opt").expect("resolve"), "/opt");
    }

    #[test]
    fn context_prefers_environment_variables() {
        let env: BTreeMap<String, String> = [
            ("HOME", "/home/runner"),
            ("USERPROFILE", "C:\\Users\\runner"),
            ("LOGNAME", ""),
            ("USER", "runner"),
            ("USERNAME", "other"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();

        let context = UserContext::from_environment(&env);
        assert_eq!(context.home(), Some(Path::new("/home/runner")));
        assert_eq!(context.user(), Some("runner"));
    }

    #[test]
    fn account_name_falls_back_to_home_directory_name() {
        let env: BTreeMap<String, String> = [("HOME", "/home/builder")]
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();

        let context = UserContext::from_environment(&env);
        assert_eq!(context.user(), Some("builder"));
    }
}
