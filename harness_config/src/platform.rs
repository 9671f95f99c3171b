//! Host platform detection used to pick the default document.

use std::fmt;

/// Platforms the automation framework ships default documents for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Linux hosts.
    Linux,
    /// macOS hosts.
    MacOs,
    /// Windows hosts.
    Windows,
    /// Any other host; resolves to an empty identifier rather than failing.
    Unknown,
}

impl Platform {
    /// Returns the platform the process is running on.
    #[must_use]
    pub fn current() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Normalises an operating-system family name.
    ///
    /// Matching is case-insensitive and accepts the spellings reported by
    /// common runtimes (`linux2`, `darwin`, `win32`).
    ///
    /// # Examples
    ///
    /// ```
    /// use harness_config::Platform;
    ///
    /// assert_eq!(Platform::from_os_name("Darwin"), Platform::MacOs);
    /// assert_eq!(Platform::from_os_name("freebsd"), Platform::Unknown);
    /// ```
    #[must_use]
    pub fn from_os_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "linux" | "linux2" => Self::Linux,
            "darwin" | "macos" => Self::MacOs,
            "win32" | "windows" => Self::Windows,
            _ => Self::Unknown,
        }
    }

    /// Identifier embedded in the default document name.
    #[must_use]
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::Linux => "Linux",
            Self::MacOs => "macOS",
            Self::Windows => "Windows",
            Self::Unknown => "",
        }
    }

    /// File name of the default document for this platform.
    ///
    /// ```
    /// use harness_config::Platform;
    ///
    /// assert_eq!(
    ///     Platform::Linux.default_document_name(),
    ///     "default_Linux_configuration.json"
    /// );
    /// ```
    #[must_use]
    pub fn default_document_name(self) -> String {
        format!("default_{}_configuration.json", self.identifier())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("unknown"),
            other => f.write_str(other.identifier()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Platform;
    use rstest::rstest;

    #[rstest]
    #[case("linux", Platform::Linux)]
    #[case("Linux2", Platform::Linux)]
    #[case("darwin", Platform::MacOs)]
    #[case("macos", Platform::MacOs)]
    #[case("win32", Platform::Windows)]
    #[case("Windows", Platform::Windows)]
    #[case("haiku", Platform::Unknown)]
    #[case("", Platform::Unknown)]
    fn normalises_os_names(#[case] raw: &str, #[case] expected: Platform) {
        assert_eq!(Platform::from_os_name(raw), expected);
    }

    #[test]
    fn unknown_platform_keeps_permissive_document_name() {
        assert_eq!(
            Platform::Unknown.default_document_name(),
            "default__configuration.json"
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn current_platform_on_linux() {
        assert_eq!(Platform::current(), Platform::Linux);
    }
}
