//! Command-line arguments for `config-report`.

use camino::Utf8PathBuf;
use clap::Parser;
use harness_config::{ConfigurationBuilder, Platform};

/// Print the merged harness configuration.
#[derive(Debug, Parser)]
#[command(name = "config-report", version, about)]
pub struct Cli {
    /// Directory holding the platform default documents.
    #[arg(long, value_name = "DIR")]
    pub settings_dir: Utf8PathBuf,

    /// Sample document named in error messages; must exist when given.
    #[arg(long, value_name = "FILE")]
    pub sample: Option<Utf8PathBuf>,

    /// Platform whose default document is loaded (`linux`, `darwin`,
    /// `win32`, ...). Defaults to the host platform.
    #[arg(long, value_name = "NAME")]
    pub platform: Option<String>,
}

impl Cli {
    /// Platform selected on the command line or detected from the host.
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.platform
            .as_deref()
            .map_or_else(Platform::current, Platform::from_os_name)
    }

    /// Builder configured from the arguments; reads the process environment.
    #[must_use]
    pub fn builder(&self) -> ConfigurationBuilder {
        let builder = ConfigurationBuilder::new(self.settings_dir.as_std_path())
            .platform(self.platform());
        match &self.sample {
            Some(sample) => builder.sample_path(sample.as_std_path()),
            None => builder,
        }
    }
}
