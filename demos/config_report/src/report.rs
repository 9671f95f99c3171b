//! Plain-text rendering of a built configuration.

use std::io::{self, Write};

use harness_config::Configuration;

/// Writes the document sources followed by every attribute as
/// `name = value`, in name order.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn write_report(out: &mut impl Write, config: &Configuration) -> io::Result<()> {
    writeln!(out, "# platform: {}", config.platform())?;
    writeln!(out, "# default: {}", config.default_path().display())?;
    if config.is_overridden() {
        writeln!(out, "# custom: {}", config.custom_path().display())?;
    }
    for (name, value) in config.iter() {
        writeln!(out, "{name} = {value}")?;
    }
    Ok(())
}
