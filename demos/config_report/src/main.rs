//! `config-report`: build the harness configuration once and print it.

use std::io::{self, Write};

use clap::Parser;
use color_eyre::eyre::{Report, WrapErr};
use tracing_subscriber::EnvFilter;

use config_report::cli::Cli;
use config_report::report::write_report;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(
        settings_dir = %cli.settings_dir,
        platform = %cli.platform(),
        "building configuration"
    );
    let config = cli.builder().build().map_err(Report::new)?;

    let mut stdout = io::stdout().lock();
    write_report(&mut stdout, &config).wrap_err("failed to write report")?;
    stdout.flush().wrap_err("failed to flush report")?;
    Ok(())
}
