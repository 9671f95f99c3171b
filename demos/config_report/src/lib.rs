//! Support code for the `config-report` binary.
//!
//! The binary parses its arguments with [`cli::Cli`], builds the
//! configuration once, and writes the result with [`report::write_report`].

pub mod cli;
pub mod report;
