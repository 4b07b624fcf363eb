mod cli;
mod commands;
mod error;
mod logging;
mod output;

use std::process::ExitCode;

use baofin_core::{ProviderConfig, ProviderConfigBuilder, ReportDate};
use clap::Parser;

use crate::cli::Cli;
use crate::error::CliError;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => ExitCode::from(error.report(&mut std::io::stderr())),
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    logging::init(cli.log_level.as_deref(), &config.log_filter);

    let output = commands::run(&cli, &config)?;
    output::render(&output, cli.format, cli.pretty)
}

/// Environment first, command-line flags on top.
fn load_config(cli: &Cli) -> Result<ProviderConfig, CliError> {
    let mut builder = ProviderConfigBuilder::from_env()?;
    if let Some(as_of) = &cli.as_of {
        builder = builder.with_as_of(ReportDate::parse_field("as_of", as_of)?);
    }
    if let Some(level) = &cli.log_level {
        builder = builder.with_log_filter(level.clone());
    }
    Ok(builder.build())
}
