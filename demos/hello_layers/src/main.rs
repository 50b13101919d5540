//! Demo entry-point: layer the configuration files and environment, then
//! print the result.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::eyre;
use hello_layers::{Cli, load, write_report};
use tracing_subscriber::EnvFilter;

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    init_tracing()?;
    let cli = Cli::parse();
    let report = load(&cli);
    write_report(&mut io::stdout().lock(), &mut io::stderr().lock(), &report)?;
    Ok(if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_tracing() -> color_eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| eyre!("failed to install tracing subscriber: {err}"))
}
