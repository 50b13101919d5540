//! Loading and printing the demo configuration.

use std::io::{self, Write};

use layered_config::schema::describe;
use layered_config::{ParseResult, Parser, ParserErrors};

use crate::cli::Cli;
use crate::config::Config;

/// Outcome of one load: the configuration is always present, holding every
/// value that could be applied.
#[derive(Debug)]
pub struct Report {
    /// Populated configuration.
    pub config: Config,
    /// Problems found, if any.
    pub errors: Option<ParserErrors>,
}

impl Report {
    /// Whether every source applied cleanly.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.errors.is_none()
    }
}

/// Builds the parser described by `cli` and runs it.
#[must_use]
pub fn load(cli: &Cli) -> Report {
    let builder = cli.files().into_iter().fold(Parser::builder(), |acc, path| {
        if cli.allow_missing {
            acc.add_optional_file(path)
        } else {
            acc.add_file(path)
        }
    });
    let parser = builder
        .env_prefix(cli.prefix.as_str())
        .camel_case(cli.camel_case)
        .validation(cli.validation)
        .build();
    tracing::debug!(sources = ?parser.sources(), "loading demo configuration");
    let (config, result): (Config, ParseResult) = parser.parse_into();
    Report {
        config,
        errors: result.err(),
    }
}

/// Writes the configuration to `out` and any errors to `err`.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_report<O: Write, E: Write>(out: &mut O, err: &mut E, report: &Report) -> io::Result<()> {
    out.write_all(describe(&report.config).as_bytes())?;
    if let Some(errors) = &report.errors {
        writeln!(err, "configuration loaded with {} error(s):", errors.len())?;
        writeln!(err, "{errors}")?;
    }
    Ok(())
}
