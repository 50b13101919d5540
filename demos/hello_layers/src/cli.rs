//! Command-line interface for the demo.

use camino::Utf8PathBuf;
use clap::Parser;
use layered_config::ValidationMode;

/// Layers YAML files and environment variables into the demo configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "hello-layers", version, about)]
pub struct Cli {
    /// Directory holding the configuration files to read.
    pub config_dir: Utf8PathBuf,

    /// Prefix of the environment variables to apply last.
    #[arg(long, default_value = "MY_APP")]
    pub prefix: String,

    /// Expect camelCase keys in the YAML documents.
    #[arg(long)]
    pub camel_case: bool,

    /// How strictly documents must match the schema.
    #[arg(long, default_value = "permissive")]
    pub validation: ValidationMode,

    /// Skip configuration files that do not exist.
    #[arg(long)]
    pub allow_missing: bool,
}

impl Cli {
    /// Paths of the documents to read, in application order.
    #[must_use]
    pub fn files(&self) -> [Utf8PathBuf; 2] {
        [
            self.config_dir.join("config.yml"),
            self.config_dir.join("second.yml"),
        ]
    }
}
