//! Library half of the `hello_layers` demo.
//!
//! The binary reads `config.yml` then `second.yml` from a directory, overlays
//! `MY_APP_*` environment variables, and prints the resulting configuration.
//! Keeping the logic here lets tests drive it without spawning a process.

pub mod cli;
pub mod config;
pub mod report;

pub use cli::Cli;
pub use config::{Config, EnumField, Inner};
pub use report::{Report, load, write_report};
