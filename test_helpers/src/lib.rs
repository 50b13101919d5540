//! Test helpers shared across crates in the workspace.
//!
//! - [`env`] gives a test sole use of an environment-variable prefix.
//! - [`fixtures`] writes YAML documents into throwaway directories.
//! - [`figment`] wraps `figment::Jail` for tests that need an isolated
//!   working directory and environment together.

pub mod env;
pub mod figment;
pub mod fixtures;
