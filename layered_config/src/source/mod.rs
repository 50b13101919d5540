//! Configuration sources applied by the [`crate::Parser`].
//!
//! A source overlays whatever values it carries onto a message and records
//! every problem it finds without stopping. Fields the source does not
//! mention are left untouched, so applying sources in order yields
//! last-writer-wins precedence per field.

mod document;
mod env;
mod file;
mod yaml;

use crate::error::{ErrorAccumulator, ParseResult};
use crate::options::ParserOptions;
use crate::schema::Message;

pub use document::DocumentError;
pub use env::{ENV_LABEL, EnvLookup, EnvSource, MapEnv, ProcessEnv};
pub use file::LoadError;
pub use yaml::YamlSource;

/// A layer of configuration values.
pub trait Source: std::fmt::Debug {
    /// Label attached to every error this source reports.
    fn label(&self) -> &str;

    /// Overlays this source onto `message`, pushing problems into `errors`.
    fn apply(&self, message: &mut dyn Message, options: &ParserOptions, errors: &mut ErrorAccumulator);

    /// Applies this source on its own.
    ///
    /// # Errors
    ///
    /// Returns every problem found; `message` keeps the values that were
    /// applied successfully.
    fn populate(&self, message: &mut dyn Message, options: &ParserOptions) -> ParseResult {
        let mut errors = ErrorAccumulator::new(self.label());
        self.apply(message, options, &mut errors);
        errors.finish()
    }
}
