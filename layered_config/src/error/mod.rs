//! Error types produced while applying configuration sources.

mod accumulator;
mod aggregate;
mod path;
mod types;

pub use accumulator::ErrorAccumulator;
pub use aggregate::{ParseResult, ParserErrors};
pub use path::{FieldPath, PathSegment};
pub use types::{ErrorCategory, ParserError, ParserErrorKind, UnsupportedType};
