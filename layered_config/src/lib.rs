//! Layered configuration for strongly typed, nested messages.
//!
//! A [`Parser`] overlays an ordered list of YAML documents and then an
//! environment-variable namespace onto a message described by a
//! [`schema::MessageDescriptor`]. Later sources override earlier ones field
//! by field, document shape is validated according to a [`ValidationMode`],
//! and every problem found is reported together in [`ParserErrors`].
//!
//! Structs and enums gain their schema through the derives:
//!
//! ```
//! use layered_config::{ConfigEnum, ConfigMessage, Parser};
//!
//! #[derive(ConfigEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
//! enum Mode {
//!     #[default]
//!     Fast,
//!     Safe,
//! }
//!
//! #[derive(ConfigMessage, Debug, Default)]
//! struct Config {
//!     name: String,
//!     mode: Mode,
//!     ports: Vec<u32>,
//! }
//!
//! let parser = Parser::builder()
//!     .add_yaml_str("defaults", "name: demo\nports: [80]\n")
//!     .add_yaml_str("site", "mode: safe\nports: [8080, 8443]\n")
//!     .build();
//! let (config, result) = parser.parse_into::<Config>();
//! result?;
//! assert_eq!(config.name, "demo");
//! assert_eq!(config.mode, Mode::Safe);
//! assert_eq!(config.ports, [8080, 8443]);
//! # Ok::<(), layered_config::ParserErrors>(())
//! ```

extern crate self as layered_config;

pub mod case;
pub mod coerce;
mod error;
mod options;
mod parser;
pub mod schema;
mod source;
pub mod tree;

pub use layered_config_macros::{ConfigEnum, ConfigMessage};

pub use case::KeyCase;
pub use error::{
    ErrorAccumulator, ErrorCategory, FieldPath, ParseResult, ParserError, ParserErrorKind,
    ParserErrors, PathSegment, UnsupportedType,
};
pub use options::{ParserOptions, UnknownValidationMode, ValidationMode};
pub use parser::{Parser, ParserBuilder};
pub use source::{
    DocumentError, ENV_LABEL, EnvLookup, EnvSource, LoadError, MapEnv, ProcessEnv, Source, YamlSource,
};
