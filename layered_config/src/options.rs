//! Knobs shared by every source applied by a [`crate::Parser`].

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::case::KeyCase;

/// How strictly document shape is checked against the schema.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationMode {
    /// Missing and unknown fields are both errors.
    Strict,
    /// Neither missing nor unknown fields are reported.
    #[default]
    Permissive,
    /// Only unknown fields are reported.
    UnknownFieldsOnly,
}

impl ValidationMode {
    /// Whether absent schema fields are reported.
    #[must_use]
    pub const fn reports_missing(self) -> bool {
        matches!(self, Self::Strict)
    }

    /// Whether document keys without a schema field are reported.
    #[must_use]
    pub const fn reports_unknown(self) -> bool {
        !matches!(self, Self::Permissive)
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Strict => "STRICT",
            Self::Permissive => "PERMISSIVE",
            Self::UnknownFieldsOnly => "UNKNOWN_FIELDS_ONLY",
        })
    }
}

/// Error returned when a [`ValidationMode`] name is not recognised.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error(
    "unknown validation mode '{0}'; expected \"strict\", \"permissive\" or \"unknown_fields_only\""
)]
pub struct UnknownValidationMode(pub String);

impl FromStr for ValidationMode {
    type Err = UnknownValidationMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "strict" => Ok(Self::Strict),
            "permissive" => Ok(Self::Permissive),
            "unknown_fields_only" => Ok(Self::UnknownFieldsOnly),
            _ => Err(UnknownValidationMode(s.to_owned())),
        }
    }
}

/// Options applied uniformly to every source.
///
/// The struct deserialises with defaults for absent keys so host
/// applications can embed it in their own configuration.
///
/// # Examples
///
/// ```
/// use layered_config::{KeyCase, ParserOptions, ValidationMode};
///
/// let options = ParserOptions::default()
///     .with_key_case(KeyCase::Camel)
///     .with_validation(ValidationMode::Strict);
/// assert!(options.validation.reports_missing());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Spelling of document keys and environment segments.
    pub key_case: KeyCase,
    /// Strictness of shape validation.
    pub validation: ValidationMode,
}

impl ParserOptions {
    /// Replace the key case.
    #[must_use]
    pub const fn with_key_case(mut self, key_case: KeyCase) -> Self {
        self.key_case = key_case;
        self
    }

    /// Replace the validation mode.
    #[must_use]
    pub const fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }
}
