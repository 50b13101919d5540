//! Translation between canonical field names and their external spellings.
//!
//! Schema fields are declared in `snake_case`. Documents may use the same
//! spelling or `camelCase`, and environment variables use upper-cased,
//! underscore-joined names derived from a prefix.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Converts `camelCase` or `PascalCase` text to `snake_case`.
///
/// An underscore is emitted before every uppercase character except the
/// first. Each character is lower-cased, or upper-cased when `upper` is set.
///
/// # Examples
///
/// ```
/// use layered_config::case::camel_to_snake;
/// assert_eq!(camel_to_snake("SomeWeIrDcAsE", false), "some_we_ir_dc_as_e");
/// assert_eq!(camel_to_snake("camelCase", true), "CAMEL_CASE");
/// ```
#[must_use]
pub fn camel_to_snake(input: &str, upper: bool) -> String {
    let mut out = String::with_capacity(input.len());
    for (i, c) in input.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            out.push('_');
        }
        if upper {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Converts `snake_case` text to `camelCase`.
///
/// Underscores are dropped and capitalise the following character. Other
/// characters are copied unchanged.
///
/// # Examples
///
/// ```
/// use layered_config::case::snake_to_camel;
/// assert_eq!(snake_to_camel("camel_case"), "camelCase");
/// assert_eq!(snake_to_camel("PascalCase"), "PascalCase");
/// ```
#[must_use]
pub fn snake_to_camel(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut capitalise = false;
    for c in input.chars() {
        if c == '_' {
            capitalise = true;
        } else if capitalise {
            out.extend(c.to_uppercase());
            capitalise = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Upper-cases every character; non-letters pass through.
#[must_use]
pub fn all_caps(input: &str) -> String {
    input.to_uppercase()
}

/// Builds the environment variable name for `field` under `prefix`.
///
/// # Examples
///
/// ```
/// use layered_config::case::cook_env_var;
/// assert_eq!(cook_env_var("MY_APP", "FeatureOne"), "MY_APP_FEATURE_ONE");
/// assert_eq!(cook_env_var("prefix", "some_feature"), "prefix_SOME_FEATURE");
/// ```
#[must_use]
pub fn cook_env_var(prefix: &str, field: &str) -> String {
    format!("{prefix}_{}", camel_to_snake(field, true))
}

/// Spelling convention used by external document keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCase {
    /// Keys match the canonical `snake_case` field names.
    #[default]
    Snake,
    /// Keys are written in `camelCase`.
    Camel,
}

impl KeyCase {
    /// Returns the name to look up in a document for a canonical field name.
    #[must_use]
    pub fn external(self, canonical: &str) -> String {
        match self {
            Self::Snake => canonical.to_owned(),
            Self::Camel => snake_to_camel(canonical),
        }
    }

    /// Maps a document key back to its canonical field name.
    #[must_use]
    pub fn canonical(self, external: &str) -> String {
        match self {
            Self::Snake => external.to_owned(),
            Self::Camel => camel_to_snake(external, false),
        }
    }
}

impl fmt::Display for KeyCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Snake => "snake",
            Self::Camel => "camel",
        })
    }
}

/// Error returned when a [`KeyCase`] name is not recognised.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown key case '{0}'; expected \"snake\" or \"camel\"")]
pub struct UnknownKeyCase(pub String);

impl FromStr for KeyCase {
    type Err = UnknownKeyCase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "snake" | "snake_case" => Ok(Self::Snake),
            "camel" | "camelcase" | "camel_case" => Ok(Self::Camel),
            _ => Err(UnknownKeyCase(s.to_owned())),
        }
    }
}
