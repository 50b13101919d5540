//! Diagnostic types reported by sources.

use std::fmt;

use thiserror::Error;

use crate::tree::NodeKind;

use super::path::FieldPath;

/// Field types a source refuses to populate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum UnsupportedType {
    /// Byte-string fields.
    Bytes,
    /// Repeated fields whose elements are messages.
    RepeatedMessage,
}

impl fmt::Display for UnsupportedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bytes => "bytes fields are not supported",
            Self::RepeatedMessage => "repeated message fields are not supported",
        })
    }
}

/// Broad classification of a [`ParserErrorKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The source could not be read or parsed at all.
    Load,
    /// A node had the wrong shape for its field.
    TypeMismatch,
    /// A scalar could not be converted to the field type.
    Conversion,
    /// A document key matched no field.
    UnknownField,
    /// A field was absent in strict mode.
    MissingField,
    /// Text matched no enum value.
    InvalidEnumValue,
    /// The field type cannot be populated.
    UnsupportedType,
    /// The schema had an unexpected construct.
    InternalShape,
}

/// What went wrong at a [`ParserError`]'s location.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParserErrorKind {
    /// The source file could not be opened or read.
    #[error("failed to read file: {0}")]
    FileRead(String),
    /// The document is not well-formed.
    #[error("failed to parse document: {0}")]
    DocumentSyntax(String),
    /// A node of the wrong kind was found.
    #[error("Type mismatch - expected {expected}, got {actual}")]
    TypeMismatch {
        /// Required node kind.
        expected: NodeKind,
        /// Node kind found in the document.
        actual: NodeKind,
    },
    /// A singular scalar field held a sequence, mapping or null.
    #[error("Attempting to parse non-scalar field as scalar (got {actual})")]
    NonScalar {
        /// Node kind found in the document.
        actual: NodeKind,
    },
    /// Scalar text could not be converted to the field type.
    #[error(
        "cannot convert '{text}' to {target}: {reason}{}",
        variable_suffix(.variable.as_deref())
    )]
    Conversion {
        /// Offending text.
        text: String,
        /// Declared type name.
        target: &'static str,
        /// Parser diagnostic.
        reason: String,
        /// Environment variable that supplied the text, if any.
        variable: Option<String>,
    },
    /// A document key has no matching field.
    #[error("unknown field '{key}'")]
    UnknownField {
        /// Key as written in the document.
        key: String,
    },
    /// A field was absent from the document in strict mode.
    #[error("missing field")]
    MissingField,
    /// Text did not name any value of the field's enum.
    #[error("Invalid enum value '{value}' for field {field}")]
    InvalidEnumValue {
        /// Offending text.
        value: String,
        /// Canonical field name.
        field: String,
    },
    /// The field type cannot be populated from configuration.
    #[error("{0}")]
    UnsupportedType(UnsupportedType),
    /// The schema contained a construct the engine cannot handle.
    #[error("unexpected schema shape: {0}")]
    InternalShape(String),
}

fn variable_suffix(variable: Option<&str>) -> String {
    variable.map(|name| format!(" (from {name})")).unwrap_or_default()
}

impl ParserErrorKind {
    /// Returns the broad category of this error.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::FileRead(_) | Self::DocumentSyntax(_) => ErrorCategory::Load,
            Self::TypeMismatch { .. } | Self::NonScalar { .. } => ErrorCategory::TypeMismatch,
            Self::Conversion { .. } => ErrorCategory::Conversion,
            Self::UnknownField { .. } => ErrorCategory::UnknownField,
            Self::MissingField => ErrorCategory::MissingField,
            Self::InvalidEnumValue { .. } => ErrorCategory::InvalidEnumValue,
            Self::UnsupportedType(_) => ErrorCategory::UnsupportedType,
            Self::InternalShape(_) => ErrorCategory::InternalShape,
        }
    }

    /// Records the environment variable that supplied a conversion's text.
    ///
    /// Other kinds are returned unchanged.
    #[must_use]
    pub fn with_variable(self, name: &str) -> Self {
        match self {
            Self::Conversion {
                text,
                target,
                reason,
                ..
            } => Self::Conversion {
                text,
                target,
                reason,
                variable: Some(name.to_owned()),
            },
            other => other,
        }
    }
}

/// A single problem found while applying a source.
///
/// Displays as `origin: path: message`, dropping the path at the root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserError {
    /// Label of the source that reported the problem.
    pub origin: String,
    /// Location of the problem from the document root.
    pub path: FieldPath,
    /// What went wrong.
    pub kind: ParserErrorKind,
}

impl ParserError {
    /// Creates an error.
    #[must_use]
    pub fn new(origin: impl Into<String>, path: FieldPath, kind: ParserErrorKind) -> Self {
        Self {
            origin: origin.into(),
            path,
            kind,
        }
    }

    /// Shorthand for `self.kind.category()`.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "{}: {}", self.origin, self.kind)
        } else {
            write!(f, "{}: {}: {}", self.origin, self.path, self.kind)
        }
    }
}

impl std::error::Error for ParserError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}
