//! Ordered collection of every [`ParserError`] found in one parse.

use std::{error::Error, fmt};

use super::{ErrorCategory, ParserError};

/// Outcome of applying one or more sources.
///
/// Sources never stop at the first problem, so failure carries the whole
/// list. The target message stays partially populated either way.
pub type ParseResult = Result<(), ParserErrors>;

/// Non-empty list of [`ParserError`]s in discovery order.
///
/// # Examples
///
/// ```
/// use layered_config::{FieldPath, ParserError, ParserErrorKind, ParserErrors};
/// let errors = ParserErrors::from_vec(vec![
///     ParserError::new("config.yml", FieldPath::root().child("port"), ParserErrorKind::MissingField),
///     ParserError::new("environment", FieldPath::root(), ParserErrorKind::MissingField),
/// ])
/// .expect("two errors");
/// assert_eq!(errors.len(), 2);
/// assert!(errors.to_string().starts_with("1: config.yml: port: missing field"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserErrors(Vec<ParserError>);

impl ParserErrors {
    /// Wraps `errors`, returning `None` when the list is empty.
    #[must_use]
    pub fn from_vec(errors: Vec<ParserError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    /// Iterate over the contained errors.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> std::slice::Iter<'_, ParserError> {
        self.0.iter()
    }

    /// Number of errors; always at least one.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; provided for API symmetry with `len`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Errors of the given category, in order.
    pub fn of_category(&self, category: ErrorCategory) -> impl Iterator<Item = &ParserError> {
        self.0.iter().filter(move |e| e.category() == category)
    }

    /// Unwraps into the underlying vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<ParserError> {
        self.0
    }

    /// Appends the errors of `other`.
    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }
}

impl fmt::Display for ParserErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {e}", i.saturating_add(1))?;
        }
        Ok(())
    }
}

impl Error for ParserErrors {}

impl AsRef<[ParserError]> for ParserErrors {
    fn as_ref(&self) -> &[ParserError] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a ParserErrors {
    type Item = &'a ParserError;
    type IntoIter = std::slice::Iter<'a, ParserError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for ParserErrors {
    type Item = ParserError;
    type IntoIter = std::vec::IntoIter<ParserError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
