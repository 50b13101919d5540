//! Append-only error sink threaded through a schema walk.

use super::{FieldPath, ParseResult, ParserError, ParserErrorKind, ParserErrors};

/// Collects errors for one source, tagging each with the source label.
#[derive(Debug)]
pub struct ErrorAccumulator {
    origin: String,
    errors: Vec<ParserError>,
}

impl ErrorAccumulator {
    /// Creates an empty accumulator for the source labelled `origin`.
    #[must_use]
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            errors: Vec::new(),
        }
    }

    /// Label attached to every recorded error.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Records a problem at `path`.
    pub fn push(&mut self, path: &FieldPath, kind: ParserErrorKind) {
        tracing::debug!(origin = %self.origin, path = %path, error = %kind, "recorded parse error");
        self.errors
            .push(ParserError::new(self.origin.clone(), path.clone(), kind));
    }

    /// Number of errors recorded so far.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors recorded so far.
    #[must_use]
    pub fn errors(&self) -> &[ParserError] {
        &self.errors
    }

    /// Converts the collected errors into a [`ParseResult`].
    ///
    /// # Errors
    ///
    /// Returns every recorded error when at least one was pushed.
    pub fn finish(self) -> ParseResult {
        ParserErrors::from_vec(self.errors).map_or(Ok(()), Err)
    }

    /// Moves every recorded error into `sink`.
    pub(crate) fn drain_into(self, sink: &mut Vec<ParserError>) {
        sink.extend(self.errors);
    }
}
