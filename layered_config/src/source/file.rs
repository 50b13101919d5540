//! Reading and parsing YAML documents into [`Node`] trees.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use thiserror::Error;

use super::document::{DocumentError, build_tree};
use crate::error::ParserErrorKind;
use crate::tree::Node;

/// Failure to obtain a document tree from a source.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that could not be read.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The document is not valid YAML.
    #[error("failed to parse {label}: {source}")]
    Syntax {
        /// Label of the offending document.
        label: String,
        /// Underlying parser failure.
        #[source]
        source: DocumentError,
    },
}

impl LoadError {
    /// Converts the failure into the diagnostic reported for the source.
    #[must_use]
    pub fn into_kind(self) -> ParserErrorKind {
        match self {
            Self::Read { source, .. } => ParserErrorKind::FileRead(source.to_string()),
            Self::Syntax { source, .. } => ParserErrorKind::DocumentSyntax(source.to_string()),
        }
    }

    /// Whether the failure is a missing file.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Return the parent directory of `path`, falling back to `"."` when the path
/// has no parent or the parent is empty.
fn parent_or_dot(path: &Utf8Path) -> &Utf8Path {
    path.parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."))
}

/// Reads `path` through a capability handle on its parent directory.
///
/// # Errors
///
/// Returns [`LoadError::Read`] when the directory cannot be opened or the
/// file cannot be read as UTF-8.
pub(crate) fn read_file(path: &Utf8Path) -> Result<String, LoadError> {
    let read = || -> std::io::Result<String> {
        let file_name = path
            .file_name()
            .ok_or_else(|| std::io::Error::other("cannot determine file name for configuration path"))?;
        let dir = Dir::open_ambient_dir(parent_or_dot(path), ambient_authority())?;
        dir.read_to_string(file_name)
    };
    read().map_err(|source| LoadError::Read {
        path: path.to_owned(),
        source,
    })
}

/// Parses YAML text into a tree; blank and comment-only documents yield
/// [`Node::Null`].
///
/// # Errors
///
/// Returns [`LoadError::Syntax`] for malformed YAML, including duplicate
/// mapping keys.
pub(crate) fn parse_document(label: &str, contents: &str) -> Result<Node, LoadError> {
    if is_blank_document(contents) {
        return Ok(Node::Null);
    }
    build_tree(contents).map_err(|source| LoadError::Syntax {
        label: label.to_owned(),
        source,
    })
}

fn is_blank_document(contents: &str) -> bool {
    contents.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}
