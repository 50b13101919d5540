//! Builds [`Node`] trees from the YAML event stream.
//!
//! Plain scalars reach the tree exactly as written, so `1.10`, `0x1F` and
//! `007` stay text until a field kind asks for a number. Anchors are
//! resolved by cloning the anchored node at each alias.

use std::collections::HashMap;

use saphyr_parser::{Event, Parser, ScalarStyle, ScanError, Span};
use thiserror::Error;

use crate::tree::Node;

/// Failure to turn YAML text into a [`Node`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DocumentError {
    /// The document failed validation by the YAML deserializer.
    #[error(transparent)]
    Yaml(Box<serde_saphyr::Error>),
    /// The event stream could not be scanned.
    #[error(transparent)]
    Scan(#[from] ScanError),
    /// A sequence or mapping was used as a mapping key.
    #[error("mapping keys must be scalars (line {line})")]
    NonScalarKey {
        /// 1-based line of the offending key.
        line: usize,
    },
    /// An alias names an anchor that has not been completed.
    #[error("alias refers to an unknown anchor (line {line})")]
    UnknownAnchor {
        /// 1-based line of the alias.
        line: usize,
    },
}

enum Frame {
    Sequence {
        anchor: usize,
        items: Vec<Node>,
    },
    Mapping {
        anchor: usize,
        entries: Vec<(String, Node)>,
        key: Option<String>,
    },
}

#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Frame>,
    anchors: HashMap<usize, Node>,
    root: Option<Node>,
}

impl TreeBuilder {
    fn awaiting_key(&self) -> bool {
        matches!(self.stack.last(), Some(Frame::Mapping { key: None, .. }))
    }

    fn remember(&mut self, anchor: usize, node: &Node) {
        if anchor != 0 {
            self.anchors.insert(anchor, node.clone());
        }
    }

    /// Places a finished node into its parent, or makes it the root.
    fn attach(&mut self, node: Node) {
        match self.stack.last_mut() {
            None => {
                if self.root.is_none() {
                    self.root = Some(node);
                }
            }
            Some(Frame::Sequence { items, .. }) => items.push(node),
            Some(Frame::Mapping { entries, key, .. }) => {
                if let Some(name) = key.take() {
                    entries.push((name, node));
                }
            }
        }
    }

    fn set_key(&mut self, text: String) {
        if let Some(Frame::Mapping { key, .. }) = self.stack.last_mut() {
            *key = Some(text);
        }
    }

    fn alias(&mut self, anchor: usize, line: usize) -> Result<(), DocumentError> {
        let node = self
            .anchors
            .get(&anchor)
            .cloned()
            .ok_or(DocumentError::UnknownAnchor { line })?;
        if !self.awaiting_key() {
            self.attach(node);
            return Ok(());
        }
        let Node::Scalar(text) = node else {
            return Err(DocumentError::NonScalarKey { line });
        };
        self.set_key(text);
        Ok(())
    }

    fn open(&mut self, frame: Frame, line: usize) -> Result<(), DocumentError> {
        if self.awaiting_key() {
            return Err(DocumentError::NonScalarKey { line });
        }
        self.stack.push(frame);
        Ok(())
    }

    fn close(&mut self) {
        let (anchor, node) = match self.stack.pop() {
            Some(Frame::Sequence { anchor, items }) => (anchor, Node::Sequence(items)),
            Some(Frame::Mapping { anchor, entries, .. }) => (anchor, Node::Mapping(entries)),
            None => return,
        };
        self.remember(anchor, &node);
        self.attach(node);
    }

    fn event(&mut self, event: Event<'_>, span: Span) -> Result<(), DocumentError> {
        let line = span.start.line();
        match event {
            Event::Scalar(text, _, _, _) if self.awaiting_key() => self.set_key(text.into_owned()),
            Event::Scalar(text, style, anchor, _) => {
                let node = scalar_node(text.into_owned(), style);
                self.remember(anchor, &node);
                self.attach(node);
            }
            Event::Alias(anchor) => self.alias(anchor, line)?,
            Event::SequenceStart(anchor, _) => self.open(
                Frame::Sequence {
                    anchor,
                    items: Vec::new(),
                },
                line,
            )?,
            Event::MappingStart(anchor, _) => self.open(
                Frame::Mapping {
                    anchor,
                    entries: Vec::new(),
                    key: None,
                },
                line,
            )?,
            Event::SequenceEnd | Event::MappingEnd => self.close(),
            Event::Nothing
            | Event::StreamStart
            | Event::StreamEnd
            | Event::DocumentStart(_)
            | Event::DocumentEnd => {}
        }
        Ok(())
    }
}

/// Plain `~`, `null` and empty scalars are YAML nulls; everything else,
/// including quoted `"null"`, is text.
fn scalar_node(text: String, style: ScalarStyle) -> Node {
    let is_null = style == ScalarStyle::Plain
        && matches!(text.as_str(), "" | "~" | "null" | "Null" | "NULL");
    if is_null { Node::Null } else { Node::Scalar(text) }
}

/// Builds the tree of the first document in `contents`.
///
/// The text is first run through `serde_saphyr` so malformed documents and
/// duplicate keys are rejected with its diagnostics, then the tree is built
/// from the raw event stream.
///
/// # Errors
///
/// Returns a [`DocumentError`] when the text is not a valid YAML document.
pub(crate) fn build_tree(contents: &str) -> Result<Node, DocumentError> {
    serde_saphyr::from_str::<serde::de::IgnoredAny>(contents)
        .map_err(|err| DocumentError::Yaml(Box::new(err)))?;
    let mut builder = TreeBuilder::default();
    for item in Parser::new_from_str(contents) {
        let (event, span) = item?;
        builder.event(event, span)?;
        if builder.root.is_some() && builder.stack.is_empty() {
            break;
        }
    }
    Ok(builder.root.unwrap_or_default())
}
