//! YAML documents as configuration sources.

mod unknown;
mod walk;

use camino::Utf8PathBuf;

use super::Source;
use super::file::{parse_document, read_file};
use crate::error::{ErrorAccumulator, FieldPath, ParserErrorKind};
use crate::options::ParserOptions;
use crate::schema::Message;
use crate::tree::{Node, NodeKind};

#[derive(Debug, Clone)]
enum YamlInput {
    File { path: Utf8PathBuf, optional: bool },
    Inline(String),
    Tree(Node),
}

/// A YAML document applied as one configuration layer.
///
/// # Examples
///
/// ```
/// use layered_config::{ParserOptions, Source, YamlSource};
/// use layered_config::schema::{DynamicMessage, FieldDescriptor, FieldKind, Message, MessageDescriptor, Value};
/// use std::sync::Arc;
///
/// let desc = MessageDescriptor::builder("Config")
///     .field(FieldDescriptor::new("port", FieldKind::UInt32))
///     .build()?;
/// let mut config = DynamicMessage::new(Arc::new(desc));
/// YamlSource::string("inline", "port: 8080").populate(&mut config, &ParserOptions::default())?;
/// assert_eq!(config.value("port")?, Some(Value::UInt32(8080)));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct YamlSource {
    label: String,
    input: YamlInput,
}

impl YamlSource {
    /// A document read from `path` when applied.
    #[must_use]
    pub fn file<P: Into<Utf8PathBuf>>(path: P) -> Self {
        let file_path = path.into();
        Self {
            label: file_path.to_string(),
            input: YamlInput::File {
                path: file_path,
                optional: false,
            },
        }
    }

    /// Like [`YamlSource::file`], but a missing file is skipped silently.
    #[must_use]
    pub fn optional_file<P: Into<Utf8PathBuf>>(path: P) -> Self {
        let file_path = path.into();
        Self {
            label: file_path.to_string(),
            input: YamlInput::File {
                path: file_path,
                optional: true,
            },
        }
    }

    /// An in-memory document labelled `label` in diagnostics.
    #[must_use]
    pub fn string(label: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            input: YamlInput::Inline(contents.into()),
        }
    }

    /// A tree that has already been parsed.
    #[must_use]
    pub fn tree(label: impl Into<String>, node: Node) -> Self {
        Self {
            label: label.into(),
            input: YamlInput::Tree(node),
        }
    }

    /// Produces the document tree, or `None` for an absent optional file.
    fn load(&self, errors: &mut ErrorAccumulator) -> Option<Node> {
        let loaded = match &self.input {
            YamlInput::Tree(node) => return Some(node.clone()),
            YamlInput::Inline(contents) => parse_document(&self.label, contents),
            YamlInput::File { path, optional } => match read_file(path) {
                Ok(contents) => parse_document(&self.label, &contents),
                Err(err) if *optional && err.is_not_found() => {
                    tracing::debug!(path = %path, "optional configuration file not found");
                    return None;
                }
                Err(err) => Err(err),
            },
        };
        match loaded {
            Ok(node) => Some(node),
            Err(err) => {
                errors.push(&FieldPath::root(), err.into_kind());
                None
            }
        }
    }
}

impl Source for YamlSource {
    fn label(&self) -> &str {
        &self.label
    }

    fn apply(&self, message: &mut dyn Message, options: &ParserOptions, errors: &mut ErrorAccumulator) {
        let Some(root) = self.load(errors) else {
            return;
        };
        let entries: &[(String, Node)] = match &root {
            Node::Null => &[],
            Node::Mapping(entries) => entries,
            Node::Scalar(_) | Node::Sequence(_) => {
                errors.push(
                    &FieldPath::root(),
                    ParserErrorKind::TypeMismatch {
                        expected: NodeKind::Map,
                        actual: root.kind(),
                    },
                );
                return;
            }
        };
        let root_path = FieldPath::root();
        walk::Walker::new(options, errors).message(message, entries, &root_path);
        if options.validation.reports_unknown() {
            let descriptor = message.descriptor();
            unknown::scan(&descriptor, entries, &root_path, options.key_case, errors);
        }
    }
}
