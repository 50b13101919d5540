//! Schema-driven overlay of a document tree onto a message.

use crate::case::KeyCase;
use crate::coerce::coerce_scalar;
use crate::error::{ErrorAccumulator, FieldPath, ParserErrorKind, UnsupportedType};
use crate::options::ParserOptions;
use crate::schema::{FieldDescriptor, FieldKind, Message, ReflectError};
use crate::tree::{Node, NodeKind};

/// Walks message fields in declaration order alongside a document mapping.
pub(super) struct Walker<'a> {
    key_case: KeyCase,
    strict: bool,
    errors: &'a mut ErrorAccumulator,
}

impl<'a> Walker<'a> {
    pub(super) const fn new(options: &ParserOptions, errors: &'a mut ErrorAccumulator) -> Self {
        Self {
            key_case: options.key_case,
            strict: options.validation.reports_missing(),
            errors,
        }
    }

    /// Overlays `entries` onto `message`, whose location is `path`.
    pub(super) fn message(
        &mut self,
        message: &mut dyn Message,
        entries: &[(String, Node)],
        path: &FieldPath,
    ) {
        let descriptor = message.descriptor();
        for field in descriptor.fields() {
            let key = self.key_case.external(field.name());
            let field_path = path.child(&key);
            let Some(node) = lookup(entries, &key) else {
                if self.strict {
                    self.errors.push(&field_path, ParserErrorKind::MissingField);
                } else {
                    tracing::trace!(path = %field_path, "field absent from document");
                }
                continue;
            };
            if field.is_repeated() {
                self.repeated(message, field, node, &field_path);
            } else {
                match field.kind() {
                    FieldKind::Message(_) => self.nested(message, field, node, &field_path),
                    FieldKind::Group => self.errors.push(
                        &field_path,
                        ParserErrorKind::InternalShape(format!(
                            "unexpected type {} for field {}",
                            field.kind().type_name(),
                            field.name()
                        )),
                    ),
                    _ => self.scalar(message, field, node, &field_path),
                }
            }
        }
    }

    fn nested(
        &mut self,
        message: &mut dyn Message,
        field: &FieldDescriptor,
        node: &Node,
        path: &FieldPath,
    ) {
        let Some(entries) = node.as_mapping() else {
            self.errors.push(
                path,
                ParserErrorKind::TypeMismatch {
                    expected: NodeKind::Map,
                    actual: node.kind(),
                },
            );
            return;
        };
        match message.message_mut(field.name()) {
            Ok(child) => self.message(child, entries, path),
            Err(err) => self.reflect_failure(path, &err),
        }
    }

    fn scalar(
        &mut self,
        message: &mut dyn Message,
        field: &FieldDescriptor,
        node: &Node,
        path: &FieldPath,
    ) {
        let Some(text) = node.as_scalar() else {
            self.errors.push(
                path,
                ParserErrorKind::NonScalar {
                    actual: node.kind(),
                },
            );
            return;
        };
        match coerce_scalar(text, field) {
            Ok(value) => {
                tracing::debug!(path = %path, value = %value, "setting field");
                if let Err(err) = message.set_value(field.name(), value) {
                    self.reflect_failure(path, &err);
                }
            }
            Err(kind) => self.errors.push(path, kind),
        }
    }

    fn repeated(
        &mut self,
        message: &mut dyn Message,
        field: &FieldDescriptor,
        node: &Node,
        path: &FieldPath,
    ) {
        let Node::Sequence(items) = node else {
            self.errors.push(
                path,
                ParserErrorKind::TypeMismatch {
                    expected: NodeKind::Sequence,
                    actual: node.kind(),
                },
            );
            return;
        };
        match field.kind() {
            FieldKind::Message(_) => {
                self.errors.push(
                    path,
                    ParserErrorKind::UnsupportedType(UnsupportedType::RepeatedMessage),
                );
                return;
            }
            FieldKind::Bytes => {
                self.errors
                    .push(path, ParserErrorKind::UnsupportedType(UnsupportedType::Bytes));
                return;
            }
            _ => {}
        }
        let mut values = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let item_path = path.index(i);
            let Some(text) = item.as_scalar() else {
                self.errors.push(
                    &item_path,
                    ParserErrorKind::TypeMismatch {
                        expected: NodeKind::Scalar,
                        actual: item.kind(),
                    },
                );
                continue;
            };
            match coerce_scalar(text, field) {
                Ok(value) => values.push(value),
                Err(kind) => self.errors.push(&item_path, kind),
            }
        }
        tracing::debug!(path = %path, count = values.len(), "replacing repeated field");
        if let Err(err) = message.set_values(field.name(), values) {
            self.reflect_failure(path, &err);
        }
    }

    fn reflect_failure(&mut self, path: &FieldPath, err: &ReflectError) {
        self.errors
            .push(path, ParserErrorKind::InternalShape(err.to_string()));
    }
}

fn lookup<'n>(entries: &'n [(String, Node)], key: &str) -> Option<&'n Node> {
    entries
        .iter()
        .find_map(|(k, v)| (k == key).then_some(v))
}
