//! Detection of document keys that match no schema field.

use crate::case::KeyCase;
use crate::error::{ErrorAccumulator, FieldPath, ParserErrorKind};
use crate::schema::MessageDescriptor;
use crate::tree::Node;

/// Reports every key of `entries` with no matching field, descending into
/// mappings held by singular message fields.
///
/// Sequence values are not inspected.
pub(super) fn scan(
    descriptor: &MessageDescriptor,
    entries: &[(String, Node)],
    path: &FieldPath,
    key_case: KeyCase,
    errors: &mut ErrorAccumulator,
) {
    for (key, value) in entries {
        let key_path = path.child(key);
        // Match on the spelling the walk looks up; mapping the key back is
        // lossy for segments that start with a digit.
        let field = descriptor
            .fields()
            .iter()
            .find(|f| key_case.external(f.name()) == *key);
        let Some(field) = field else {
            errors.push(&key_path, ParserErrorKind::UnknownField { key: key.clone() });
            continue;
        };
        if let (Some(nested), Node::Mapping(children)) = (field.message_type(), value) {
            scan(nested, children, &key_path, key_case, errors);
        }
    }
}
