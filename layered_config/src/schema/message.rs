//! Reflective access to configuration messages.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use super::{MessageDescriptor, Value};

/// Failure while reading or writing a message reflectively.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ReflectError {
    /// The message has no field with the given canonical name.
    #[error("message `{message}` has no field `{field}`")]
    NoSuchField {
        /// Message type name.
        message: String,
        /// Requested field name.
        field: String,
    },
    /// The value does not match the field's declared type.
    #[error("field `{field}` holds {expected}, not {actual}")]
    TypeMismatch {
        /// Field name.
        field: String,
        /// Declared type name.
        expected: &'static str,
        /// Type name of the offered value.
        actual: &'static str,
    },
    /// A sequence operation was used on a singular field.
    #[error("field `{field}` is not repeated")]
    NotRepeated {
        /// Field name.
        field: String,
    },
    /// A singular operation was used on a repeated field.
    #[error("field `{field}` is repeated")]
    Repeated {
        /// Field name.
        field: String,
    },
    /// A nested-message operation was used on a non-message field.
    #[error("field `{field}` is not a message")]
    NotAMessage {
        /// Field name.
        field: String,
    },
    /// An enum number has no declared value.
    #[error("{number} is not a declared value of enum field `{field}`")]
    UnknownEnumNumber {
        /// Field name.
        field: String,
        /// Offending number.
        number: i32,
    },
    /// The field's element type cannot be exchanged as [`Value`]s.
    #[error("field `{field}` holds {kind} elements, which cannot be read or written as values")]
    Unsupported {
        /// Field name.
        field: String,
        /// Element type name.
        kind: &'static str,
    },
}

impl ReflectError {
    /// Builds [`ReflectError::NoSuchField`].
    #[must_use]
    pub fn no_such_field(message: &str, field: &str) -> Self {
        Self::NoSuchField {
            message: message.to_owned(),
            field: field.to_owned(),
        }
    }

    /// Builds [`ReflectError::TypeMismatch`] for `value`.
    #[must_use]
    pub fn mismatch(field: &str, expected: &'static str, value: &Value) -> Self {
        Self::TypeMismatch {
            field: field.to_owned(),
            expected,
            actual: value.type_name(),
        }
    }
}

/// A configuration object that can be populated reflectively.
///
/// Implemented by `#[derive(ConfigMessage)]` for plain structs and by
/// [`super::DynamicMessage`] for schemas only known at runtime. Field names
/// are always canonical `snake_case` names from [`Message::descriptor`].
pub trait Message: fmt::Debug {
    /// Schema of this message.
    fn descriptor(&self) -> Arc<MessageDescriptor>;

    /// Writes a singular scalar or enum field.
    ///
    /// # Errors
    ///
    /// Fails when the field is unknown, repeated, a message, or typed
    /// differently from `value`.
    fn set_value(&mut self, field: &str, value: Value) -> Result<(), ReflectError>;

    /// Replaces every element of a repeated field.
    ///
    /// # Errors
    ///
    /// Fails when the field is unknown, singular, or any element is typed
    /// differently from the declared element type. The field is left
    /// unchanged on failure.
    fn set_values(&mut self, field: &str, values: Vec<Value>) -> Result<(), ReflectError>;

    /// Mutable access to a singular nested message.
    ///
    /// # Errors
    ///
    /// Fails when the field is unknown or not a singular message.
    fn message_mut(&mut self, field: &str) -> Result<&mut dyn Message, ReflectError>;

    /// Shared access to a singular nested message.
    ///
    /// # Errors
    ///
    /// Fails when the field is unknown or not a singular message.
    fn message(&self, field: &str) -> Result<&dyn Message, ReflectError>;

    /// Reads a singular scalar or enum field; `None` when never written.
    ///
    /// # Errors
    ///
    /// Fails when the field is unknown, repeated, or a message.
    fn value(&self, field: &str) -> Result<Option<Value>, ReflectError>;

    /// Reads every element of a repeated field.
    ///
    /// # Errors
    ///
    /// Fails when the field is unknown, singular, or holds messages.
    fn values(&self, field: &str) -> Result<Vec<Value>, ReflectError>;
}

/// A concrete message type with a statically known schema.
pub trait MessageType: Message + Default {
    /// Schema shared by every instance of the type.
    fn message_descriptor() -> Arc<MessageDescriptor>;
}

/// A Rust enum usable as an enum field.
pub trait EnumType: Sized {
    /// Value table shared by every instance of the type.
    fn enum_descriptor() -> Arc<super::EnumDescriptor>;

    /// Converts a declared number back to the variant.
    fn from_number(number: i32) -> Option<Self>;

    /// Number of this variant.
    fn number(&self) -> i32;
}
