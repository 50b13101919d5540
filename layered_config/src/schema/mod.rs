//! Reflection facility consumed by the merge engine.
//!
//! A [`MessageDescriptor`] describes the fields of a configuration message;
//! a [`Message`] exposes typed reads and writes by canonical field name.
//! Concrete structs gain both through `#[derive(ConfigMessage)]`, while
//! [`DynamicMessage`] covers schemas assembled at runtime.

mod descriptor;
mod dynamic;
mod message;
mod reflect;
mod text;
mod value;

use thiserror::Error;

pub use descriptor::{
    EnumDescriptor, EnumValue, FieldDescriptor, FieldKind, MessageDescriptor,
    MessageDescriptorBuilder,
};
pub use dynamic::DynamicMessage;
pub use message::{EnumType, Message, MessageType, ReflectError};
pub use reflect::{Bytes, ReflectElement, ReflectField};
#[doc(hidden)]
pub use reflect::__private;
pub use text::describe;
pub use value::Value;

/// Failure while assembling a descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SchemaError {
    /// Two fields of one message share a canonical name.
    #[error("message `{message}` declares field `{field}` more than once")]
    DuplicateField {
        /// Message type name.
        message: String,
        /// Repeated field name.
        field: String,
    },
}
