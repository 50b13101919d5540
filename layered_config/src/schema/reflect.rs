//! Per-type glue between Rust struct fields and reflective [`Value`]s.
//!
//! `#[derive(ConfigMessage)]` dispatches each field through [`ReflectField`].
//! Scalars, [`Bytes`] and derived enums implement [`ReflectElement`] and so
//! can also appear inside a `Vec`.

use super::{FieldKind, Message, ReflectError, Value};

/// A type that can appear as an element of a repeated field.
pub trait ReflectElement: Sized {
    /// Declared kind of a single element.
    fn element_kind() -> FieldKind;

    /// Converts an incoming value into an element.
    ///
    /// # Errors
    ///
    /// Fails when `value` does not carry this element type.
    fn from_value(field: &str, value: Value) -> Result<Self, ReflectError>;

    /// Converts the element back into a value.
    ///
    /// # Errors
    ///
    /// Fails for element types that have no value form, such as messages.
    fn to_value(&self, field: &str) -> Result<Value, ReflectError>;
}

/// A type that can be a field of a derived message.
pub trait ReflectField {
    /// Declared kind; for repeated fields, the element kind.
    fn field_kind() -> FieldKind;

    /// Whether the field holds a sequence.
    #[must_use]
    fn is_repeated() -> bool {
        false
    }

    /// Writes a singular value.
    ///
    /// # Errors
    ///
    /// Fails when the field is repeated, a message, or typed differently.
    fn set_value(&mut self, field: &str, value: Value) -> Result<(), ReflectError>;

    /// Replaces a repeated field wholesale.
    ///
    /// # Errors
    ///
    /// Fails for singular fields or mismatched elements.
    fn set_values(&mut self, field: &str, _values: Vec<Value>) -> Result<(), ReflectError> {
        Err(ReflectError::NotRepeated {
            field: field.to_owned(),
        })
    }

    /// Reads a singular value.
    ///
    /// # Errors
    ///
    /// Fails for repeated and message fields.
    fn value(&self, field: &str) -> Result<Option<Value>, ReflectError>;

    /// Reads a repeated field.
    ///
    /// # Errors
    ///
    /// Fails for singular fields and for elements without a value form.
    fn values(&self, field: &str) -> Result<Vec<Value>, ReflectError> {
        Err(ReflectError::NotRepeated {
            field: field.to_owned(),
        })
    }

    /// Mutable access to a nested message.
    ///
    /// # Errors
    ///
    /// Fails unless the field is a singular message.
    fn message_mut(&mut self, field: &str) -> Result<&mut dyn Message, ReflectError> {
        Err(ReflectError::NotAMessage {
            field: field.to_owned(),
        })
    }

    /// Shared access to a nested message.
    ///
    /// # Errors
    ///
    /// Fails unless the field is a singular message.
    fn message(&self, field: &str) -> Result<&dyn Message, ReflectError> {
        Err(ReflectError::NotAMessage {
            field: field.to_owned(),
        })
    }
}

/// Opaque byte string field.
///
/// Byte fields are part of the schema model but are never populated from
/// configuration sources; parsing reports them as unsupported.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bytes(pub Vec<u8>);

impl From<Vec<u8>> for Bytes {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl ReflectElement for Bytes {
    fn element_kind() -> FieldKind {
        FieldKind::Bytes
    }

    fn from_value(field: &str, value: Value) -> Result<Self, ReflectError> {
        match value {
            Value::Bytes(bytes) => Ok(Self(bytes)),
            other => Err(ReflectError::mismatch(field, "bytes", &other)),
        }
    }

    fn to_value(&self, _field: &str) -> Result<Value, ReflectError> {
        Ok(Value::Bytes(self.0.clone()))
    }
}

impl ReflectElement for String {
    fn element_kind() -> FieldKind {
        FieldKind::String
    }

    fn from_value(field: &str, value: Value) -> Result<Self, ReflectError> {
        match value {
            Value::String(text) => Ok(text),
            other => Err(ReflectError::mismatch(field, "string", &other)),
        }
    }

    fn to_value(&self, _field: &str) -> Result<Value, ReflectError> {
        Ok(Value::String(self.clone()))
    }
}

macro_rules! copy_element {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl ReflectElement for $ty {
            fn element_kind() -> FieldKind {
                FieldKind::$variant
            }

            fn from_value(field: &str, value: Value) -> Result<Self, ReflectError> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(ReflectError::mismatch(
                        field,
                        FieldKind::$variant.type_name(),
                        &other,
                    )),
                }
            }

            fn to_value(&self, _field: &str) -> Result<Value, ReflectError> {
                Ok(Value::$variant(*self))
            }
        }
    )*};
}

copy_element! {
    bool => Bool,
    i32 => Int32,
    i64 => Int64,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float,
    f64 => Double,
}

macro_rules! singular_field {
    ($($ty:ty),* $(,)?) => {$(
        impl ReflectField for $ty {
            fn field_kind() -> FieldKind {
                <Self as ReflectElement>::element_kind()
            }

            fn set_value(&mut self, field: &str, value: Value) -> Result<(), ReflectError> {
                __private::set_element(self, field, value)
            }

            fn value(&self, field: &str) -> Result<Option<Value>, ReflectError> {
                __private::get_element(self, field)
            }
        }
    )*};
}

singular_field!(bool, i32, i64, u32, u64, f32, f64, String, Bytes);

impl<T: ReflectElement> ReflectField for Vec<T> {
    fn field_kind() -> FieldKind {
        T::element_kind()
    }

    fn is_repeated() -> bool {
        true
    }

    fn set_value(&mut self, field: &str, _value: Value) -> Result<(), ReflectError> {
        Err(ReflectError::Repeated {
            field: field.to_owned(),
        })
    }

    fn set_values(&mut self, field: &str, values: Vec<Value>) -> Result<(), ReflectError> {
        let converted = values
            .into_iter()
            .map(|value| T::from_value(field, value))
            .collect::<Result<Vec<_>, _>>()?;
        *self = converted;
        Ok(())
    }

    fn value(&self, field: &str) -> Result<Option<Value>, ReflectError> {
        Err(ReflectError::Repeated {
            field: field.to_owned(),
        })
    }

    fn values(&self, field: &str) -> Result<Vec<Value>, ReflectError> {
        self.iter().map(|element| element.to_value(field)).collect()
    }
}

/// Support code for derive-generated implementations.
#[doc(hidden)]
pub mod __private {
    use super::{ReflectElement, ReflectError, Value};

    /// Overwrites `slot` with the converted `value`.
    ///
    /// # Errors
    ///
    /// Propagates [`ReflectElement::from_value`] failures.
    pub fn set_element<T: ReflectElement>(
        slot: &mut T,
        field: &str,
        value: Value,
    ) -> Result<(), ReflectError> {
        *slot = T::from_value(field, value)?;
        Ok(())
    }

    /// Reads `slot` as a present value.
    ///
    /// # Errors
    ///
    /// Propagates [`ReflectElement::to_value`] failures.
    pub fn get_element<T: ReflectElement>(
        slot: &T,
        field: &str,
    ) -> Result<Option<Value>, ReflectError> {
        slot.to_value(field).map(Some)
    }

    /// Error for a message field used as a scalar.
    #[must_use]
    pub fn message_as_scalar(field: &str, value: &Value) -> ReflectError {
        ReflectError::mismatch(field, "message", value)
    }

    /// Error for a message element converted from or to a value.
    #[must_use]
    pub fn message_element(field: &str) -> ReflectError {
        ReflectError::Unsupported {
            field: field.to_owned(),
            kind: "message",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn scalars_accept_matching_values() {
        let mut port = 0_u32;
        port.set_value("port", Value::UInt32(8080))
            .expect("matching value");
        assert_eq!(port, 8080);
        assert_eq!(port.value("port"), Ok(Some(Value::UInt32(8080))));
    }

    #[rstest]
    fn scalars_reject_other_types() {
        let mut enabled = false;
        let err = enabled
            .set_value("enabled", Value::String(String::from("yes")))
            .expect_err("string is not bool");
        assert_eq!(
            err,
            ReflectError::TypeMismatch {
                field: String::from("enabled"),
                expected: "bool",
                actual: "string",
            }
        );
        assert!(!enabled);
    }

    #[rstest]
    fn vectors_replace_wholesale() {
        let mut ports = vec![1_i32, 2, 3];
        ports
            .set_values("ports", vec![Value::Int32(9)])
            .expect("replace");
        assert_eq!(ports, vec![9]);
        assert!(<Vec<i32> as ReflectField>::is_repeated());
    }

    #[rstest]
    fn vectors_keep_contents_when_an_element_fails() {
        let mut names = vec![String::from("a")];
        let result = names.set_values(
            "names",
            vec![Value::String(String::from("b")), Value::Int32(1)],
        );
        assert!(result.is_err());
        assert_eq!(names, vec![String::from("a")]);
    }

    #[rstest]
    fn singular_fields_refuse_sequence_access() {
        let mut ratio = 0.5_f64;
        assert!(matches!(
            ratio.set_values("ratio", vec![]),
            Err(ReflectError::NotRepeated { .. })
        ));
        assert!(matches!(
            ratio.message_mut("ratio"),
            Err(ReflectError::NotAMessage { .. })
        ));
    }
}
