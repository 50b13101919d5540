//! Messages whose schema is only known at runtime.

use std::sync::Arc;

use super::{FieldDescriptor, FieldKind, Message, MessageDescriptor, ReflectError, Value};

#[derive(Clone, Debug, PartialEq)]
enum Slot {
    Unset,
    Single(Value),
    Repeated(Vec<Value>),
    Message(Box<DynamicMessage>),
}

/// A message backed by a [`MessageDescriptor`] built at runtime.
///
/// Singular scalar fields track presence: [`Message::value`] returns `None`
/// until the field is written. Nested message fields always hold a child
/// message, which starts empty.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use layered_config::schema::{
///     DynamicMessage, FieldDescriptor, FieldKind, Message, MessageDescriptor, Value,
/// };
///
/// let desc = MessageDescriptor::builder("Server")
///     .field(FieldDescriptor::new("port", FieldKind::UInt32))
///     .build()?;
/// let mut msg = DynamicMessage::new(Arc::new(desc));
/// assert_eq!(msg.value("port")?, None);
/// msg.set_value("port", Value::UInt32(8080))?;
/// assert_eq!(msg.value("port")?, Some(Value::UInt32(8080)));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DynamicMessage {
    descriptor: Arc<MessageDescriptor>,
    slots: Vec<Slot>,
}

impl DynamicMessage {
    /// Creates an empty message for `descriptor`.
    #[must_use]
    pub fn new(descriptor: Arc<MessageDescriptor>) -> Self {
        let slots = descriptor.fields().iter().map(empty_slot).collect();
        Self { descriptor, slots }
    }

    /// Whether the named field has been written.
    ///
    /// Repeated fields count as present when non-empty; nested messages
    /// when any of their fields is present.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.descriptor
            .index_of(field)
            .and_then(|i| self.slots.get(i))
            .is_some_and(|slot| match slot {
                Slot::Unset => false,
                Slot::Single(_) => true,
                Slot::Repeated(values) => !values.is_empty(),
                Slot::Message(child) => child
                    .descriptor
                    .fields()
                    .iter()
                    .any(|f| child.has(f.name())),
            })
    }

    /// Resets every field to its empty state.
    pub fn clear(&mut self) {
        self.slots = self.descriptor.fields().iter().map(empty_slot).collect();
    }

    fn slot(&self, field: &str) -> Result<(&FieldDescriptor, &Slot), ReflectError> {
        let found = self.descriptor.index_of(field).and_then(|i| {
            self.descriptor
                .fields()
                .get(i)
                .zip(self.slots.get(i))
        });
        found.ok_or_else(|| ReflectError::no_such_field(self.descriptor.name(), field))
    }

    fn slot_mut(&mut self, field: &str) -> Result<(FieldDescriptor, &mut Slot), ReflectError> {
        let index = self
            .descriptor
            .index_of(field)
            .ok_or_else(|| ReflectError::no_such_field(self.descriptor.name(), field))?;
        let desc = self
            .descriptor
            .fields()
            .get(index)
            .cloned()
            .ok_or_else(|| ReflectError::no_such_field(self.descriptor.name(), field))?;
        let slot = self
            .slots
            .get_mut(index)
            .ok_or_else(|| ReflectError::no_such_field(self.descriptor.name(), field))?;
        Ok((desc, slot))
    }
}

fn empty_slot(field: &FieldDescriptor) -> Slot {
    if field.is_repeated() {
        return Slot::Repeated(Vec::new());
    }
    match field.kind() {
        FieldKind::Message(desc) => Slot::Message(Box::new(DynamicMessage::new(Arc::clone(desc)))),
        _ => Slot::Unset,
    }
}

fn check_value(field: &FieldDescriptor, value: &Value) -> Result<(), ReflectError> {
    let name = field.name();
    let expected = field.kind().type_name();
    let matches = match (field.kind(), value) {
        (FieldKind::Bool, Value::Bool(_))
        | (FieldKind::Int32, Value::Int32(_))
        | (FieldKind::Int64, Value::Int64(_))
        | (FieldKind::UInt32, Value::UInt32(_))
        | (FieldKind::UInt64, Value::UInt64(_))
        | (FieldKind::Float, Value::Float(_))
        | (FieldKind::Double, Value::Double(_))
        | (FieldKind::String, Value::String(_))
        | (FieldKind::Bytes, Value::Bytes(_)) => true,
        (FieldKind::Enum(desc), Value::Enum(number)) => {
            if desc.find_by_number(*number).is_none() {
                return Err(ReflectError::UnknownEnumNumber {
                    field: name.to_owned(),
                    number: *number,
                });
            }
            true
        }
        (FieldKind::Message(_) | FieldKind::Group, _) => {
            return Err(ReflectError::Unsupported {
                field: name.to_owned(),
                kind: expected,
            });
        }
        _ => false,
    };
    if matches {
        Ok(())
    } else {
        Err(ReflectError::mismatch(name, expected, value))
    }
}

impl Message for DynamicMessage {
    fn descriptor(&self) -> Arc<MessageDescriptor> {
        Arc::clone(&self.descriptor)
    }

    fn set_value(&mut self, field: &str, value: Value) -> Result<(), ReflectError> {
        let (desc, slot) = self.slot_mut(field)?;
        match slot {
            Slot::Repeated(_) => Err(ReflectError::Repeated {
                field: field.to_owned(),
            }),
            Slot::Message(_) => Err(ReflectError::mismatch(field, "message", &value)),
            Slot::Unset | Slot::Single(_) => {
                check_value(&desc, &value)?;
                *slot = Slot::Single(value);
                Ok(())
            }
        }
    }

    fn set_values(&mut self, field: &str, values: Vec<Value>) -> Result<(), ReflectError> {
        let (desc, slot) = self.slot_mut(field)?;
        let Slot::Repeated(current) = slot else {
            return Err(ReflectError::NotRepeated {
                field: field.to_owned(),
            });
        };
        for value in &values {
            check_value(&desc, value)?;
        }
        *current = values;
        Ok(())
    }

    fn message_mut(&mut self, field: &str) -> Result<&mut dyn Message, ReflectError> {
        let (_, slot) = self.slot_mut(field)?;
        match slot {
            Slot::Message(child) => Ok(child.as_mut()),
            Slot::Unset | Slot::Single(_) | Slot::Repeated(_) => Err(ReflectError::NotAMessage {
                field: field.to_owned(),
            }),
        }
    }

    fn message(&self, field: &str) -> Result<&dyn Message, ReflectError> {
        let (_, slot) = self.slot(field)?;
        match slot {
            Slot::Message(child) => Ok(child.as_ref()),
            Slot::Unset | Slot::Single(_) | Slot::Repeated(_) => Err(ReflectError::NotAMessage {
                field: field.to_owned(),
            }),
        }
    }

    fn value(&self, field: &str) -> Result<Option<Value>, ReflectError> {
        let (_, slot) = self.slot(field)?;
        match slot {
            Slot::Unset => Ok(None),
            Slot::Single(value) => Ok(Some(value.clone())),
            Slot::Repeated(_) => Err(ReflectError::Repeated {
                field: field.to_owned(),
            }),
            Slot::Message(_) => Err(ReflectError::Unsupported {
                field: field.to_owned(),
                kind: "message",
            }),
        }
    }

    fn values(&self, field: &str) -> Result<Vec<Value>, ReflectError> {
        let (desc, slot) = self.slot(field)?;
        match slot {
            Slot::Repeated(_) if matches!(desc.kind(), FieldKind::Message(_)) => {
                Err(ReflectError::Unsupported {
                    field: field.to_owned(),
                    kind: "message",
                })
            }
            Slot::Repeated(values) => Ok(values.clone()),
            Slot::Unset | Slot::Single(_) | Slot::Message(_) => Err(ReflectError::NotRepeated {
                field: field.to_owned(),
            }),
        }
    }
}
