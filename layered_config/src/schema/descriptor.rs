//! Reflective descriptions of messages, fields and enums.

use std::collections::HashSet;
use std::sync::Arc;

use super::SchemaError;
use super::reflect::ReflectField;

/// One named value of an enum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumValue {
    name: String,
    number: i32,
}

impl EnumValue {
    /// Declared value name, conventionally upper case.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Numeric value.
    #[must_use]
    pub const fn number(&self) -> i32 {
        self.number
    }
}

/// Ordered table of enum values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumDescriptor {
    name: String,
    values: Vec<EnumValue>,
}

impl EnumDescriptor {
    /// Build a descriptor from `(name, number)` pairs in declaration order.
    ///
    /// # Examples
    ///
    /// ```
    /// use layered_config::schema::EnumDescriptor;
    /// let level = EnumDescriptor::new("Level", [("LOW", 0), ("HIGH", 1)]);
    /// assert_eq!(level.find_by_name("HIGH").map(|v| v.number()), Some(1));
    /// ```
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = (S, i32)>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values
                .into_iter()
                .map(|(value_name, number)| EnumValue {
                    name: value_name.into(),
                    number,
                })
                .collect(),
        }
    }

    /// Enum type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Values in declaration order.
    #[must_use]
    pub fn values(&self) -> &[EnumValue] {
        &self.values
    }

    /// Exact, case-sensitive lookup by value name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.name == name)
    }

    /// Lookup by number; the first declared alias wins.
    #[must_use]
    pub fn find_by_number(&self, number: i32) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.number == number)
    }
}

/// Declared type of a field.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum FieldKind {
    /// `bool`.
    Bool,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 32-bit integer.
    UInt32,
    /// Unsigned 64-bit integer.
    UInt64,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    /// UTF-8 text.
    String,
    /// Raw bytes; never populated from configuration sources.
    Bytes,
    /// Enum resolved against the attached value table.
    Enum(Arc<EnumDescriptor>),
    /// Nested message with its own fields.
    Message(Arc<MessageDescriptor>),
    /// Legacy group construct; only ever reported as an unexpected shape.
    Group,
}

impl FieldKind {
    /// Stable type name used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Enum(_) => "enum",
            Self::Message(_) => "message",
            Self::Group => "group",
        }
    }
}

/// Description of one field of a message.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
    name: String,
    kind: FieldKind,
    repeated: bool,
}

impl FieldDescriptor {
    /// A singular field.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            repeated: false,
        }
    }

    /// A repeated field whose elements have `kind`.
    #[must_use]
    pub fn repeated(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            repeated: true,
        }
    }

    /// Describe a struct field of Rust type `T`.
    #[must_use]
    pub fn of<T: ReflectField>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: T::field_kind(),
            repeated: T::is_repeated(),
        }
    }

    /// Canonical `snake_case` name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared kind; for repeated fields, the element kind.
    #[must_use]
    pub const fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Whether the field holds a sequence.
    #[must_use]
    pub const fn is_repeated(&self) -> bool {
        self.repeated
    }

    /// Nested descriptor of a singular message field.
    #[must_use]
    pub fn message_type(&self) -> Option<&MessageDescriptor> {
        match &self.kind {
            FieldKind::Message(desc) if !self.repeated => Some(desc),
            _ => None,
        }
    }
}

/// Description of a message: its name and ordered fields.
#[derive(Clone, Debug, PartialEq)]
pub struct MessageDescriptor {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl MessageDescriptor {
    /// Start building a descriptor named `name`.
    pub fn builder(name: impl Into<String>) -> MessageDescriptorBuilder {
        MessageDescriptorBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Construct from fields whose names are already known to be unique.
    ///
    /// Used by `#[derive(ConfigMessage)]`, which rejects duplicate names at
    /// compile time.
    #[doc(hidden)]
    #[must_use]
    pub fn from_derived(name: &str, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.to_owned(),
            fields,
        }
    }

    /// Message type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Finds a field by canonical name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Position of the field named `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// Builder returned by [`MessageDescriptor::builder`].
#[derive(Debug)]
#[must_use = "call `build` to obtain the descriptor"]
pub struct MessageDescriptorBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl MessageDescriptorBuilder {
    /// Append a field.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Finish the descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateField`] when two fields share a name.
    pub fn build(self) -> Result<MessageDescriptor, SchemaError> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    message: self.name.clone(),
                    field: field.name.clone(),
                });
            }
        }
        Ok(MessageDescriptor {
            name: self.name,
            fields: self.fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn builder_rejects_duplicate_names() {
        let err = MessageDescriptor::builder("Config")
            .field(FieldDescriptor::new("port", FieldKind::UInt32))
            .field(FieldDescriptor::new("port", FieldKind::String))
            .build()
            .expect_err("duplicate field must fail");
        assert_eq!(
            err,
            SchemaError::DuplicateField {
                message: String::from("Config"),
                field: String::from("port"),
            }
        );
    }

    #[rstest]
    fn lookups_follow_declaration_order() {
        let desc = MessageDescriptor::builder("Config")
            .field(FieldDescriptor::new("enabled", FieldKind::Bool))
            .field(FieldDescriptor::repeated("ports", FieldKind::UInt32))
            .build()
            .expect("valid descriptor");
        assert_eq!(desc.index_of("ports"), Some(1));
        assert!(desc.field("ports").is_some_and(FieldDescriptor::is_repeated));
        assert!(desc.field("missing").is_none());
    }

    #[rstest]
    fn enum_lookup_is_case_sensitive() {
        let desc = EnumDescriptor::new("Kind", [("TYPE1", 0), ("TYPE2", 1), ("ALIAS", 1)]);
        assert!(desc.find_by_name("type1").is_none());
        assert_eq!(desc.find_by_number(1).map(EnumValue::name), Some("TYPE2"));
    }

    #[rstest]
    fn message_type_ignores_repeated_messages() {
        let inner = Arc::new(
            MessageDescriptor::builder("Inner")
                .build()
                .expect("empty descriptor"),
        );
        let single = FieldDescriptor::new("inner", FieldKind::Message(Arc::clone(&inner)));
        let many = FieldDescriptor::repeated("inners", FieldKind::Message(inner));
        assert!(single.message_type().is_some());
        assert!(many.message_type().is_none());
    }
}
