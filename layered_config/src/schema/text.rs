//! Human-readable dump of a message in protobuf text style.

use std::fmt;

use super::{FieldDescriptor, FieldKind, Message, Value};

/// Renders `message` one field per line.
///
/// Nested messages become indented blocks, repeated fields print one line
/// per element and enums print their value names. Unset fields of a
/// [`super::DynamicMessage`] and repeated message fields are omitted.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use layered_config::schema::{
///     describe, DynamicMessage, FieldDescriptor, FieldKind, Message, MessageDescriptor, Value,
/// };
///
/// let desc = MessageDescriptor::builder("Server")
///     .field(FieldDescriptor::new("host", FieldKind::String))
///     .field(FieldDescriptor::repeated("ports", FieldKind::UInt32))
///     .build()?;
/// let mut msg = DynamicMessage::new(Arc::new(desc));
/// msg.set_value("host", Value::String("localhost".into()))?;
/// msg.set_values("ports", vec![Value::UInt32(80), Value::UInt32(443)])?;
/// assert_eq!(describe(&msg), "host: \"localhost\"\nports: 80\nports: 443\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn describe(message: &dyn Message) -> String {
    Describe {
        message,
        depth: 0,
    }
    .to_string()
}

struct Describe<'a> {
    message: &'a dyn Message,
    depth: usize,
}

impl Describe<'_> {
    fn indent(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.depth {
            f.write_str("  ")?;
        }
        Ok(())
    }

    fn line(&self, f: &mut fmt::Formatter<'_>, field: &FieldDescriptor, value: &Value) -> fmt::Result {
        self.indent(f)?;
        write!(f, "{}: ", field.name())?;
        match (field.kind(), value) {
            (FieldKind::Enum(desc), Value::Enum(number)) => match desc.find_by_number(*number) {
                Some(named) => f.write_str(named.name())?,
                None => write!(f, "{number}")?,
            },
            _ => write!(f, "{value}")?,
        }
        f.write_str("\n")
    }
}

impl fmt::Display for Describe<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let descriptor = self.message.descriptor();
        for field in descriptor.fields() {
            let name = field.name();
            if field.is_repeated() {
                // Message elements have no value form.
                for value in self.message.values(name).unwrap_or_default() {
                    self.line(f, field, &value)?;
                }
            } else if let Ok(child) = self.message.message(name) {
                self.indent(f)?;
                writeln!(f, "{name} {{")?;
                let nested = Describe {
                    message: child,
                    depth: self.depth.saturating_add(1),
                };
                fmt::Display::fmt(&nested, f)?;
                self.indent(f)?;
                f.write_str("}\n")?;
            } else if let Ok(Some(value)) = self.message.value(name) {
                self.line(f, field, &value)?;
            }
        }
        Ok(())
    }
}
