//! Environment variables as a configuration source.
//!
//! Each field maps to a variable named from the upper-cased prefix and the
//! field's path: `field_message.enabled` under `MY_APP` reads
//! `MY_APP_FIELD_MESSAGE_ENABLED`. Repeated fields read `<NAME>_0`,
//! `<NAME>_1`, and so on up to the first unset index.

mod lookup;

use std::env::VarError;

use crate::case::{all_caps, cook_env_var};
use crate::coerce::coerce_scalar;
use crate::error::{ErrorAccumulator, FieldPath, ParserErrorKind, UnsupportedType};
use crate::options::ParserOptions;
use crate::schema::{FieldDescriptor, FieldKind, Message};

use super::Source;

pub use lookup::{EnvLookup, MapEnv, ProcessEnv};

/// Label attached to errors reported by [`EnvSource`].
pub const ENV_LABEL: &str = "environment";

enum Probe {
    Unset,
    Invalid,
    Text(String),
}

/// Overlays environment variables sharing a prefix.
///
/// # Examples
///
/// ```
/// use layered_config::{EnvSource, MapEnv, ParserOptions, Source};
/// use layered_config::schema::{DynamicMessage, FieldDescriptor, FieldKind, Message, MessageDescriptor, Value};
/// use std::sync::Arc;
///
/// let desc = MessageDescriptor::builder("Config")
///     .field(FieldDescriptor::repeated("ports", FieldKind::UInt32))
///     .build()?;
/// let mut config = DynamicMessage::new(Arc::new(desc));
/// let env = MapEnv::new().with("MY_APP_PORTS_0", "80").with("MY_APP_PORTS_1", "443");
/// EnvSource::with_lookup("my_app", env).populate(&mut config, &ParserOptions::default())?;
/// assert_eq!(config.values("ports")?, vec![Value::UInt32(80), Value::UInt32(443)]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct EnvSource {
    prefix: String,
    lookup: Box<dyn EnvLookup>,
}

impl EnvSource {
    /// Reads the process environment under `prefix`.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self::with_lookup(prefix, ProcessEnv)
    }

    /// Reads `lookup` under `prefix`.
    #[must_use]
    pub fn with_lookup(prefix: &str, lookup: impl EnvLookup + 'static) -> Self {
        Self {
            prefix: all_caps(prefix),
            lookup: Box::new(lookup),
        }
    }

    /// Upper-cased prefix shared by every variable.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn probe(&self, name: &str, field: &FieldDescriptor, path: &FieldPath, errors: &mut ErrorAccumulator) -> Probe {
        match self.lookup.var(name) {
            Ok(text) => Probe::Text(text),
            Err(VarError::NotPresent) => {
                tracing::trace!(variable = name, "environment variable unset");
                Probe::Unset
            }
            Err(VarError::NotUnicode(raw)) => {
                errors.push(
                    path,
                    ParserErrorKind::Conversion {
                        text: raw.to_string_lossy().into_owned(),
                        target: field.kind().type_name(),
                        reason: String::from("value is not valid unicode"),
                        variable: Some(name.to_owned()),
                    },
                );
                Probe::Invalid
            }
        }
    }

    fn message(
        &self,
        message: &mut dyn Message,
        prefix: &str,
        path: &FieldPath,
        options: &ParserOptions,
        errors: &mut ErrorAccumulator,
    ) {
        let descriptor = message.descriptor();
        for field in descriptor.fields() {
            let segment = options.key_case.external(field.name());
            let name = cook_env_var(prefix, &segment);
            let field_path = path.child(&segment);
            if field.is_repeated() {
                self.repeated(message, field, &name, &field_path, errors);
                continue;
            }
            match field.kind() {
                FieldKind::Message(_) => match message.message_mut(field.name()) {
                    Ok(child) => self.message(child, &name, &field_path, options, errors),
                    Err(err) => {
                        errors.push(&field_path, ParserErrorKind::InternalShape(err.to_string()));
                    }
                },
                FieldKind::Group => {
                    if matches!(self.probe(&name, field, &field_path, errors), Probe::Text(_)) {
                        errors.push(
                            &field_path,
                            ParserErrorKind::InternalShape(format!(
                                "unexpected type group for field {}",
                                field.name()
                            )),
                        );
                    }
                }
                _ => self.scalar(message, field, &name, &field_path, errors),
            }
        }
    }

    fn scalar(
        &self,
        message: &mut dyn Message,
        field: &FieldDescriptor,
        name: &str,
        path: &FieldPath,
        errors: &mut ErrorAccumulator,
    ) {
        let Probe::Text(text) = self.probe(name, field, path, errors) else {
            return;
        };
        match coerce_scalar(&text, field) {
            Ok(value) => {
                tracing::debug!(variable = name, value = %value, "setting field from environment");
                if let Err(err) = message.set_value(field.name(), value) {
                    errors.push(path, ParserErrorKind::InternalShape(err.to_string()));
                }
            }
            Err(kind) => errors.push(path, kind.with_variable(name)),
        }
    }

    fn repeated(
        &self,
        message: &mut dyn Message,
        field: &FieldDescriptor,
        name: &str,
        path: &FieldPath,
        errors: &mut ErrorAccumulator,
    ) {
        let first = format!("{name}_0");
        if matches!(self.lookup.var(&first), Err(VarError::NotPresent)) {
            tracing::trace!(variable = %first, "repeated field not set in environment");
            return;
        }
        let unsupported = match field.kind() {
            FieldKind::Message(_) => Some(UnsupportedType::RepeatedMessage),
            FieldKind::Bytes => Some(UnsupportedType::Bytes),
            _ => None,
        };
        if let Some(kind) = unsupported {
            errors.push(path, ParserErrorKind::UnsupportedType(kind));
            return;
        }
        let mut values = Vec::new();
        for i in 0_usize.. {
            let element = format!("{name}_{i}");
            let item_path = path.index(i);
            match self.probe(&element, field, &item_path, errors) {
                Probe::Unset => break,
                Probe::Invalid => {}
                Probe::Text(text) => match coerce_scalar(&text, field) {
                    Ok(value) => values.push(value),
                    Err(kind) => errors.push(&item_path, kind.with_variable(&element)),
                },
            }
        }
        tracing::debug!(variable = name, count = values.len(), "replacing repeated field from environment");
        if let Err(err) = message.set_values(field.name(), values) {
            errors.push(path, ParserErrorKind::InternalShape(err.to_string()));
        }
    }
}

impl Source for EnvSource {
    fn label(&self) -> &str {
        ENV_LABEL
    }

    fn apply(&self, message: &mut dyn Message, options: &ParserOptions, errors: &mut ErrorAccumulator) {
        self.message(message, &self.prefix, &FieldPath::root(), options, errors);
    }
}

#[cfg(test)]
mod tests;
