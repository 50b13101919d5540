//! Unit tests for the environment source using an in-memory namespace.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::case::KeyCase;
use crate::error::{ErrorCategory, ParseResult};
use crate::schema::{DynamicMessage, EnumDescriptor, MessageDescriptor, Value};

#[fixture]
fn message() -> DynamicMessage {
    let inner = MessageDescriptor::builder("Inner")
        .field(FieldDescriptor::new("enabled", FieldKind::Bool))
        .build()
        .expect("inner");
    let kinds = Arc::new(EnumDescriptor::new("EnumField", [("TYPE1", 0), ("TYPE2", 1)]));
    let outer = MessageDescriptor::builder("Config")
        .field(FieldDescriptor::new("field_i32", FieldKind::Int32))
        .field(FieldDescriptor::new("field_string", FieldKind::String))
        .field(FieldDescriptor::new("field_message", FieldKind::Message(Arc::new(inner))))
        .field(FieldDescriptor::repeated("field_repeated", FieldKind::Int32))
        .field(FieldDescriptor::new("field_enum", FieldKind::Enum(Arc::clone(&kinds))))
        .field(FieldDescriptor::repeated("field_repeated_enum", FieldKind::Enum(kinds)))
        .field(FieldDescriptor::new("field_bytes", FieldKind::Bytes))
        .build()
        .expect("outer");
    DynamicMessage::new(Arc::new(outer))
}

fn populate(message: &mut DynamicMessage, env: MapEnv, options: &ParserOptions) -> ParseResult {
    EnvSource::with_lookup("prefix", env).populate(message, options)
}

#[rstest]
fn reads_scalars_nested_and_enums(mut message: DynamicMessage) {
    let env = MapEnv::new()
        .with("PREFIX_FIELD_I32", "-12")
        .with("PREFIX_FIELD_STRING", "hello world")
        .with("PREFIX_FIELD_MESSAGE_ENABLED", "true")
        .with("PREFIX_FIELD_ENUM", "type2");
    populate(&mut message, env, &ParserOptions::default()).expect("clean parse");
    assert_eq!(message.value("field_i32"), Ok(Some(Value::Int32(-12))));
    assert_eq!(
        message.value("field_string"),
        Ok(Some(Value::String(String::from("hello world"))))
    );
    assert_eq!(message.value("field_enum"), Ok(Some(Value::Enum(1))));
    let inner = message.message("field_message").expect("nested");
    assert_eq!(inner.value("enabled"), Ok(Some(Value::Bool(true))));
}

#[rstest]
fn probes_repeated_indices_until_first_gap(mut message: DynamicMessage) {
    let env = MapEnv::new()
        .with("PREFIX_FIELD_REPEATED_0", "1")
        .with("PREFIX_FIELD_REPEATED_1", "2")
        .with("PREFIX_FIELD_REPEATED_2", "3")
        .with("PREFIX_FIELD_REPEATED_4", "5");
    populate(&mut message, env, &ParserOptions::default()).expect("clean parse");
    assert_eq!(
        message.values("field_repeated"),
        Ok(vec![Value::Int32(1), Value::Int32(2), Value::Int32(3)])
    );
}

#[rstest]
fn leaves_repeated_fields_without_index_zero(mut message: DynamicMessage) {
    message
        .set_values("field_repeated", vec![Value::Int32(9)])
        .expect("seed");
    let env = MapEnv::new().with("PREFIX_FIELD_REPEATED_1", "2");
    populate(&mut message, env, &ParserOptions::default()).expect("clean parse");
    assert_eq!(message.values("field_repeated"), Ok(vec![Value::Int32(9)]));
}

#[rstest]
fn repeated_enums_are_upper_cased(mut message: DynamicMessage) {
    let env = MapEnv::new()
        .with("PREFIX_FIELD_REPEATED_ENUM_0", "type2")
        .with("PREFIX_FIELD_REPEATED_ENUM_1", "TYPE1");
    populate(&mut message, env, &ParserOptions::default()).expect("clean parse");
    assert_eq!(
        message.values("field_repeated_enum"),
        Ok(vec![Value::Enum(1), Value::Enum(0)])
    );
}

#[rstest]
fn conversion_errors_name_the_variable(mut message: DynamicMessage) {
    let env = MapEnv::new()
        .with("PREFIX_FIELD_I32", "not a number")
        .with("PREFIX_FIELD_REPEATED_0", "1")
        .with("PREFIX_FIELD_REPEATED_1", "x");
    let errors = populate(&mut message, env, &ParserOptions::default()).expect_err("two failures");
    let rendered: Vec<String> = errors.iter().map(ToString::to_string).collect();
    assert_eq!(rendered.len(), 2);
    assert!(rendered.first().is_some_and(|e| e.ends_with("(from PREFIX_FIELD_I32)")));
    assert!(
        rendered
            .get(1)
            .is_some_and(|e| e.starts_with("environment: field_repeated[1]:")
                && e.ends_with("(from PREFIX_FIELD_REPEATED_1)"))
    );
    assert_eq!(message.value("field_i32"), Ok(None));
    assert_eq!(message.values("field_repeated"), Ok(vec![Value::Int32(1)]));
}

#[rstest]
fn bytes_are_reported_only_when_set(mut message: DynamicMessage) {
    assert_eq!(
        populate(&mut message, MapEnv::new(), &ParserOptions::default()),
        Ok(())
    );
    let env = MapEnv::new().with("PREFIX_FIELD_BYTES", "abc");
    let errors = populate(&mut message, env, &ParserOptions::default()).expect_err("bytes set");
    assert_eq!(
        errors.iter().map(crate::ParserError::category).collect::<Vec<_>>(),
        [ErrorCategory::UnsupportedType]
    );
}

#[rstest]
fn camel_case_keeps_variable_names(mut message: DynamicMessage) {
    let env = MapEnv::new().with("PREFIX_FIELD_I32", "3");
    let options = ParserOptions::default().with_key_case(KeyCase::Camel);
    populate(&mut message, env, &options).expect("clean parse");
    assert_eq!(message.value("field_i32"), Ok(Some(Value::Int32(3))));
}

#[rstest]
#[case("my_app", "MY_APP")]
#[case("MiXeD", "MIXED")]
fn prefixes_are_upper_cased(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(EnvSource::with_lookup(raw, MapEnv::new()).prefix(), expected);
}
