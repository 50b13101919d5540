//! Schema and reflection generated by the derives.

mod common;

use std::sync::Arc;

use anyhow::{Result, anyhow, ensure};
use common::{Config, EnumField, Inner};
use layered_config::schema::{
    EnumType, FieldKind, Message, MessageType, ReflectError, Value, describe,
};
use layered_config::{ConfigEnum, ConfigMessage, Parser};
use rstest::rstest;

#[derive(ConfigEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Level {
    #[default]
    Low,
    #[layered_config(name = "MAXIMUM")]
    High = 10,
    Higher,
}

#[derive(ConfigMessage, Debug, Default)]
#[layered_config(name = "Service")]
struct Renamed {
    #[layered_config(name = "listen_port")]
    port: u32,
    #[layered_config(skip)]
    cache: Vec<u8>,
    level: Level,
}

#[rstest]
fn descriptors_follow_declaration_order() {
    let desc = Config::message_descriptor();
    let names: Vec<&str> = desc.fields().iter().map(|f| f.name()).collect();
    assert_eq!(
        names,
        [
            "enabled",
            "field_i32",
            "field_u32",
            "field_i64",
            "field_u64",
            "field_double",
            "field_float",
            "field_string",
            "field_message",
            "field_repeated",
            "field_enum",
            "field_repeated_enum",
        ]
    );
    assert_eq!(desc.name(), "Config");
    let repeated = desc.field("field_repeated_enum").expect("field");
    assert!(repeated.is_repeated());
    assert!(matches!(repeated.kind(), FieldKind::Enum(e) if e.name() == "EnumField"));
    let nested = desc.field("field_message").and_then(|f| f.message_type());
    assert_eq!(nested.map(|m| m.name()), Some("Inner"));
}

#[rstest]
fn descriptors_are_shared() {
    assert!(Arc::ptr_eq(
        &Config::message_descriptor(),
        &Config::default().descriptor()
    ));
}

#[rstest]
fn renames_and_skips_shape_the_schema() {
    let desc = Renamed::message_descriptor();
    assert_eq!(desc.name(), "Service");
    let names: Vec<&str> = desc.fields().iter().map(|f| f.name()).collect();
    assert_eq!(names, ["listen_port", "level"]);
    let levels = Level::enum_descriptor();
    let values: Vec<(&str, i32)> = levels.values().iter().map(|v| (v.name(), v.number())).collect();
    assert_eq!(values, [("LOW", 0), ("MAXIMUM", 10), ("HIGHER", 11)]);
    assert_eq!(Level::from_number(11), Some(Level::Higher));
    assert_eq!(Level::High.number(), 10);
}

#[rstest]
fn renamed_fields_parse_under_their_new_names() -> Result<()> {
    let parser = Parser::builder()
        .add_yaml_str("doc", "listen_port: 8080\nlevel: maximum\n")
        .build();
    let (svc, result) = parser.parse_into::<Renamed>();
    result.map_err(|errors| anyhow!("{errors}"))?;
    ensure!(svc.port == 8080 && svc.level == Level::High, "got {svc:?}");
    ensure!(svc.cache.is_empty(), "skipped field must stay untouched");
    Ok(())
}

#[rstest]
fn reflective_access_round_trips_through_fields() -> Result<()> {
    let mut config = Config::default();
    config.set_value("field_i32", Value::Int32(12))?;
    config.set_values("field_repeated_enum", vec![Value::Enum(1), Value::Enum(0)])?;
    config.message_mut("field_message")?.set_value("enabled", Value::Bool(true))?;
    ensure!(config.field_i32 == 12, "scalar not written");
    ensure!(
        config.field_repeated_enum == [EnumField::Type2, EnumField::Type1],
        "enum list not written"
    );
    ensure!(config.field_message == Inner { enabled: true }, "nested not written");
    ensure!(config.value("field_enum")? == Some(Value::Enum(0)), "enum read");
    ensure!(
        config.values("field_repeated_enum")? == [Value::Enum(1), Value::Enum(0)],
        "enum list read"
    );
    Ok(())
}

#[rstest]
fn reflective_misuse_is_reported() {
    let mut config = Config::default();
    assert!(matches!(
        config.set_value("nope", Value::Bool(true)),
        Err(ReflectError::NoSuchField { .. })
    ));
    assert!(matches!(
        config.set_value("field_enum", Value::Enum(5)),
        Err(ReflectError::UnknownEnumNumber { number: 5, .. })
    ));
    assert!(matches!(
        config.set_value("field_message", Value::Bool(true)),
        Err(ReflectError::TypeMismatch { .. })
    ));
    assert!(matches!(
        config.set_value("field_repeated", Value::Int32(1)),
        Err(ReflectError::Repeated { .. })
    ));
    assert!(matches!(
        config.message("field_i32"),
        Err(ReflectError::NotAMessage { .. })
    ));
    assert_eq!(config.field_enum, EnumField::Type1);
}

#[rstest]
fn describe_renders_derived_messages() {
    let config = Config {
        field_string: String::from("hi"),
        field_repeated: vec![1, 2],
        field_enum: EnumField::Type2,
        ..Config::default()
    };
    let text = describe(&config);
    assert!(text.contains("field_string: \"hi\"\n"));
    assert!(text.contains("field_repeated: 1\nfield_repeated: 2\n"));
    assert!(text.contains("field_message {\n  enabled: false\n}\n"));
    assert!(text.contains("field_enum: TYPE2\n"));
}
