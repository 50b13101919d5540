//! Shared schema for integration tests.
//!
//! Mirrors a typical service configuration: every scalar kind, a nested
//! message, a repeated scalar, and singular and repeated enums.

use layered_config::{ConfigEnum, ConfigMessage};

#[derive(ConfigEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnumField {
    #[default]
    Type1,
    Type2,
}

#[derive(ConfigMessage, Clone, Debug, Default, PartialEq)]
pub struct Inner {
    pub enabled: bool,
}

#[derive(ConfigMessage, Clone, Debug, Default, PartialEq)]
pub struct Config {
    pub enabled: bool,
    pub field_i32: i32,
    pub field_u32: u32,
    pub field_i64: i64,
    pub field_u64: u64,
    pub field_double: f64,
    pub field_float: f32,
    pub field_string: String,
    pub field_message: Inner,
    pub field_repeated: Vec<i32>,
    pub field_enum: EnumField,
    pub field_repeated_enum: Vec<EnumField>,
}

/// Document setting every field of [`Config`].
pub const ALL_FIELDS: &str = "
enabled: true
field_i32: -32
field_u32: 32
field_i64: -64
field_u64: 64
field_double: 2.75
field_float: 0.12345
field_string: Yes, this is some random string for testing
field_message:
    enabled: true
field_repeated:
    - 1
    - 2
    - 3
field_enum: TYPE2
field_repeated_enum:
    - TYPE1
    - TYPE2
";

/// The value [`ALL_FIELDS`] describes.
pub fn all_fields() -> Config {
    Config {
        enabled: true,
        field_i32: -32,
        field_u32: 32,
        field_i64: -64,
        field_u64: 64,
        field_double: 2.75,
        field_float: 0.12345,
        field_string: String::from("Yes, this is some random string for testing"),
        field_message: Inner { enabled: true },
        field_repeated: vec![1, 2, 3],
        field_enum: EnumField::Type2,
        field_repeated_enum: vec![EnumField::Type1, EnumField::Type2],
    }
}
