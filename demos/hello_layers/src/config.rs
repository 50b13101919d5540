//! Schema of the demo configuration.

use layered_config::{ConfigEnum, ConfigMessage};

/// Example enum field.
#[derive(ConfigEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnumField {
    /// `TYPE1`.
    #[default]
    Type1,
    /// `TYPE2`.
    Type2,
}

/// Nested message.
#[derive(ConfigMessage, Clone, Debug, Default, PartialEq)]
pub struct Inner {
    /// Nested flag.
    pub enabled: bool,
}

/// Top-level demo configuration.
#[derive(ConfigMessage, Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// Top-level flag.
    pub enabled: bool,
    /// Signed 32-bit value.
    pub field_i32: i32,
    /// Signed 64-bit value.
    pub field_i64: i64,
    /// Unsigned 32-bit value.
    pub field_u32: u32,
    /// Unsigned 64-bit value.
    pub field_u64: u64,
    /// Single-precision value.
    pub field_float: f32,
    /// Double-precision value.
    pub field_double: f64,
    /// Free text.
    pub field_string: String,
    /// Nested message.
    pub field_message: Inner,
    /// Repeated integers, replaced wholesale by each layer.
    pub field_repeated: Vec<i32>,
    /// Enum value.
    pub field_enum: EnumField,
    /// Repeated enum values.
    pub field_repeated_enum: Vec<EnumField>,
}
