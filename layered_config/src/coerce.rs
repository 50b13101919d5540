//! Conversion of scalar text into typed [`Value`]s.

use std::fmt::Display;
use std::str::FromStr;

use crate::error::{ParserErrorKind, UnsupportedType};
use crate::schema::{EnumDescriptor, FieldDescriptor, FieldKind, Value};

/// Converts `text` into a value of `field`'s declared kind.
///
/// Numbers are parsed from the trimmed text, booleans accept `true` and
/// `false` in lower, title or upper case, strings are kept verbatim and
/// enums are resolved through [`resolve_enum`].
///
/// # Errors
///
/// Returns [`ParserErrorKind::Conversion`] when the text does not parse,
/// [`ParserErrorKind::InvalidEnumValue`] for unknown enum names and
/// [`ParserErrorKind::UnsupportedType`] for byte fields and message
/// elements.
///
/// # Examples
///
/// ```
/// use layered_config::coerce::coerce_scalar;
/// use layered_config::schema::{FieldDescriptor, FieldKind, Value};
///
/// let port = FieldDescriptor::new("port", FieldKind::UInt32);
/// assert_eq!(coerce_scalar(" 8080 ", &port), Ok(Value::UInt32(8080)));
/// assert!(coerce_scalar("-1", &port).is_err());
/// ```
pub fn coerce_scalar(text: &str, field: &FieldDescriptor) -> Result<Value, ParserErrorKind> {
    match field.kind() {
        FieldKind::Bool => parse_bool(text).map(Value::Bool),
        FieldKind::Int32 => parse_number(text, "int32").map(Value::Int32),
        FieldKind::Int64 => parse_number(text, "int64").map(Value::Int64),
        FieldKind::UInt32 => parse_number(text, "uint32").map(Value::UInt32),
        FieldKind::UInt64 => parse_number(text, "uint64").map(Value::UInt64),
        FieldKind::Float => parse_number(text, "float").map(Value::Float),
        FieldKind::Double => parse_number(text, "double").map(Value::Double),
        FieldKind::String => Ok(Value::String(text.to_owned())),
        FieldKind::Enum(desc) => resolve_enum(text, desc, field.name()).map(Value::Enum),
        FieldKind::Bytes => Err(ParserErrorKind::UnsupportedType(UnsupportedType::Bytes)),
        FieldKind::Message(_) if field.is_repeated() => Err(ParserErrorKind::UnsupportedType(
            UnsupportedType::RepeatedMessage,
        )),
        FieldKind::Message(_) | FieldKind::Group => Err(ParserErrorKind::InternalShape(
            format!("field {} of type {} is not a scalar", field.name(), field.kind().type_name()),
        )),
    }
}

/// Resolves enum text to its number.
///
/// The text is upper-cased before matching, so `type2` selects `TYPE2`.
///
/// # Errors
///
/// Returns [`ParserErrorKind::InvalidEnumValue`] naming the original text
/// and `field` when no value matches.
pub fn resolve_enum(text: &str, desc: &EnumDescriptor, field: &str) -> Result<i32, ParserErrorKind> {
    desc.find_by_name(&text.to_uppercase())
        .map(|v| v.number())
        .ok_or_else(|| ParserErrorKind::InvalidEnumValue {
            value: text.to_owned(),
            field: field.to_owned(),
        })
}

fn parse_bool(text: &str) -> Result<bool, ParserErrorKind> {
    match text.trim() {
        "true" | "True" | "TRUE" => Ok(true),
        "false" | "False" | "FALSE" => Ok(false),
        _ => Err(conversion(text, "bool", "expected true or false")),
    }
}

fn parse_number<T>(text: &str, target: &'static str) -> Result<T, ParserErrorKind>
where
    T: FromStr,
    T::Err: Display,
{
    text.trim()
        .parse()
        .map_err(|e: T::Err| conversion(text, target, e))
}

fn conversion(text: &str, target: &'static str, reason: impl Display) -> ParserErrorKind {
    ParserErrorKind::Conversion {
        text: text.to_owned(),
        target,
        reason: reason.to_string(),
        variable: None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::ErrorCategory;
    use rstest::{fixture, rstest};

    #[fixture]
    fn kinds() -> Arc<EnumDescriptor> {
        Arc::new(EnumDescriptor::new("EnumField", [("TYPE1", 0), ("TYPE2", 1)]))
    }

    fn field(kind: FieldKind) -> FieldDescriptor {
        FieldDescriptor::new("field", kind)
    }

    #[rstest]
    #[case(FieldKind::Bool, "True", Value::Bool(true))]
    #[case(FieldKind::Bool, "FALSE", Value::Bool(false))]
    #[case(FieldKind::Int32, "-42", Value::Int32(-42))]
    #[case(FieldKind::Int64, "9000000000", Value::Int64(9_000_000_000))]
    #[case(FieldKind::UInt32, " 7 ", Value::UInt32(7))]
    #[case(FieldKind::UInt64, "18446744073709551615", Value::UInt64(u64::MAX))]
    #[case(FieldKind::Float, "1.5", Value::Float(1.5))]
    #[case(FieldKind::Double, "-0.25", Value::Double(-0.25))]
    #[case(FieldKind::String, " spaced ", Value::String(String::from(" spaced ")))]
    fn converts_scalars(#[case] kind: FieldKind, #[case] text: &str, #[case] expected: Value) {
        assert_eq!(coerce_scalar(text, &field(kind)), Ok(expected));
    }

    #[rstest]
    #[case(FieldKind::Bool, "yes")]
    #[case(FieldKind::Int32, "3000000000")]
    #[case(FieldKind::UInt32, "-1")]
    #[case(FieldKind::Double, "abc")]
    fn rejects_malformed_text(#[case] kind: FieldKind, #[case] text: &str) {
        let err = coerce_scalar(text, &field(kind)).expect_err("conversion must fail");
        assert_eq!(err.category(), ErrorCategory::Conversion);
    }

    #[rstest]
    #[case("TYPE2", 1)]
    #[case("type1", 0)]
    #[case("Type2", 1)]
    fn enums_match_case_insensitively(kinds: Arc<EnumDescriptor>, #[case] text: &str, #[case] n: i32) {
        assert_eq!(resolve_enum(text, &kinds, "field_enum"), Ok(n));
    }

    #[rstest]
    fn unknown_enum_names_the_field(kinds: Arc<EnumDescriptor>) {
        let err = coerce_scalar("NOT_REAL", &FieldDescriptor::new("field_enum", FieldKind::Enum(kinds)))
            .expect_err("unknown name");
        assert_eq!(err.to_string(), "Invalid enum value 'NOT_REAL' for field field_enum");
    }

    #[rstest]
    fn bytes_and_message_elements_are_unsupported() {
        let inner = Arc::new(
            crate::schema::MessageDescriptor::builder("Inner")
                .build()
                .expect("descriptor"),
        );
        assert_eq!(
            coerce_scalar("x", &field(FieldKind::Bytes)),
            Err(ParserErrorKind::UnsupportedType(UnsupportedType::Bytes))
        );
        assert_eq!(
            coerce_scalar("x", &FieldDescriptor::repeated("items", FieldKind::Message(inner))),
            Err(ParserErrorKind::UnsupportedType(UnsupportedType::RepeatedMessage))
        );
        assert_eq!(
            coerce_scalar("x", &field(FieldKind::Group)).map_err(|e| e.category()),
            Err(ErrorCategory::InternalShape)
        );
    }
}
