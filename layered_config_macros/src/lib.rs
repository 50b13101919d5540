//! Procedural macros for `layered_config`.
//!
//! [`ConfigMessage`] describes a struct with named fields as a configuration
//! message, and [`ConfigEnum`] describes a fieldless enum as an enum field
//! type. Both generate the schema and reflective accessors the parser uses
//! to populate values from YAML documents and environment variables.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive `layered_config::schema::Message` and companion traits for a
/// struct with named fields.
///
/// Every field type must implement `layered_config::schema::ReflectField`:
/// the scalar primitives, `String`, `layered_config::schema::Bytes`, derived
/// messages and enums, and `Vec`s of those. The struct must also implement
/// `Debug` and `Default`.
///
/// Attributes under `#[layered_config(...)]`:
///
/// - on the struct, `name = "..."` overrides the message name and
///   `crate = "..."` names an aliased `layered_config` dependency;
/// - on a field, `name = "..."` overrides the canonical `snake_case` key and
///   `skip` leaves the field out of the schema.
#[proc_macro_derive(ConfigMessage, attributes(layered_config))]
pub fn derive_config_message(input_tokens: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input_tokens as DeriveInput);
    derive::message(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derive `layered_config::schema::EnumType` for a fieldless enum.
///
/// Value names default to the `SCREAMING_SNAKE_CASE` form of each variant
/// and numbers to the explicit discriminant or, failing that, the variant's
/// position. `#[layered_config(name = "...")]` renames a variant or, on the
/// enum itself, the enum; `#[layered_config(crate = "...")]` names an
/// aliased `layered_config` dependency.
#[proc_macro_derive(ConfigEnum, attributes(layered_config))]
pub fn derive_config_enum(input_tokens: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input_tokens as DeriveInput);
    derive::enumeration(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
