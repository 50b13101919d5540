//! Input parsing for the derives.
//!
//! Each parser gathers the type identifier, its members and all attribute
//! metadata in one pass, validating names eagerly so expansion can fail fast
//! with an error pointing at the offending item.

use std::collections::HashMap;

use heck::ToShoutySnakeCase;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Generics, Ident, Type};

use super::literals::discriminant;
use super::{TypeAttrs, parse_field_attrs, parse_type_attrs, parse_variant_attrs};

/// A struct deriving `ConfigMessage`.
pub(crate) struct MessageInput {
    pub ident: Ident,
    pub attrs: TypeAttrs,
    /// Described fields in declaration order; skipped fields are absent.
    pub fields: Vec<MessageField>,
}

impl MessageInput {
    /// Schema name of the message.
    pub(crate) fn name(&self) -> String {
        self.attrs.name.clone().unwrap_or_else(|| self.ident.unraw().to_string())
    }
}

/// One described field of a message.
pub(crate) struct MessageField {
    pub member: Ident,
    pub ty: Type,
    /// Canonical `snake_case` key.
    pub name: String,
}

/// An enum deriving `ConfigEnum`.
pub(crate) struct EnumInput {
    pub ident: Ident,
    pub attrs: TypeAttrs,
    pub values: Vec<EnumValueInput>,
}

impl EnumInput {
    /// Schema name of the enum.
    pub(crate) fn name(&self) -> String {
        self.attrs.name.clone().unwrap_or_else(|| self.ident.unraw().to_string())
    }
}

/// One variant of a derived enum.
///
/// Numbers follow Rust's discriminant rules: an explicit integer literal, or
/// one more than the previous variant's number.
pub(crate) struct EnumValueInput {
    pub variant: Ident,
    pub name: String,
    pub number: i32,
}

fn reject_generics(generics: &Generics, derive: &str) -> syn::Result<()> {
    if generics.params.is_empty() {
        Ok(())
    } else {
        Err(syn::Error::new_spanned(
            generics,
            format!("{derive} does not support generic types"),
        ))
    }
}

/// Gathers the fields of a struct deriving `ConfigMessage`.
pub(crate) fn parse_message(input: &DeriveInput) -> syn::Result<MessageInput> {
    let ident = input.ident.clone();
    reject_generics(&input.generics, "ConfigMessage")?;
    let attrs = parse_type_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "ConfigMessage requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "ConfigMessage can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::new();
    let mut seen = HashMap::new();
    for field in named {
        let field_attrs = parse_field_attrs(&field.attrs)?;
        if field_attrs.skip {
            continue;
        }
        let Some(member) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "ConfigMessage requires named fields"));
        };
        let name = field_attrs
            .name
            .unwrap_or_else(|| member.unraw().to_string());
        if let Some(first) = seen.insert(name.clone(), member.clone()) {
            return Err(syn::Error::new_spanned(
                field,
                format!("field name '{name}' is already used by `{first}`"),
            ));
        }
        fields.push(MessageField {
            member,
            ty: field.ty.clone(),
            name,
        });
    }
    Ok(MessageInput {
        ident,
        attrs,
        fields,
    })
}

/// Gathers the variants of an enum deriving `ConfigEnum`.
pub(crate) fn parse_enum(input: &DeriveInput) -> syn::Result<EnumInput> {
    let ident = input.ident.clone();
    reject_generics(&input.generics, "ConfigEnum")?;
    let attrs = parse_type_attrs(&input.attrs)?;
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            ident,
            "ConfigEnum can only be derived for enums",
        ));
    };
    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            ident,
            "ConfigEnum requires at least one variant",
        ));
    }

    let mut values = Vec::new();
    let mut names = HashMap::new();
    let mut numbers = HashMap::new();
    let mut next = Some(0_i32);
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "ConfigEnum variants cannot carry fields",
            ));
        }
        let variant_attrs = parse_variant_attrs(&variant.attrs)?;
        let name = variant_attrs
            .name
            .unwrap_or_else(|| variant.ident.unraw().to_string().to_shouty_snake_case());
        let number = match &variant.discriminant {
            Some((_, expr)) => discriminant(expr)?,
            None => next.ok_or_else(|| {
                syn::Error::new_spanned(variant, "implicit discriminant overflows i32")
            })?,
        };
        next = number.checked_add(1);
        if let Some(first) = names.insert(name.clone(), variant.ident.clone()) {
            return Err(syn::Error::new_spanned(
                variant,
                format!("enum value name '{name}' is already used by `{first}`"),
            ));
        }
        if let Some(first) = numbers.insert(number, variant.ident.clone()) {
            return Err(syn::Error::new_spanned(
                variant,
                format!("enum number {number} is already used by `{first}`"),
            ));
        }
        values.push(EnumValueInput {
            variant: variant.ident.clone(),
            name,
            number,
        });
    }
    Ok(EnumInput {
        ident,
        attrs,
        values,
    })
}
