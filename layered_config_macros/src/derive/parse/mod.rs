//! Parsing utilities for the `ConfigMessage` and `ConfigEnum` derives.
//!
//! Attribute metadata lives under `#[layered_config(...)]`. Unknown keys are
//! rejected so a misspelt attribute fails the build instead of silently
//! changing the schema.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr};

mod input;
mod literals;
#[cfg(test)]
mod tests;

pub(crate) use input::{EnumInput, MessageInput, parse_enum, parse_message};
use literals::lit_str;

/// Attributes accepted on the deriving struct or enum.
#[derive(Default, Clone)]
pub(crate) struct TypeAttrs {
    /// Overrides the schema name, which defaults to the type identifier.
    pub name: Option<String>,
    /// Set by `#[layered_config(crate = "...")]` when the runtime crate is
    /// renamed in the user's manifest.
    pub crate_path: Option<syn::Path>,
}

impl TypeAttrs {
    /// Path generated code uses to reach the runtime crate, `::layered_config`
    /// unless the type overrides it.
    #[must_use]
    pub fn runtime_path(&self) -> TokenStream {
        self.crate_path
            .as_ref()
            .map_or_else(|| quote! { ::layered_config }, ToTokens::to_token_stream)
    }
}

/// Attributes accepted on a struct field.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub name: Option<String>,
    pub skip: bool,
}

/// Attributes accepted on an enum variant.
#[derive(Default, Clone)]
pub(crate) struct VariantAttrs {
    pub name: Option<String>,
}

/// Iterate all `#[layered_config(...)]` attributes once and apply a callback.
fn parse_layered_config<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("layered_config")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

fn unknown_key(meta: &ParseNestedMeta, place: &str) -> syn::Error {
    let key = meta
        .path
        .get_ident()
        .map_or_else(|| String::from("?"), ToString::to_string);
    meta.error(format!("unknown layered_config attribute `{key}` on {place}"))
}

fn non_empty(lit: &LitStr, key: &str) -> syn::Result<String> {
    let value = lit.value();
    if value.is_empty() {
        return Err(syn::Error::new(lit.span(), format!("{key} must not be empty")));
    }
    Ok(value)
}

/// Canonical field names are lower `snake_case` so both key spellings and
/// environment variable names can be derived from them.
fn snake_case_name(lit: &LitStr) -> syn::Result<String> {
    let value = non_empty(lit, "name")?;
    let mut chars = value.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_lowercase());
    if !starts_with_letter
        || !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(syn::Error::new(
            lit.span(),
            format!("field name '{value}' must be lower snake_case"),
        ));
    }
    Ok(value)
}

/// Extracts `#[layered_config(...)]` metadata applied to a struct or enum.
pub(crate) fn parse_type_attrs(attrs: &[Attribute]) -> syn::Result<TypeAttrs> {
    let mut out = TypeAttrs::default();
    parse_layered_config(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("name") => {
                let lit = lit_str(meta, "name")?;
                out.name = Some(non_empty(&lit, "name")?);
                Ok(())
            }
            Some("crate") => {
                let s = lit_str(meta, "crate")?;
                let path: syn::Path =
                    syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
                out.crate_path = Some(path);
                Ok(())
            }
            _ => Err(unknown_key(meta, "a type")),
        }
    })?;
    Ok(out)
}

/// Parses field-level `#[layered_config(...)]` attributes.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_layered_config(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("name") => {
                out.name = Some(snake_case_name(&lit_str(meta, "name")?)?);
                Ok(())
            }
            Some("skip") => {
                out.skip = true;
                Ok(())
            }
            _ => Err(unknown_key(meta, "a field")),
        }
    })?;
    Ok(out)
}

/// Parses variant-level `#[layered_config(...)]` attributes.
pub(crate) fn parse_variant_attrs(attrs: &[Attribute]) -> syn::Result<VariantAttrs> {
    let mut out = VariantAttrs::default();
    parse_layered_config(attrs, |meta| {
        if meta.path.is_ident("name") {
            let lit = lit_str(meta, "name")?;
            out.name = Some(non_empty(&lit, "name")?);
            Ok(())
        } else {
            Err(unknown_key(meta, "a variant"))
        }
    })?;
    Ok(out)
}
