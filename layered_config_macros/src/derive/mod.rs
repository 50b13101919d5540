//! Expansion entry points for the derives.

mod generate;
mod parse;

use proc_macro2::TokenStream;
use syn::DeriveInput;

/// Expands `#[derive(ConfigMessage)]`.
pub(crate) fn message(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_message(input)?;
    let krate = parsed.attrs.runtime_path();
    Ok(generate::message(&parsed, &krate))
}

/// Expands `#[derive(ConfigEnum)]`.
pub(crate) fn enumeration(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_enum(input)?;
    let krate = parsed.attrs.runtime_path();
    Ok(generate::enumeration(&parsed, &krate))
}
