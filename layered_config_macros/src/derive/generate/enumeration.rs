//! Generates the enum field implementation for a fieldless enum.

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive::parse::EnumInput;

/// Expands `EnumType`, `ReflectElement` and `ReflectField`.
pub(crate) fn enumeration(input: &EnumInput, krate: &TokenStream) -> TokenStream {
    let ident = &input.ident;
    let name = input.name();
    let schema = quote! { #krate::schema };
    let variants: Vec<_> = input.values.iter().map(|v| &v.variant).collect();
    let names: Vec<&str> = input.values.iter().map(|v| v.name.as_str()).collect();
    let numbers: Vec<i32> = input.values.iter().map(|v| v.number).collect();

    quote! {
        const _: () = {
            #[automatically_derived]
            impl #schema::EnumType for #ident {
                fn enum_descriptor() -> ::std::sync::Arc<#schema::EnumDescriptor> {
                    static DESCRIPTOR: ::std::sync::LazyLock<::std::sync::Arc<#schema::EnumDescriptor>> = ::std::sync::LazyLock::new(|| {
                        ::std::sync::Arc::new(#schema::EnumDescriptor::new(#name, [ #( (#names, #numbers), )* ]))
                    });
                    ::std::sync::Arc::clone(&DESCRIPTOR)
                }

                fn from_number(number: i32) -> ::core::option::Option<Self> {
                    match number {
                        #( #numbers => ::core::option::Option::Some(Self::#variants), )*
                        _ => ::core::option::Option::None,
                    }
                }

                fn number(&self) -> i32 {
                    match self {
                        #( Self::#variants => #numbers, )*
                    }
                }
            }

            #[automatically_derived]
            impl #schema::ReflectElement for #ident {
                fn element_kind() -> #schema::FieldKind {
                    #schema::FieldKind::Enum(<Self as #schema::EnumType>::enum_descriptor())
                }

                fn from_value(field: &str, value: #schema::Value) -> ::core::result::Result<Self, #schema::ReflectError> {
                    match value {
                        #schema::Value::Enum(number) => <Self as #schema::EnumType>::from_number(number).ok_or_else(|| {
                            #schema::ReflectError::UnknownEnumNumber {
                                field: ::std::borrow::ToOwned::to_owned(field),
                                number,
                            }
                        }),
                        other => ::core::result::Result::Err(#schema::ReflectError::mismatch(field, "enum", &other)),
                    }
                }

                fn to_value(&self, _field: &str) -> ::core::result::Result<#schema::Value, #schema::ReflectError> {
                    ::core::result::Result::Ok(#schema::Value::Enum(<Self as #schema::EnumType>::number(self)))
                }
            }

            #[automatically_derived]
            impl #schema::ReflectField for #ident {
                fn field_kind() -> #schema::FieldKind {
                    <Self as #schema::ReflectElement>::element_kind()
                }

                fn set_value(&mut self, field: &str, value: #schema::Value) -> ::core::result::Result<(), #schema::ReflectError> {
                    #schema::__private::set_element(self, field, value)
                }

                fn value(&self, field: &str) -> ::core::result::Result<::core::option::Option<#schema::Value>, #schema::ReflectError> {
                    #schema::__private::get_element(self, field)
                }
            }
        };
    }
}
