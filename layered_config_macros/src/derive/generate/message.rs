//! Generates the reflective message implementation for a struct.

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive::parse::MessageInput;

/// Expands `Message`, `MessageType`, `ReflectField` and `ReflectElement`.
///
/// Each accessor matches the canonical field name and delegates to the
/// field type's `ReflectField` implementation, so nested messages, enums and
/// `Vec`s all share one code path.
pub(crate) fn message(input: &MessageInput, krate: &TokenStream) -> TokenStream {
    let ident = &input.ident;
    let name = input.name();
    let schema = quote! { #krate::schema };
    let names: Vec<&str> = input.fields.iter().map(|f| f.name.as_str()).collect();
    let members: Vec<_> = input.fields.iter().map(|f| &f.member).collect();
    let types: Vec<_> = input.fields.iter().map(|f| &f.ty).collect();

    let no_such_field = quote! {
        _ => ::core::result::Result::Err(#schema::ReflectError::no_such_field(#name, field)),
    };

    quote! {
        const _: () = {
            #[automatically_derived]
            impl #schema::Message for #ident {
                fn descriptor(&self) -> ::std::sync::Arc<#schema::MessageDescriptor> {
                    <Self as #schema::MessageType>::message_descriptor()
                }

                fn set_value(&mut self, field: &str, value: #schema::Value) -> ::core::result::Result<(), #schema::ReflectError> {
                    match field {
                        #( #names => #schema::ReflectField::set_value(&mut self.#members, field, value), )*
                        #no_such_field
                    }
                }

                fn set_values(&mut self, field: &str, values: ::std::vec::Vec<#schema::Value>) -> ::core::result::Result<(), #schema::ReflectError> {
                    match field {
                        #( #names => #schema::ReflectField::set_values(&mut self.#members, field, values), )*
                        #no_such_field
                    }
                }

                fn message_mut(&mut self, field: &str) -> ::core::result::Result<&mut dyn #schema::Message, #schema::ReflectError> {
                    match field {
                        #( #names => #schema::ReflectField::message_mut(&mut self.#members, field), )*
                        #no_such_field
                    }
                }

                fn message(&self, field: &str) -> ::core::result::Result<&dyn #schema::Message, #schema::ReflectError> {
                    match field {
                        #( #names => #schema::ReflectField::message(&self.#members, field), )*
                        #no_such_field
                    }
                }

                fn value(&self, field: &str) -> ::core::result::Result<::core::option::Option<#schema::Value>, #schema::ReflectError> {
                    match field {
                        #( #names => #schema::ReflectField::value(&self.#members, field), )*
                        #no_such_field
                    }
                }

                fn values(&self, field: &str) -> ::core::result::Result<::std::vec::Vec<#schema::Value>, #schema::ReflectError> {
                    match field {
                        #( #names => #schema::ReflectField::values(&self.#members, field), )*
                        #no_such_field
                    }
                }
            }

            #[automatically_derived]
            impl #schema::MessageType for #ident {
                fn message_descriptor() -> ::std::sync::Arc<#schema::MessageDescriptor> {
                    static DESCRIPTOR: ::std::sync::LazyLock<::std::sync::Arc<#schema::MessageDescriptor>> = ::std::sync::LazyLock::new(|| {
                        ::std::sync::Arc::new(#schema::MessageDescriptor::from_derived(
                            #name,
                            ::std::vec![ #( #schema::FieldDescriptor::of::<#types>(#names), )* ],
                        ))
                    });
                    ::std::sync::Arc::clone(&DESCRIPTOR)
                }
            }

            #[automatically_derived]
            impl #schema::ReflectField for #ident {
                fn field_kind() -> #schema::FieldKind {
                    #schema::FieldKind::Message(<Self as #schema::MessageType>::message_descriptor())
                }

                fn set_value(&mut self, field: &str, value: #schema::Value) -> ::core::result::Result<(), #schema::ReflectError> {
                    ::core::result::Result::Err(#schema::__private::message_as_scalar(field, &value))
                }

                fn value(&self, field: &str) -> ::core::result::Result<::core::option::Option<#schema::Value>, #schema::ReflectError> {
                    ::core::result::Result::Err(#schema::__private::message_element(field))
                }

                fn message_mut(&mut self, _field: &str) -> ::core::result::Result<&mut dyn #schema::Message, #schema::ReflectError> {
                    ::core::result::Result::Ok(self)
                }

                fn message(&self, _field: &str) -> ::core::result::Result<&dyn #schema::Message, #schema::ReflectError> {
                    ::core::result::Result::Ok(self)
                }
            }

            #[automatically_derived]
            impl #schema::ReflectElement for #ident {
                fn element_kind() -> #schema::FieldKind {
                    <Self as #schema::ReflectField>::field_kind()
                }

                fn from_value(field: &str, _value: #schema::Value) -> ::core::result::Result<Self, #schema::ReflectError> {
                    ::core::result::Result::Err(#schema::__private::message_element(field))
                }

                fn to_value(&self, field: &str) -> ::core::result::Result<#schema::Value, #schema::ReflectError> {
                    ::core::result::Result::Err(#schema::__private::message_element(field))
                }
            }
        };
    }
}
