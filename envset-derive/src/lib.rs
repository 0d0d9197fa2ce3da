//! Derive macro implementation for envset

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Visibility};

mod attrs;

use attrs::FieldAttrs;

/// `EnvRecord` derive macro
///
/// Implements `envset::EnvRecord` for a struct with named fields, generating
/// one traversal per direction that visits fields in declaration order.
///
/// # Supported Attributes
///
/// **Field-level**:
/// - `#[env(name = "KEY")]`: Bind the field to the environment variable `KEY`
/// - `#[env(nested)]`: Walk into the field, which must implement `EnvRecord`
///
/// Only `pub` fields participate. A private bound field makes unmarshalling
/// fail with `UnexportedField` once the traversal reaches it.
///
/// # Example
///
/// See the `envset` crate documentation for usage examples.
#[proc_macro_derive(EnvRecord, attributes(env))]
pub fn derive_env_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;

    // Extract fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "EnvRecord only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "EnvRecord only supports structs",
            ));
        }
    };

    let mut unmarshal_steps = Vec::new();
    let mut marshal_steps = Vec::new();

    for field in fields {
        let Some(ident) = &field.ident else {
            continue;
        };
        let attrs = FieldAttrs::from_field(field)?;
        let is_public = matches!(field.vis, Visibility::Public(_));

        // Nested records are walked before their own binding is considered
        if attrs.nested && is_public {
            unmarshal_steps.push(quote! {
                ::envset::de::nested(&mut self.#ident, __set)?;
            });
            marshal_steps.push(quote! {
                ::envset::ser::nested(&self.#ident, __set)?;
            });
        }

        let Some(key) = attrs.key() else {
            continue;
        };

        if !is_public {
            let field_name = ident.unraw().to_string();
            unmarshal_steps.push(quote! {
                return ::core::result::Result::Err(
                    ::envset::EnvError::unexported(#field_name, #key)
                );
            });
        } else if !attrs.nested {
            unmarshal_steps.push(quote! {
                ::envset::de::field(&mut self.#ident, __set, #key)?;
            });
            marshal_steps.push(quote! {
                ::envset::ser::field(&self.#ident, __set, #key);
            });
        }
        // A name on a nested field has no coercion rule and is inert
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::envset::EnvRecord for #struct_name #ty_generics #where_clause {
            #[allow(unreachable_code, unused_variables)]
            fn unmarshal_fields(
                &mut self,
                __set: &mut ::envset::EnvSet,
            ) -> ::core::result::Result<(), ::envset::EnvError> {
                #(#unmarshal_steps)*
                ::core::result::Result::Ok(())
            }

            #[allow(unused_variables)]
            fn marshal_fields(
                &self,
                __set: &mut ::envset::EnvSet,
            ) -> ::core::result::Result<(), ::envset::EnvError> {
                #(#marshal_steps)*
                ::core::result::Result::Ok(())
            }
        }
    })
}
