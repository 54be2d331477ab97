//! Code generation for the Record derive
//!
//! Produces two impl blocks:
//! - `tagcheck::Record`, whose `fields()` returns one descriptor per field
//! - `tagcheck::AsValue`, normalizing the struct to `Value::Record`

use super::parse::FieldTags;
use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, FieldsNamed, Visibility, parse_quote};

/// Generate the `Record` and `AsValue` implementations for a struct.
///
/// # Errors
///
/// Returns an error if:
/// - Input is not a struct with named fields
/// - A `#[tag(...)]` attribute is malformed
pub(super) fn generate_record(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let fields = require_named_struct(input)?;

    let mut descriptors = Vec::with_capacity(fields.named.len());
    let mut normalized = Vec::with_capacity(fields.named.len());
    for field in &fields.named {
        let Some(ident) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "named fields must have idents"));
        };
        let declared = ident.unraw().to_string();
        let public = matches!(field.vis, Visibility::Public(_));

        let tags = FieldTags::from_attributes(&field.attrs)?;
        if tags.skip {
            continue;
        }
        normalized.push(&field.ty);

        let pairs = tags.pairs.iter().map(|(key, text)| quote! { (#key, #text) });

        descriptors.push(quote! {
            ::tagcheck::Field::new(#declared, ::tagcheck::AsValue::as_value(&self.#ident))
                .with_tags(&[#(#pairs),*])
                .with_public(#public)
        });
    }

    // Generic structs need their field types to be normalizable
    let mut generics = input.generics.clone();
    if generics.type_params().next().is_some() {
        let where_clause = generics.make_where_clause();
        for ty in normalized {
            where_clause
                .predicates
                .push(parse_quote! { #ty: ::tagcheck::AsValue });
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::tagcheck::Record for #name #ty_generics #where_clause {
            fn fields(&self) -> ::std::vec::Vec<::tagcheck::Field<'_>> {
                ::std::vec![#(#descriptors),*]
            }
        }

        #[automatically_derived]
        impl #impl_generics ::tagcheck::AsValue for #name #ty_generics #where_clause {
            fn as_value(&self) -> ::tagcheck::Value<'_> {
                ::tagcheck::Value::Record(self)
            }
        }
    })
}

fn require_named_struct(input: &DeriveInput) -> syn::Result<&FieldsNamed> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(fields),
            Fields::Unnamed(_) => Err(syn::Error::new_spanned(
                input,
                "#[derive(Record)] requires named fields.\n\
                 \n\
                 Tuple structs are not supported.",
            )),
            Fields::Unit => Err(syn::Error::new_spanned(
                input,
                "#[derive(Record)] cannot be applied to unit structs.",
            )),
        },
        Data::Enum(_) => Err(syn::Error::new_spanned(
            input,
            "#[derive(Record)] can only be applied to structs, not enums.",
        )),
        Data::Union(_) => Err(syn::Error::new_spanned(
            input,
            "#[derive(Record)] can only be applied to structs, not unions.",
        )),
    }
}
