//! Implementation of the `#[derive(Structural)]` macro.
//!
//! The generated `fields()` converts every reflected field with
//! `ToValue::to_value`, so nested derived types, collections and scalars
//! all contribute to the fingerprint.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    parse_macro_input, parse_quote, Attribute, Data, DataEnum, DeriveInput, Field, Fields,
    Generics, Ident,
};

const ATTRIBUTE: &str = "structural";

/// Main implementation of the Structural derive macro.
pub fn derive_structural_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let expanded = expand(&input).unwrap_or_else(syn::Error::into_compile_error);

    TokenStream::from(expanded)
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let comparable = is_comparable(&input.attrs)?;

    let fields_body = match &input.data {
        Data::Struct(data_struct) => struct_fields(&data_struct.fields)?,
        Data::Enum(data_enum) => enum_fields(data_enum)?,
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "Structural cannot be derived for unions.",
            ));
        }
    };

    let comparable_method = comparable.then(|| {
        quote! {
            fn as_comparable(&self) -> ::core::option::Option<&dyn ::structural_sets::Comparable> {
                ::core::option::Option::Some(self)
            }
        }
    });

    let generics = bounded_generics(&input.generics);
    let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

    let mut cloneable = generics.clone();
    cloneable
        .make_where_clause()
        .predicates
        .push(parse_quote!(Self: ::core::clone::Clone));
    let (_, _, cloneable_where_clause) = cloneable.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::structural_sets::Structural for #name #type_generics #where_clause {
            fn fields(&self) -> ::std::vec::Vec<::structural_sets::Value> {
                #fields_body
            }

            #comparable_method
        }

        impl #impl_generics ::core::convert::From<#name #type_generics> for ::structural_sets::Value #where_clause {
            fn from(value: #name #type_generics) -> Self {
                ::structural_sets::Value::Object(::structural_sets::Object::new(value))
            }
        }

        impl #impl_generics ::structural_sets::ToValue for #name #type_generics #cloneable_where_clause {
            fn to_value(&self) -> ::structural_sets::Value {
                ::structural_sets::Value::from(::core::clone::Clone::clone(self))
            }
        }
    })
}

/// Adds the bounds every reflected type parameter needs.
fn bounded_generics(generics: &Generics) -> Generics {
    let mut generics = generics.clone();
    for parameter in generics.type_params_mut() {
        parameter.bounds.push(parse_quote!(::structural_sets::ToValue));
        parameter.bounds.push(parse_quote!(::core::fmt::Debug));
        parameter.bounds.push(parse_quote!('static));
    }
    generics
}

/// `fields()` body for a struct: one value per kept field.
fn struct_fields(fields: &Fields) -> syn::Result<TokenStream2> {
    let mut values = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        if is_skipped(field)? {
            continue;
        }
        let accessor = field.ident.as_ref().map_or_else(
            || {
                let index = syn::Index::from(index);
                quote!(#index)
            },
            |ident| quote!(#ident),
        );
        values.push(quote!(::structural_sets::ToValue::to_value(&self.#accessor)));
    }
    Ok(quote!(::std::vec![#(#values),*]))
}

/// `fields()` body for an enum: the variant name, then its kept fields.
fn enum_fields(data_enum: &DataEnum) -> syn::Result<TokenStream2> {
    let mut arms = Vec::new();
    for variant in &data_enum.variants {
        let variant_name = &variant.ident;
        let label = variant_name.to_string();
        let (pattern, bindings) = variant_pattern(&variant.fields)?;
        arms.push(quote! {
            Self::#variant_name #pattern => ::std::vec![
                ::structural_sets::Value::from(#label)
                #(, ::structural_sets::ToValue::to_value(#bindings))*
            ],
        });
    }
    if arms.is_empty() {
        return Ok(quote!(match *self {}));
    }
    Ok(quote! {
        match self {
            #(#arms)*
        }
    })
}

/// The match pattern of a variant and the bindings of its kept fields.
fn variant_pattern(fields: &Fields) -> syn::Result<(TokenStream2, Vec<Ident>)> {
    match fields {
        Fields::Named(named) => {
            let mut bindings = Vec::new();
            for field in &named.named {
                if !is_skipped(field)? {
                    bindings.extend(field.ident.clone());
                }
            }
            Ok((quote!({ #(#bindings,)* .. }), bindings))
        }
        Fields::Unnamed(unnamed) => {
            let mut patterns = Vec::new();
            let mut bindings = Vec::new();
            for (index, field) in unnamed.unnamed.iter().enumerate() {
                if is_skipped(field)? {
                    patterns.push(quote!(_));
                } else {
                    let binding = format_ident!("field_{}", index);
                    patterns.push(quote!(#binding));
                    bindings.push(binding);
                }
            }
            Ok((quote!((#(#patterns),*)), bindings))
        }
        Fields::Unit => Ok((TokenStream2::new(), Vec::new())),
    }
}

fn is_comparable(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut comparable = false;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident(ATTRIBUTE)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("comparable") {
                comparable = true;
                Ok(())
            } else {
                Err(meta.error("unsupported structural attribute, expected `comparable`"))
            }
        })?;
    }
    Ok(comparable)
}

fn is_skipped(field: &Field) -> syn::Result<bool> {
    let mut skipped = false;
    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident(ATTRIBUTE)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skipped = true;
                Ok(())
            } else {
                Err(meta.error("unsupported structural field attribute, expected `skip`"))
            }
        })?;
    }
    Ok(skipped)
}
