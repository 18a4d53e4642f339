//! `#[derive(Record)]` implementation.
//!
//! Generates a static `FieldDescriptor` table in declaration order, index
//! based value accessors, and `NestedRecord` for the struct itself so it can
//! be used as a nested section of another record.

use darling::{FromDeriveInput, FromField};
use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{DeriveInput, LitStr};

use crate::kind::{infer_kind, Kind};

/// Struct-level attributes from `#[record(...)]`.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(record), supports(struct_named))]
pub struct RecordOpts {
    pub ident: syn::Ident,
    pub generics: syn::Generics,
    pub data: darling::ast::Data<(), RecordFieldOpts>,

    /// Record name used in log output.
    #[darling(default)]
    pub name: Option<String>,
}

/// Per-field attributes from `#[record(...)]`, with `#[tag(...)]` forwarded.
#[derive(Debug, FromField)]
#[darling(attributes(record), forward_attrs(tag))]
pub struct RecordFieldOpts {
    pub ident: Option<syn::Ident>,
    pub ty: syn::Type,
    pub attrs: Vec<syn::Attribute>,

    /// The field is a nested record.
    #[darling(default)]
    pub nested: bool,

    /// Leave the field out of the table.
    #[darling(default)]
    pub skip: bool,

    /// Stringify with `ToString` instead of `FormValue`.
    #[darling(default)]
    pub display: bool,
}

/// One field that made it into the table.
struct TableField<'a> {
    opts: &'a RecordFieldOpts,
    ident: &'a syn::Ident,
    kind: Kind,
    tags: Vec<(String, String)>,
}

/// Generates the `Record` and `NestedRecord` implementations.
pub fn derive_record_impl(input: DeriveInput) -> TokenStream {
    let opts = match RecordOpts::from_derive_input(&input) {
        Ok(o) => o,
        Err(e) => return e.write_errors(),
    };

    let Some(fields) = opts.data.as_ref().take_struct() else {
        return darling::Error::unsupported_shape("enum").write_errors();
    };

    let mut errors = darling::Error::accumulator();
    let mut table = Vec::new();
    for f in fields.fields.into_iter().filter(|f| !f.skip) {
        let Some(ident) = f.ident.as_ref() else {
            continue;
        };
        if f.nested && f.display {
            errors.push(
                darling::Error::custom("`nested` and `display` cannot be combined")
                    .with_span(ident),
            );
            continue;
        }
        let kind = if f.nested {
            Kind::Struct
        } else {
            infer_kind(&f.ty)
        };
        let tags = errors.handle(parse_tags(&f.attrs)).unwrap_or_default();
        table.push(TableField {
            opts: f,
            ident,
            kind,
            tags,
        });
    }
    if let Err(e) = errors.finish() {
        return e.write_errors();
    }

    let struct_name = &opts.ident;
    let record_name = opts
        .name
        .clone()
        .unwrap_or_else(|| struct_name.to_string());
    let (impl_generics, ty_generics, where_clause) = opts.generics.split_for_impl();

    let descriptors: Vec<TokenStream> = table.iter().map(generate_descriptor).collect();

    let value_arms: Vec<TokenStream> = table
        .iter()
        .enumerate()
        .filter(|(_, f)| f.kind != Kind::Struct)
        .map(|(index, f)| {
            let ident = f.ident;
            let expr = if f.opts.display {
                quote! { ::std::string::ToString::to_string(&self.#ident) }
            } else {
                quote! { ::htmlform::FormValue::to_form_value(&self.#ident) }
            };
            quote! { #index => #expr, }
        })
        .collect();

    let nested: Vec<(usize, &syn::Ident)> = table
        .iter()
        .enumerate()
        .filter(|(_, f)| f.kind == Kind::Struct)
        .map(|(index, f)| (index, f.ident))
        .collect();

    let nested_arms = nested.iter().map(|(index, ident)| {
        quote! {
            #index => ::core::option::Option::Some(
                ::htmlform::NestedRecord::as_record_mut(&mut self.#ident),
            ),
        }
    });

    let slot_arms = nested.iter().map(|(index, ident)| {
        quote! {
            #index => ::core::option::Option::Some(
                ::htmlform::NestedRecord::slot(&self.#ident),
            ),
        }
    });

    let field_value_body = if value_arms.is_empty() {
        quote! {
            let _ = index;
            ::std::string::String::new()
        }
    } else {
        quote! {
            match index {
                #(#value_arms)*
                _ => ::std::string::String::new(),
            }
        }
    };

    let nested_fns = if nested.is_empty() {
        quote! {}
    } else {
        quote! {
            fn nested_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<&mut dyn ::htmlform::Record> {
                match index {
                    #(#nested_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn nested_slot(
                &self,
                index: usize,
            ) -> ::core::option::Option<::htmlform::NestedSlot> {
                match index {
                    #(#slot_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    };

    quote! {
        #[automatically_derived]
        impl #impl_generics ::htmlform::Record for #struct_name #ty_generics #where_clause {
            fn record_name(&self) -> &'static str {
                #record_name
            }

            fn fields(&self) -> &'static [::htmlform::FieldDescriptor] {
                const FIELDS: &[::htmlform::FieldDescriptor] = &[
                    #(#descriptors),*
                ];
                FIELDS
            }

            fn field_value(&self, index: usize) -> ::std::string::String {
                #field_value_body
            }

            #nested_fns
        }

        #[automatically_derived]
        impl #impl_generics ::htmlform::NestedRecord for #struct_name #ty_generics #where_clause {
            fn as_record_mut(&mut self) -> &mut dyn ::htmlform::Record {
                self
            }
        }
    }
}

/// Generates a single `FieldDescriptor` construction expression.
fn generate_descriptor(f: &TableField<'_>) -> TokenStream {
    let name = f.ident.unraw().to_string();
    let kind = f.kind.to_tokens();
    let tags = if f.tags.is_empty() {
        quote! { ::htmlform::Tags::EMPTY }
    } else {
        let pairs = f.tags.iter().map(|(k, v)| quote! { (#k, #v) });
        quote! { ::htmlform::Tags::new(&[#(#pairs),*]) }
    };
    quote! {
        ::htmlform::FieldDescriptor::new(#name, #kind, #tags)
    }
}

/// Collects `key = "value"` pairs from every `#[tag(...)]` attribute.
fn parse_tags(attrs: &[syn::Attribute]) -> darling::Result<Vec<(String, String)>> {
    let mut tags = Vec::new();
    for attr in attrs.iter().filter(|a| a.path().is_ident("tag")) {
        attr.parse_nested_meta(|meta| {
            let key = meta
                .path
                .get_ident()
                .map(|i| i.unraw().to_string())
                .ok_or_else(|| meta.error("expected a tag name"))?;
            let value: LitStr = meta.value()?.parse()?;
            tags.push((key, value.value()));
            Ok(())
        })
        .map_err(darling::Error::from)?;
    }
    Ok(tags)
}
