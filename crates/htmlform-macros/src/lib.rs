//! # htmlform-macros
//!
//! Procedural macros for htmlform. `#[derive(Record)]` generates the field
//! descriptor table that the form builder walks.
//!
//! Use it through the `htmlform` facade; the generated code refers to
//! `::htmlform` paths.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod kind;
mod record;

/// Derives `htmlform::Record` and `htmlform::NestedRecord` for a struct with
/// named fields.
///
/// Field attributes:
///
/// - `#[tag(key = "value", ...)]` declares metadata tags, such as
///   `schema = "email"` or `htmlform = "type=password"`.
/// - `#[record(nested)]` marks a nested record, so the builder recurses into
///   it. The field type must implement `NestedRecord`. An `Option<T>` field
///   is filled with `T::default()` when the form is built.
/// - `#[record(display)]` stringifies the field with `ToString`.
/// - `#[record(skip)]` leaves the field out of the form.
///
/// Struct attribute:
///
/// - `#[record(name = "...")]` overrides the record name used in logs.
#[proc_macro_derive(Record, attributes(record, tag))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::derive_record_impl(input).into()
}
