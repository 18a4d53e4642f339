//! Field kind inference from the syntactic field type.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{GenericArgument, PathArguments, Type};

/// The kind a field type maps to. Mirrors `htmlform::FieldKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Sequence,
    Text,
    Integer,
    Float,
    Bool,
    Map,
    Struct,
    Other,
}

impl Kind {
    pub fn to_tokens(self) -> TokenStream {
        match self {
            Self::Sequence => quote! { ::htmlform::FieldKind::Sequence },
            Self::Text => quote! { ::htmlform::FieldKind::Text },
            Self::Integer => quote! { ::htmlform::FieldKind::Integer },
            Self::Float => quote! { ::htmlform::FieldKind::Float },
            Self::Bool => quote! { ::htmlform::FieldKind::Bool },
            Self::Map => quote! { ::htmlform::FieldKind::Map },
            Self::Struct => quote! { ::htmlform::FieldKind::Struct },
            Self::Other => quote! { ::htmlform::FieldKind::Other },
        }
    }
}

/// If the type is `Option<T>`, returns `Some(&T)`. Otherwise `None`.
pub fn unwrap_option_type(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty {
        let segment = type_path.path.segments.last()?;
        if segment.ident == "Option" {
            if let PathArguments::AngleBracketed(ref args) = segment.arguments {
                if let Some(GenericArgument::Type(inner)) = args.args.first() {
                    return Some(inner);
                }
            }
        }
    }
    None
}

/// Returns the first generic type argument of the last path segment.
fn first_type_argument(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    let PathArguments::AngleBracketed(ref args) = segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(t) => Some(t),
        _ => None,
    })
}

/// Infers the kind of a field from its Rust type.
///
/// One outer `Option` is unwrapped first. `Box<T>` and references are looked
/// through.
pub fn infer_kind(ty: &Type) -> Kind {
    let ty = unwrap_option_type(ty).unwrap_or(ty);
    classify(ty)
}

fn classify(ty: &Type) -> Kind {
    match ty {
        Type::Array(_) | Type::Slice(_) => Kind::Sequence,
        Type::Reference(r) => classify(&r.elem),
        Type::Paren(p) => classify(&p.elem),
        Type::Group(g) => classify(&g.elem),
        Type::Path(type_path) => {
            let Some(segment) = type_path.path.segments.last() else {
                return Kind::Other;
            };
            match segment.ident.to_string().as_str() {
                "Vec" | "VecDeque" | "HashSet" | "BTreeSet" | "IndexSet" => Kind::Sequence,
                "String" | "str" | "char" | "Cow" => Kind::Text,
                "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
                | "u128" | "usize" => Kind::Integer,
                "f32" | "f64" => Kind::Float,
                "bool" => Kind::Bool,
                "HashMap" | "BTreeMap" | "IndexMap" => Kind::Map,
                "Box" => first_type_argument(ty).map_or(Kind::Other, classify),
                _ => Kind::Other,
            }
        }
        _ => Kind::Other,
    }
}
