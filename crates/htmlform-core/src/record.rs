//! Field descriptor tables: the introspection model used by the builder.
//!
//! A [`Record`] exposes a static table of [`FieldDescriptor`]s in declaration
//! order, plus per-index access to each field's string value and, for nested
//! records, mutable access to the nested record itself. Tables are normally
//! generated by `#[derive(Record)]`, but can be written by hand.
//!
//! # Examples
//!
//! ```
//! use htmlform_core::record::{FieldDescriptor, FieldKind, FormValue, Record, Tags};
//!
//! struct Login {
//!     user: String,
//!     password: String,
//! }
//!
//! static LOGIN_FIELDS: [FieldDescriptor; 2] = [
//!     FieldDescriptor::new("user", FieldKind::Text, Tags::EMPTY),
//!     FieldDescriptor::new("password", FieldKind::Text, Tags::new(&[("htmlform", "type=password")])),
//! ];
//!
//! impl Record for Login {
//!     fn record_name(&self) -> &'static str {
//!         "Login"
//!     }
//!
//!     fn fields(&self) -> &'static [FieldDescriptor] {
//!         &LOGIN_FIELDS
//!     }
//!
//!     fn field_value(&self, index: usize) -> String {
//!         match index {
//!             0 => self.user.to_form_value(),
//!             1 => self.password.to_form_value(),
//!             _ => String::new(),
//!         }
//!     }
//! }
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt::Display;

use indexmap::{IndexMap, IndexSet};

use crate::value::Value;

/// The static kind of a record field, used to infer its form field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Sequence or array-like (`Vec`, arrays, sets).
    Sequence,
    /// String-like.
    Text,
    /// Any integer type.
    Integer,
    /// Any floating-point type.
    Float,
    /// A boolean.
    Bool,
    /// Associative containers.
    Map,
    /// A nested record; the builder recurses into it.
    Struct,
    /// Anything else.
    Other,
}

impl FieldKind {
    /// Returns the form field type inferred for this kind.
    ///
    /// Kinds without a dedicated input type render as `"hidden"`.
    pub const fn form_type(self) -> &'static str {
        match self {
            Self::Sequence => "array",
            Self::Text => "text",
            Self::Integer | Self::Float => "number",
            Self::Struct => "struct",
            Self::Bool | Self::Map | Self::Other => "hidden",
        }
    }
}

/// The metadata tags declared on one field, as `(key, value)` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tags(&'static [(&'static str, &'static str)]);

impl Tags {
    /// A field without tags.
    pub const EMPTY: Self = Self(&[]);

    /// Wraps a static list of `(key, value)` pairs.
    pub const fn new(pairs: &'static [(&'static str, &'static str)]) -> Self {
        Self(pairs)
    }

    /// Returns the value of the first tag named `key`.
    ///
    /// An empty `key` never matches, so a disabled tag setting finds nothing.
    pub fn get(&self, key: &str) -> Option<&'static str> {
        if key.is_empty() {
            return None;
        }
        self.0.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    /// Returns all declared pairs in declaration order.
    pub const fn pairs(&self) -> &'static [(&'static str, &'static str)] {
        self.0
    }
}

/// Describes one declared field of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// The declared field name.
    pub name: &'static str,
    /// The static kind of the field.
    pub kind: FieldKind,
    /// The field's metadata tags.
    pub tags: Tags,
}

impl FieldDescriptor {
    /// Creates a new descriptor.
    pub const fn new(name: &'static str, kind: FieldKind, tags: Tags) -> Self {
        Self { name, kind, tags }
    }
}

/// A structured value that can be turned into a [`Form`](crate::form::Form).
///
/// Implementations must keep [`fields`](Record::fields) in declaration order
/// and answer [`field_value`](Record::field_value) and
/// [`nested_mut`](Record::nested_mut) by index into that table.
pub trait Record {
    /// The type name, used for log context and contract-violation messages.
    fn record_name(&self) -> &'static str;

    /// The field table, in declaration order.
    fn fields(&self) -> &'static [FieldDescriptor];

    /// The current value of the field at `index`, as a string.
    fn field_value(&self, index: usize) -> String;

    /// Mutable access to the nested record at `index`.
    ///
    /// Fields of kind [`FieldKind::Struct`] must return `Some`. This may
    /// allocate storage for an unset nested record.
    fn nested_mut(&mut self, _index: usize) -> Option<&mut dyn Record> {
        None
    }

    /// Describes the nested record slot at `index` without allocating it.
    ///
    /// The builder uses this to stop at an unset slot whose record type is
    /// already being built further up. Tables that return `None` are always
    /// recursed into.
    fn nested_slot(&self, _index: usize) -> Option<NestedSlot> {
        None
    }

    /// Identifies the concrete record type on the builder's recursion path.
    fn record_type(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// The state of a nested record slot, as seen before allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NestedSlot {
    /// The [`Record::record_type`] of the record the slot holds.
    pub record_type: &'static str,
    /// `false` for an empty `Option` slot.
    pub is_set: bool,
}

/// Field storage that can hand out a nested [`Record`].
///
/// Derived records implement this for themselves. `Box<T>` forwards to `T`,
/// and `Option<T>` fills an empty slot with `T::default()` first, so the
/// caller's record keeps the allocation.
pub trait NestedRecord {
    /// Returns the nested record, allocating it if needed.
    fn as_record_mut(&mut self) -> &mut dyn Record;

    /// Describes the slot without allocating.
    fn slot(&self) -> NestedSlot
    where
        Self: Sized,
    {
        NestedSlot {
            record_type: Self::slot_record_type(),
            is_set: true,
        }
    }

    /// The record type this slot holds once allocated.
    fn slot_record_type() -> &'static str
    where
        Self: Sized,
    {
        std::any::type_name::<Self>()
    }
}

impl<T: NestedRecord> NestedRecord for Box<T> {
    fn as_record_mut(&mut self) -> &mut dyn Record {
        (**self).as_record_mut()
    }

    fn slot(&self) -> NestedSlot {
        (**self).slot()
    }

    fn slot_record_type() -> &'static str {
        T::slot_record_type()
    }
}

impl<T: NestedRecord + Default> NestedRecord for Option<T> {
    fn as_record_mut(&mut self) -> &mut dyn Record {
        if self.is_none() {
            tracing::trace!(
                record = std::any::type_name::<T>(),
                "allocating unset nested record"
            );
        }
        self.get_or_insert_with(T::default).as_record_mut()
    }

    fn slot(&self) -> NestedSlot {
        match self {
            Some(inner) => inner.slot(),
            None => NestedSlot {
                record_type: T::slot_record_type(),
                is_set: false,
            },
        }
    }

    fn slot_record_type() -> &'static str {
        T::slot_record_type()
    }
}

// ── Value stringification ──────────────────────────────────────────────

/// Locale-free conversion of a field value to the string shown in a form.
pub trait FormValue {
    /// Returns the default string form of the value.
    fn to_form_value(&self) -> String;
}

macro_rules! impl_form_value_display {
    ($($t:ty),*) => {
        $(
            impl FormValue for $t {
                fn to_form_value(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_form_value_display!(
    String, str, char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
    f32, f64, Value
);

impl<T: FormValue + ?Sized> FormValue for &T {
    fn to_form_value(&self) -> String {
        (**self).to_form_value()
    }
}

impl<T: FormValue + ?Sized> FormValue for Box<T> {
    fn to_form_value(&self) -> String {
        (**self).to_form_value()
    }
}

impl FormValue for std::borrow::Cow<'_, str> {
    fn to_form_value(&self) -> String {
        self.to_string()
    }
}

impl<T: FormValue> FormValue for Option<T> {
    fn to_form_value(&self) -> String {
        self.as_ref().map(FormValue::to_form_value).unwrap_or_default()
    }
}

fn join_sequence<'a, T: FormValue + 'a>(items: impl Iterator<Item = &'a T>) -> String {
    let parts: Vec<String> = items.map(FormValue::to_form_value).collect();
    format!("[{}]", parts.join(", "))
}

fn join_entries<K: Display, V: FormValue>(entries: impl Iterator<Item = (K, V)>) -> String {
    let parts: Vec<String> = entries
        .map(|(k, v)| format!("{k}: {}", v.to_form_value()))
        .collect();
    format!("{{{}}}", parts.join(", "))
}

impl<T: FormValue> FormValue for [T] {
    fn to_form_value(&self) -> String {
        join_sequence(self.iter())
    }
}

impl<T: FormValue, const N: usize> FormValue for [T; N] {
    fn to_form_value(&self) -> String {
        join_sequence(self.iter())
    }
}

impl<T: FormValue> FormValue for Vec<T> {
    fn to_form_value(&self) -> String {
        join_sequence(self.iter())
    }
}

impl<T: FormValue> FormValue for VecDeque<T> {
    fn to_form_value(&self) -> String {
        join_sequence(self.iter())
    }
}

impl<T: FormValue> FormValue for BTreeSet<T> {
    fn to_form_value(&self) -> String {
        join_sequence(self.iter())
    }
}

impl<T: FormValue, S> FormValue for HashSet<T, S> {
    fn to_form_value(&self) -> String {
        let mut parts: Vec<String> = self.iter().map(FormValue::to_form_value).collect();
        parts.sort();
        format!("[{}]", parts.join(", "))
    }
}

impl<T: FormValue, S> FormValue for IndexSet<T, S> {
    fn to_form_value(&self) -> String {
        join_sequence(self.iter())
    }
}

impl<K: Display, V: FormValue> FormValue for BTreeMap<K, V> {
    fn to_form_value(&self) -> String {
        join_entries(self.iter())
    }
}

impl<K: Display, V: FormValue, S> FormValue for IndexMap<K, V, S> {
    fn to_form_value(&self) -> String {
        join_entries(self.iter())
    }
}

impl<K: Display + Ord, V: FormValue, S> FormValue for HashMap<K, V, S> {
    fn to_form_value(&self) -> String {
        let mut entries: Vec<(&K, &V)> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        join_entries(entries.into_iter())
    }
}
