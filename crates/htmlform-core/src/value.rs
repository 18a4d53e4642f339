//! Dynamic value types carried by forms and helper maps.
//!
//! The [`Value`] enum is the closed set of shapes that flow through this crate:
//! error payloads returned by an error lookup, the arguments of the
//! [`helpers`](crate::helpers) constructors, and anything a templating layer
//! wants to attach next to a [`Form`](crate::form::Form).

use std::fmt;
use std::num::TryFromIntError;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An insertion-ordered map of string keys to [`Value`]s.
pub type ValueMap = IndexMap<String, Value>;

/// A dynamically typed value.
///
/// # Examples
///
/// ```
/// use htmlform_core::value::Value;
///
/// assert_eq!(Value::from(42), Value::Int(42));
/// assert_eq!(Value::from("hello"), Value::String("hello".to_string()));
/// assert_eq!(Value::from(None::<i64>), Value::Null);
///
/// // Wider integers are checked.
/// assert_eq!(Value::try_from(7_usize), Ok(Value::Int(7)));
/// assert!(Value::try_from(u64::MAX).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// The absent value.
    #[default]
    Null,
    /// A boolean value.
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// A UTF-8 string.
    String(String),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A nested mapping.
    Map(ValueMap),
}

impl Value {
    /// Returns `true` if this is [`Value::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string slice if this is a [`Value::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the nested map if this is a [`Value::Map`].
    pub const fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Returns a short name for the variant, used in diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "{s}"),
            Self::List(vals) => {
                write!(f, "[")?;
                for (i, v) in vals.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            Self::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

// ── From implementations ───────────────────────────────────────────────

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Self::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

// Integers that may not fit an `i64` convert with `TryFrom` only.
macro_rules! impl_try_from_int {
    ($($t:ty),*) => {
        $(
            impl TryFrom<$t> for Value {
                type Error = TryFromIntError;

                fn try_from(v: $t) -> Result<Self, Self::Error> {
                    i64::try_from(v).map(Self::Int)
                }
            }
        )*
    };
}

impl_try_from_int!(i128, isize, u64, u128, usize);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::List(v)
    }
}

impl From<ValueMap> for Value {
    fn from(v: ValueMap) -> Self {
        Self::Map(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
