//! Small constructors for building template arguments at call sites.
//!
//! [`map`] and [`extend`] take a flat `key, value, key, value, ...` list.
//! Keys must be [`Value::String`]s.
//!
//! The two differ on a non-string key: `map` owns its result and hands the
//! partial map back inside the error, while `extend` reports no partial
//! result. The caller still owns the target, which keeps any pairs inserted
//! before the bad key.

use crate::error::HelperError;
use crate::value::{Value, ValueMap};

/// Creates a map from a flat list of key/value pairs.
///
/// # Examples
///
/// ```
/// use htmlform_core::helpers::map;
/// use htmlform_core::value::Value;
///
/// let m = map(["a".into(), 1.into(), "b".into(), 2.into()]).unwrap();
/// assert_eq!(m["a"], Value::Int(1));
/// assert_eq!(m["b"], Value::Int(2));
///
/// let err = map([1.into(), 1.into()]).unwrap_err();
/// assert_eq!(err.partial().map(|m| m.len()), Some(0));
/// ```
pub fn map(args: impl IntoIterator<Item = Value>) -> Result<ValueMap, HelperError> {
    let args: Vec<Value> = args.into_iter().collect();
    check_arity(&args)?;

    let mut out = ValueMap::new();
    match insert_pairs(&mut out, args) {
        Ok(()) => Ok(out),
        Err(key) => Err(HelperError::NonStringKey {
            key,
            partial: Some(out),
        }),
    }
}

/// Extends `target` in place with a flat list of key/value pairs.
///
/// Returns `target` for chaining.
pub fn extend(
    target: &mut ValueMap,
    args: impl IntoIterator<Item = Value>,
) -> Result<&mut ValueMap, HelperError> {
    let args: Vec<Value> = args.into_iter().collect();
    check_arity(&args)?;

    match insert_pairs(target, args) {
        Ok(()) => Ok(target),
        Err(key) => Err(HelperError::NonStringKey { key, partial: None }),
    }
}

/// Returns the first value that is not [`Value::Null`], or `Null`.
pub fn first_not_nil(args: impl IntoIterator<Item = Value>) -> Value {
    args.into_iter()
        .find(|v| !v.is_null())
        .unwrap_or(Value::Null)
}

/// Collects the arguments into a list.
pub fn arr(args: impl IntoIterator<Item = Value>) -> Vec<Value> {
    args.into_iter().collect()
}

fn check_arity(args: &[Value]) -> Result<(), HelperError> {
    if args.len() % 2 != 0 {
        return Err(HelperError::OddArgumentCount { count: args.len() });
    }
    Ok(())
}

/// Inserts pairs until a non-string key; returns that key on failure.
fn insert_pairs(target: &mut ValueMap, args: Vec<Value>) -> Result<(), Value> {
    let mut iter = args.into_iter();
    while let Some(key) = iter.next() {
        let key = match key {
            Value::String(key) => key,
            other => return Err(other),
        };
        let value = iter.next().unwrap_or_default();
        target.insert(key, value);
    }
    Ok(())
}
