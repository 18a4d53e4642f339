//! The form representation produced by the builder.
//!
//! A [`Form`] maps each declared field name to a [`FormEntry`]: either a leaf
//! [`FormField`], a nested [`Form`] for a nested record, or the reserved CSRF
//! entry. Entries keep declaration order. Templating layers branch on the
//! entry variant to decide between rendering an input and recursing into a
//! fieldset.

use indexmap::IndexMap;
use serde::Serialize;

use crate::csrf::{Csrf, CSRF_KEY};
use crate::value::ValueMap;

/// One renderable input.
///
/// Serializes with the keys `Name`, `Type`, `Value`, and `Errors`. The
/// namespace snapshots used while composing nested names are never
/// serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    /// The dot-joined HTML name attribute.
    #[serde(rename = "Name")]
    pub name: String,
    /// The inferred or overridden input type.
    #[serde(rename = "Type")]
    pub field_type: String,
    /// The current value, stringified.
    #[serde(rename = "Value")]
    pub value: String,
    /// The error payload returned by the error lookup, if any.
    #[serde(rename = "Errors")]
    pub errors: Option<ValueMap>,
    #[serde(skip)]
    namespace: Vec<String>,
    #[serde(skip)]
    html_namespace: Vec<String>,
}

impl FormField {
    /// Creates a field. `namespace` and `html_namespace` are the parent paths.
    pub fn new(
        name: impl Into<String>,
        field_type: impl Into<String>,
        value: impl Into<String>,
        errors: Option<ValueMap>,
        namespace: Vec<String>,
        html_namespace: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            value: value.into(),
            errors,
            namespace,
            html_namespace,
        }
    }

    /// Returns `true` if the error payload is present and non-empty.
    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|e| !e.is_empty())
    }

    #[doc(hidden)]
    pub fn namespace(&self) -> &[String] {
        &self.namespace
    }

    #[doc(hidden)]
    pub fn html_namespace(&self) -> &[String] {
        &self.html_namespace
    }
}

/// A value stored in a [`Form`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FormEntry {
    /// A leaf input.
    Field(FormField),
    /// A nested record.
    Form(Form),
    /// The reserved CSRF token entry.
    Csrf(Csrf),
}

impl FormEntry {
    /// Returns the leaf field, if this entry is one.
    pub const fn as_field(&self) -> Option<&FormField> {
        match self {
            Self::Field(f) => Some(f),
            _ => None,
        }
    }

    /// Returns the nested form, if this entry is one.
    pub const fn as_form(&self) -> Option<&Form> {
        match self {
            Self::Form(f) => Some(f),
            _ => None,
        }
    }
}

/// A form description of one record.
///
/// # Examples
///
/// ```
/// use htmlform_core::form::Form;
///
/// let mut form = Form::new();
/// form.with_csrf("csrf", "tok123");
/// assert_eq!(form.csrf().map(|c| c.value()), Some("tok123"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Form {
    entries: IndexMap<String, FormEntry>,
}

impl Form {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `entry` under `key`, replacing any earlier entry.
    pub fn insert(&mut self, key: impl Into<String>, entry: FormEntry) {
        self.entries.insert(key.into(), entry);
    }

    /// Returns the entry stored under `key`.
    pub fn get(&self, key: &str) -> Option<&FormEntry> {
        self.entries.get(key)
    }

    /// Returns the leaf field stored under `key`.
    pub fn field(&self, key: &str) -> Option<&FormField> {
        self.get(key).and_then(FormEntry::as_field)
    }

    /// Returns the nested form stored under `key`.
    pub fn nested(&self, key: &str) -> Option<&Self> {
        self.get(key).and_then(FormEntry::as_form)
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns the number of top-level entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the form has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns every leaf field, depth-first in declaration order.
    pub fn leaf_fields(&self) -> Vec<&FormField> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a FormField>) {
        for entry in self.entries.values() {
            match entry {
                FormEntry::Field(f) => out.push(f),
                FormEntry::Form(nested) => nested.collect_leaves(out),
                FormEntry::Csrf(_) => {}
            }
        }
    }

    /// Attaches a CSRF token under the reserved key [`CSRF_KEY`].
    ///
    /// A second call overwrites the first. Returns `self` for chaining.
    pub fn with_csrf(&mut self, field_name: impl Into<String>, token: impl Into<String>) -> &mut Self {
        self.entries.insert(
            CSRF_KEY.to_string(),
            FormEntry::Csrf(Csrf::new(field_name, token)),
        );
        self
    }

    /// Returns the attached CSRF entry, if any.
    pub fn csrf(&self) -> Option<&Csrf> {
        match self.entries.get(CSRF_KEY) {
            Some(FormEntry::Csrf(c)) => Some(c),
            _ => None,
        }
    }

    /// Converts the form into a JSON value for a templating layer.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl<'a> IntoIterator for &'a Form {
    type Item = (&'a String, &'a FormEntry);
    type IntoIter = indexmap::map::Iter<'a, String, FormEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn leaf(name: &str) -> FormField {
        FormField::new(name, "text", "v", None, vec![], vec![])
    }

    #[test]
    fn test_insert_keeps_order() {
        let mut form = Form::new();
        form.insert("b", FormEntry::Field(leaf("b")));
        form.insert("a", FormEntry::Field(leaf("a")));
        let keys: Vec<&str> = form.keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(form.len(), 2);
    }

    #[test]
    fn test_field_and_nested_accessors() {
        let mut inner = Form::new();
        inner.insert("city", FormEntry::Field(leaf("address.city")));
        let mut form = Form::new();
        form.insert("name", FormEntry::Field(leaf("name")));
        form.insert("address", FormEntry::Form(inner));

        assert!(form.field("name").is_some());
        assert!(form.nested("name").is_none());
        assert!(form.nested("address").is_some());
        assert!(form.field("address").is_none());
        assert!(form.get("missing").is_none());
    }

    #[test]
    fn test_leaf_fields_depth_first() {
        let mut inner = Form::new();
        inner.insert("city", FormEntry::Field(leaf("address.city")));
        let mut form = Form::new();
        form.insert("name", FormEntry::Field(leaf("name")));
        form.insert("address", FormEntry::Form(inner));
        form.insert("age", FormEntry::Field(leaf("age")));
        form.with_csrf("csrf", "t");

        let names: Vec<&str> = form.leaf_fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name", "address.city", "age"]);
    }

    #[test]
    fn test_has_errors() {
        let mut field = leaf("x");
        assert!(!field.has_errors());
        field.errors = Some(ValueMap::new());
        assert!(!field.has_errors());
        let mut errs = ValueMap::new();
        errs.insert("required".into(), Value::Bool(true));
        field.errors = Some(errs);
        assert!(field.has_errors());
    }

    #[test]
    fn test_to_json_shape() {
        let mut errs = ValueMap::new();
        errs.insert("required".into(), Value::Bool(true));
        let field = FormField::new(
            "user.email",
            "email",
            "a@b.c",
            Some(errs),
            vec!["user".into()],
            vec!["user".into()],
        );
        let mut form = Form::new();
        form.insert("email", FormEntry::Field(field));
        form.with_csrf("csrf", "tok");

        let json = form.to_json().unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "email": {
                    "Name": "user.email",
                    "Type": "email",
                    "Value": "a@b.c",
                    "Errors": {"required": true}
                },
                "_CSRF": {"FieldName": "csrf", "Token": "tok"}
            })
        );
    }

    #[test]
    fn test_namespace_snapshots() {
        let field = FormField::new("a.b", "text", "", None, vec!["A".into()], vec!["a".into()]);
        assert_eq!(field.namespace(), ["A".to_string()]);
        assert_eq!(field.html_namespace(), ["a".to_string()]);
    }
}
