//! CSRF token entry attached to a form.
//!
//! The builder never creates this entry; callers attach it with
//! [`Form::with_csrf`](crate::form::Form::with_csrf). Token generation and
//! validation belong to the web layer.

use serde::Serialize;

/// The reserved form key holding the CSRF entry.
pub const CSRF_KEY: &str = "_CSRF";

/// A hidden form field carrying a CSRF token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Csrf {
    /// The HTML name of the hidden input.
    #[serde(rename = "FieldName")]
    pub field_name: String,
    /// The token value.
    #[serde(rename = "Token")]
    pub token: String,
}

impl Csrf {
    /// Creates a new CSRF entry.
    pub fn new(field_name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            token: token.into(),
        }
    }

    /// Returns the field name.
    pub fn name(&self) -> &str {
        &self.field_name
    }

    /// Returns the token.
    pub fn value(&self) -> &str {
        &self.token
    }
}

#[cfg(test)]
mod tests {
    use crate::form::{Form, FormEntry};

    use super::*;

    #[test]
    fn test_accessors() {
        let c = Csrf::new("csrfmiddlewaretoken", "abc");
        assert_eq!(c.name(), "csrfmiddlewaretoken");
        assert_eq!(c.value(), "abc");
    }

    #[test]
    fn test_with_csrf_overwrites() {
        let mut form = Form::new();
        form.with_csrf("csrf", "tok123").with_csrf("csrf", "tok456");

        assert_eq!(form.len(), 1);
        let csrf = form.csrf().unwrap();
        assert_eq!(csrf.name(), "csrf");
        assert_eq!(csrf.value(), "tok456");
        assert!(matches!(form.get(CSRF_KEY), Some(FormEntry::Csrf(_))));
    }
}
