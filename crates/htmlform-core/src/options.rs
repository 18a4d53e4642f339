//! Parsing of the per-field options tag.
//!
//! The options tag holds a small `key=value,key,...` list. Each
//! comma-separated token is split on its first `=`; a token without `=` is a
//! flag whose value is `"1"`. Later tokens overwrite earlier ones with the
//! same key.
//!
//! Recognized keys:
//!
//! | Key    | Effect                                         |
//! |--------|------------------------------------------------|
//! | `type` | replaces the inferred form field type          |
//! | `name` | replaces the display name (wins over name tag) |

use indexmap::IndexMap;

/// The value given to an option written without `=`.
pub const FLAG_VALUE: &str = "1";

/// Parsed options of one field, in the order they were written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldOptions {
    entries: IndexMap<String, String>,
}

impl FieldOptions {
    /// Returns the value of option `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns `true` if option `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The `type=` override.
    pub fn field_type(&self) -> Option<&str> {
        self.get("type")
    }

    /// The `name=` override.
    pub fn name(&self) -> Option<&str> {
        self.get("name")
    }

    /// Returns the number of options.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no options were given.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` pairs in the order written.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Parses an options tag value.
///
/// # Examples
///
/// ```
/// use htmlform_core::options::parse_options;
///
/// let opts = parse_options("type=password,name=pw,readonly");
/// assert_eq!(opts.field_type(), Some("password"));
/// assert_eq!(opts.name(), Some("pw"));
/// assert_eq!(opts.get("readonly"), Some("1"));
/// ```
pub fn parse_options(raw: &str) -> FieldOptions {
    let mut entries = IndexMap::new();
    if raw.is_empty() {
        return FieldOptions { entries };
    }
    for token in raw.split(',') {
        let (key, value) = token.split_once('=').unwrap_or((token, FLAG_VALUE));
        entries.insert(key.to_string(), value.to_string());
    }
    FieldOptions { entries }
}
