//! Tag settings: which field tags the builder reads.
//!
//! [`TagSettings`] names the tag used to override a field's display name
//! (default `"schema"`) and the tag holding the options list (default
//! `"htmlform"`). Setting either to an empty string disables that lookup.
//!
//! A process-wide instance is used by [`FormBuilder::new`] and [`create`].
//! Set it once at startup. Each traversal takes a snapshot when it starts,
//! so changing the settings does not affect a build that is already running.
//!
//! ## Loading
//!
//! Settings can be read from TOML and then overridden from the environment:
//!
//! | Env Var                | Setting       |
//! |------------------------|---------------|
//! | `HTMLFORM_NAME_TAG`    | `name_tag`    |
//! | `HTMLFORM_OPTIONS_TAG` | `options_tag` |
//!
//! [`FormBuilder::new`]: crate::builder::FormBuilder::new
//! [`create`]: crate::builder::create

use std::path::Path;
use std::sync::{LazyLock, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The default name-override tag.
pub const DEFAULT_NAME_TAG: &str = "schema";

/// The default options tag.
pub const DEFAULT_OPTIONS_TAG: &str = "htmlform";

/// Names of the field tags consulted during a build.
///
/// # Examples
///
/// ```
/// use htmlform_core::settings::TagSettings;
///
/// let s = TagSettings::default();
/// assert_eq!(s.name_tag, "schema");
/// assert_eq!(s.options_tag, "htmlform");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagSettings {
    /// Tag whose value replaces the field's display name. Empty disables it.
    pub name_tag: String,
    /// Tag holding the `key=value,key` options list. Empty disables it.
    pub options_tag: String,
}

impl Default for TagSettings {
    fn default() -> Self {
        Self {
            name_tag: DEFAULT_NAME_TAG.to_string(),
            options_tag: DEFAULT_OPTIONS_TAG.to_string(),
        }
    }
}

impl TagSettings {
    /// Creates settings with explicit tag names.
    pub fn new(name_tag: impl Into<String>, options_tag: impl Into<String>) -> Self {
        Self {
            name_tag: name_tag.into(),
            options_tag: options_tag.into(),
        }
    }

    /// Loads settings from a TOML string. Missing keys keep their defaults.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Loads settings from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Applies `HTMLFORM_NAME_TAG` and `HTMLFORM_OPTIONS_TAG` if set.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("HTMLFORM_NAME_TAG") {
            self.name_tag = v;
        }
        if let Some(v) = lookup("HTMLFORM_OPTIONS_TAG") {
            self.options_tag = v;
        }
        self
    }
}

static TAG_SETTINGS: LazyLock<RwLock<TagSettings>> =
    LazyLock::new(|| RwLock::new(TagSettings::default()));

/// Replaces the process-wide settings.
pub fn configure(settings: TagSettings) {
    tracing::debug!(
        name_tag = %settings.name_tag,
        options_tag = %settings.options_tag,
        "configuring htmlform tag settings"
    );
    *TAG_SETTINGS.write().unwrap_or_else(PoisonError::into_inner) = settings;
}

/// Returns a snapshot of the process-wide settings.
pub fn current() -> TagSettings {
    TAG_SETTINGS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Sets the process-wide name-override tag. An empty string disables it.
pub fn set_name_struct_tag(tag: impl Into<String>) {
    TAG_SETTINGS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .name_tag = tag.into();
}

/// Sets the process-wide options tag. An empty string disables it.
pub fn set_options_struct_tag(tag: impl Into<String>) {
    TAG_SETTINGS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .options_tag = tag.into();
}

/// Returns the process-wide name-override tag.
pub fn name_struct_tag() -> String {
    current().name_tag
}

/// Returns the process-wide options tag.
pub fn options_struct_tag() -> String {
    current().options_tag
}
