//! Error types for htmlform.
//!
//! The form builder itself never fails: an unknown field kind falls back to
//! `"hidden"`, a missing tag falls back to the declared name, and every value
//! has a string form. The only recoverable failures come from the argument
//! helpers ([`HelperError`]) and from loading settings ([`ConfigError`]).

use thiserror::Error;

use crate::value::{Value, ValueMap};

/// Errors raised by [`map`](crate::helpers::map) and
/// [`extend`](crate::helpers::extend).
///
/// # Examples
///
/// ```
/// use htmlform_core::error::HelperError;
/// use htmlform_core::helpers::map;
///
/// let err = map(["a".into(), 1.into(), "b".into()]).unwrap_err();
/// assert_eq!(err, HelperError::OddArgumentCount { count: 3 });
/// assert_eq!(err.to_string(), "expecting even number of arguments, got 3");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HelperError {
    /// The flat pair list had an odd number of elements.
    #[error("expecting even number of arguments, got {count}")]
    OddArgumentCount {
        /// The number of arguments received.
        count: usize,
    },

    /// An element in key position was not a string.
    ///
    /// `partial` holds the pairs collected before the bad key when the
    /// helper owns its result (`map`). It is `None` when the helper was
    /// extending a caller-owned map (`extend`).
    #[error("expecting string for odd numbered arguments, got {key}")]
    NonStringKey {
        /// The offending key argument.
        key: Value,
        /// The best-effort partial result.
        partial: Option<ValueMap>,
    },
}

impl HelperError {
    /// Returns the partial map carried by the error, if any.
    pub const fn partial(&self) -> Option<&ValueMap> {
        match self {
            Self::NonStringKey {
                partial: Some(m), ..
            } => Some(m),
            _ => None,
        }
    }

    /// Consumes the error and returns its partial map, if any.
    pub fn into_partial(self) -> Option<ValueMap> {
        match self {
            Self::NonStringKey { partial, .. } => partial,
            Self::OddArgumentCount { .. } => None,
        }
    }
}

/// Errors raised while loading [`TagSettings`](crate::settings::TagSettings).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration text was not valid TOML or had the wrong shape.
    #[error("Failed to parse tag settings: {0}")]
    Parse(String),

    /// The configuration file could not be read.
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
