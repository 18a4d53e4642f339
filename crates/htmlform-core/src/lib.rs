//! # htmlform-core
//!
//! Maps a structured record to a declarative HTML form description: one entry
//! per field with a display name, an inferred input type, the current value,
//! and any validation errors. Rendering is left to the templating layer.
//!
//! ## Modules
//!
//! - [`builder`] - The recursive form builder
//! - [`record`] - Field descriptor tables and value stringification
//! - [`options`] - The `key=value,key` options tag parser
//! - [`form`] - `Form`, `FormEntry`, and `FormField`
//! - [`csrf`] - The reserved CSRF entry
//! - [`helpers`] - `map`, `extend`, `first_not_nil`, and `arr`
//! - [`value`] - The dynamic `Value` type
//! - [`settings`] - Tag settings and their loaders
//! - [`logging`] - Tracing setup
//! - [`error`] - Error types

pub mod builder;
pub mod csrf;
pub mod error;
pub mod form;
pub mod helpers;
pub mod logging;
pub mod options;
pub mod record;
pub mod settings;
pub mod value;

// Re-export the most commonly used types at the crate root.
pub use builder::{create, ErrorLookup, FormBuilder};
pub use csrf::{Csrf, CSRF_KEY};
pub use error::{ConfigError, HelperError};
pub use form::{Form, FormEntry, FormField};
pub use record::{
    FieldDescriptor, FieldKind, FormValue, NestedRecord, NestedSlot, Record, Tags,
};
pub use settings::TagSettings;
pub use value::{Value, ValueMap};
