//! # htmlform
//!
//! Maps Rust structs to declarative HTML form descriptions.
//!
//! This is the facade crate. It re-exports `htmlform-core` and, with the
//! default `derive` feature, `#[derive(Record)]`.
//!
//! ```
//! use htmlform::{FormBuilder, Record, TagSettings};
//!
//! #[derive(Record, Default)]
//! struct Address {
//!     city: String,
//! }
//!
//! #[derive(Record, Default)]
//! struct Signup {
//!     #[tag(schema = "user")]
//!     login: String,
//!     #[tag(htmlform = "type=password")]
//!     password: String,
//!     age: u8,
//!     #[record(nested)]
//!     address: Option<Address>,
//! }
//!
//! let mut signup = Signup::default();
//! let form = FormBuilder::new()
//!     .with_settings(TagSettings::default())
//!     .build(&mut signup);
//!
//! assert_eq!(form.field("login").unwrap().name, "user");
//! assert_eq!(form.field("password").unwrap().field_type, "password");
//! assert_eq!(form.field("age").unwrap().field_type, "number");
//! assert_eq!(form.nested("address").unwrap().field("city").unwrap().name, "address.city");
//! assert!(signup.address.is_some());
//! ```

pub use htmlform_core::*;

/// `#[derive(Record)]`: generates the field descriptor table of a struct.
#[cfg(feature = "derive")]
pub use htmlform_macros::Record;
