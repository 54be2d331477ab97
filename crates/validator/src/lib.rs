//! # tagcheck
//!
//! Declarative, tag-driven field validation.
//!
//! Record fields carry annotation strings such as `"min=3,max=10"`; a
//! [`Validator`] reads them, dispatches each directive to a named rule and
//! reports failures per field.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tagcheck::Record;
//!
//! #[derive(Record)]
//! pub struct Signup {
//!     #[tag(validate = "min=3,max=16,attr=username")]
//!     pub name: String,
//!     #[tag(validate = "in='free,pro',msg_in='plan must be one of {param}'")]
//!     pub plan: String,
//!     pub address: Address,
//! }
//!
//! #[derive(Record)]
//! pub struct Address {
//!     #[tag(validate = "len=5")]
//!     pub zip: String,
//! }
//!
//! let errors = tagcheck::validate(&signup);
//! for (field, error) in &errors {
//!     println!("{field}: {error}"); // e.g. "address.zip: invalid length"
//! }
//! ```
//!
//! ## Annotation grammar
//!
//! Comma-separated `name=param` directives; single quotes protect commas in a
//! parameter. `attr=<alias>` renames the field in reports, `msg_<rule>=...`
//! replaces a rule's error (with `{param}` substituted) and an annotation of
//! `-` skips the field. See [`tags`].
//!
//! ## Built-in rules
//!
//! `notempty`/`empty`, `present`, `len`, `min`, `max`, `regexp`, `in` and
//! `type`; see [`rules`]. Custom rules are plain functions registered on a
//! [`RuleRegistry`].

pub mod config;
pub mod error;
mod global;
pub mod prelude;
pub mod record;
pub mod registry;
pub mod rules;
pub mod tags;
mod validator;
pub mod value;

pub use config::{ValidatorBuilder, ValidatorConfig};
pub use error::{ErrorArray, ErrorMap, RegistryError, SUMMARY_KEY, ValidationError};
pub use global::{
    default_validator, register_rule, set_tag_name, unregister_rule, validate, validate_field,
    with_tag_name,
};
pub use record::{Field, Record};
pub use registry::{RuleFn, RuleRegistry};
pub use tags::{Directive, DirectiveList};
pub use validator::{DEFAULT_TAG_NAME, Validator};
pub use value::{AsValue, Null, Value};

/// `#[derive(Record)]`: generates [`Record`] and [`AsValue`] for a struct
/// with named fields, reading annotations from `#[tag(key = "...")]`.
#[cfg(feature = "derive")]
pub use tagcheck_macros::Record;
