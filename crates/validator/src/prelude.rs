//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use tagcheck::prelude::*;
//!
//! let errors = validate(&form);
//! ```

pub use crate::config::{ValidatorBuilder, ValidatorConfig};
pub use crate::error::{ErrorArray, ErrorMap, RegistryError, ValidationError};
pub use crate::global::{register_rule, validate, validate_field};
pub use crate::record::{Field, Record};
pub use crate::registry::RuleRegistry;
pub use crate::validator::Validator;
pub use crate::value::{AsValue, Null, Value};

#[cfg(feature = "derive")]
pub use tagcheck_macros::Record;
