//! Process-wide default validator
//!
//! The free functions in this module operate on a lazily constructed
//! [`Validator`] with the default tag name and the built-in rules. Changes
//! made here (tag name, registrations) are visible to every later call in the
//! process.
//!
//! The lock is only held long enough to clone the validator handle, so rules
//! may themselves call back into these functions.

use std::sync::LazyLock;

use parking_lot::RwLock;

use crate::error::{ErrorArray, ErrorMap, RegistryError, ValidationError};
use crate::validator::Validator;
use crate::value::{AsValue, Value};

static DEFAULT: LazyLock<RwLock<Validator>> = LazyLock::new(|| RwLock::new(Validator::new()));

/// Validates a record with the default validator.
///
/// See [`Validator::validate`].
pub fn validate<T>(value: &T) -> ErrorMap
where
    T: AsValue + ?Sized,
{
    current().validate(value)
}

/// Validates a single value against a raw annotation with the default
/// validator.
///
/// # Errors
///
/// See [`Validator::validate_field`].
pub fn validate_field<T>(value: &T, raw: &str) -> Result<(), ErrorArray>
where
    T: AsValue + ?Sized,
{
    current().validate_field(value, raw)
}

/// Changes the annotation key of the default validator.
pub fn set_tag_name(tag_name: impl Into<String>) {
    DEFAULT.write().set_tag_name(tag_name);
}

/// Derives a validator from the default one that reads `tag_name` and shares
/// its registry. The default validator is not modified.
#[must_use]
pub fn with_tag_name(tag_name: impl Into<String>) -> Validator {
    current().with_tag_name(tag_name)
}

/// Adds or replaces a rule in the default validator's registry.
///
/// # Errors
///
/// Returns [`RegistryError::EmptyName`] if `name` is empty.
pub fn register_rule<F>(name: &str, rule: F) -> Result<(), RegistryError>
where
    F: Fn(&Value<'_>, &str) -> Result<(), ValidationError> + Send + Sync + 'static,
{
    current().register(name, rule)
}

/// Removes a rule from the default validator's registry.
///
/// # Errors
///
/// Returns [`RegistryError::EmptyName`] if `name` is empty.
pub fn unregister_rule(name: &str) -> Result<(), RegistryError> {
    current().unregister(name)
}

/// A handle on the default validator (sharing its registry).
#[must_use]
pub fn default_validator() -> Validator {
    current()
}

fn current() -> Validator {
    DEFAULT.read().clone()
}
