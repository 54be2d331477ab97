//! Error types for validation failures
//!
//! Three layers of error reporting:
//!
//! - [`ValidationError`]: one failed check, with a stable code and a
//!   plain-text message.
//! - [`ErrorArray`]: every failure collected for a single field, in
//!   directive order.
//! - [`ErrorMap`]: the result of validating a record: display name (or
//!   dotted path for nested records) mapped to the first error of that field.
//!
//! All three render to plain text through `Display` and serialize as that text,
//! so they can be embedded in JSON or any other text-based wire format.

use std::borrow::Cow;
use std::fmt;
use std::ops::Index;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use smallvec::SmallVec;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A single validation failure.
///
/// Built-in rules return the unit variants; custom message templates and
/// user-defined rules use [`ValidationError::Message`].
///
/// # Examples
///
/// ```rust,ignore
/// use tagcheck::ValidationError;
///
/// assert_eq!(ValidationError::Min.to_string(), "less than min");
/// assert_eq!(ValidationError::custom("too small").to_string(), "too small");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ValidationError {
    /// The value is the zero value of its kind and a non-zero one was required.
    #[error("zero value")]
    ZeroValue,

    /// The value (or its length) is below the requested minimum.
    #[error("less than min")]
    Min,

    /// The value (or its length) is above the requested maximum.
    #[error("greater than max")]
    Max,

    /// The value (or its length) differs from the requested length.
    #[error("invalid length")]
    Len,

    /// The string does not match the regular expression parameter.
    #[error("regular expression mismatch")]
    Regexp,

    /// The rule does not support the shape of the value.
    #[error("unsupported type")]
    Unsupported,

    /// The rule parameter could not be interpreted (e.g. `min=foo`).
    #[error("bad parameter")]
    BadParameter,

    /// The annotation names a rule that is not registered, or is malformed.
    #[error("unknown tag")]
    UnknownTag,

    /// The value is nil / absent and cannot be checked.
    #[error("invalid value")]
    Invalid,

    /// The value is not a member of the allowed set.
    #[error("invalid value")]
    InvalidValue,

    /// The value fails the named format check.
    #[error("invalid value for provided type")]
    InvalidTypedValue,

    /// Free-form message from a `msg_<rule>` template or a user rule.
    #[error("{0}")]
    Message(Cow<'static, str>),
}

impl ValidationError {
    /// Creates a free-form error.
    ///
    /// Static strings are stored without allocating.
    pub fn custom(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Message(message.into())
    }

    /// Stable, machine-readable code for this error kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::ZeroValue => "zero_value",
            Self::Min => "min",
            Self::Max => "max",
            Self::Len => "len",
            Self::Regexp => "regexp",
            Self::Unsupported => "unsupported",
            Self::BadParameter => "bad_parameter",
            Self::UnknownTag => "unknown_tag",
            Self::Invalid => "invalid",
            Self::InvalidValue => "invalid_value",
            Self::InvalidTypedValue => "invalid_typed_value",
            Self::Message(_) => "custom",
        }
    }
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ============================================================================
// ERROR ARRAY
// ============================================================================

/// Every error collected for one field, in directive order.
///
/// Only the first element is surfaced in an [`ErrorMap`]; the rest stay
/// available to callers of [`Validator::validate_value`](crate::Validator::validate_value)
/// and [`Validator::validate_field`](crate::Validator::validate_field).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorArray {
    errors: SmallVec<[ValidationError; 2]>,
}

impl ErrorArray {
    /// Creates an empty array.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an error.
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Returns the number of collected errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true when nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The representative error for the field.
    #[must_use]
    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    /// Consumes the array, keeping only the representative error.
    #[must_use]
    pub fn into_first(self) -> Option<ValidationError> {
        self.errors.into_iter().next()
    }

    /// Iterates over all collected errors.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Returns the errors as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[ValidationError] {
        &self.errors
    }
}

impl From<ValidationError> for ErrorArray {
    fn from(error: ValidationError) -> Self {
        let mut errors = SmallVec::new();
        errors.push(error);
        Self { errors }
    }
}

impl FromIterator<ValidationError> for ErrorArray {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ErrorArray {
    type Item = ValidationError;
    type IntoIter = smallvec::IntoIter<[ValidationError; 2]>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorArray {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ErrorArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first() {
            Some(error) => fmt::Display::fmt(error, f),
            None => Ok(()),
        }
    }
}

impl std::error::Error for ErrorArray {}

impl Serialize for ErrorArray {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.errors.len()))?;
        for error in &self.errors {
            seq.serialize_element(error)?;
        }
        seq.end()
    }
}

// ============================================================================
// ERROR MAP
// ============================================================================

/// Key under which a non-record top-level input is reported.
pub const SUMMARY_KEY: &str = "_summary";

/// Result of validating a record.
///
/// Maps each failing field's display name to its first error. Nested record
/// failures use dotted paths (`Address.Zip`). An empty map means every field
/// passed. Insertion order follows field declaration order, which makes
/// [`ErrorMap::first`] deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    errors: IndexMap<String, ValidationError>,
}

impl ErrorMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Looks up the error recorded for a display name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ValidationError> {
        self.errors.get(key)
    }

    /// Returns true if the display name failed.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.errors.contains_key(key)
    }

    /// Iterates over display names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// Iterates over `(display name, error)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationError)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Collapses the map to one representative entry.
    ///
    /// Only meaningful when a single failing field is expected.
    #[must_use]
    pub fn first(&self) -> Option<(&str, &ValidationError)> {
        self.errors.first().map(|(k, v)| (k.as_str(), v))
    }

    /// Converts to a `Result`, failing when any field failed.
    pub fn into_result(self) -> Result<(), ErrorMap> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    pub(crate) fn insert(&mut self, key: impl Into<String>, error: ValidationError) {
        self.errors.insert(key.into(), error);
    }
}

impl Index<&str> for ErrorMap {
    type Output = ValidationError;

    fn index(&self, key: &str) -> &Self::Output {
        &self.errors[key]
    }
}

impl IntoIterator for ErrorMap {
    type Item = (String, ValidationError);
    type IntoIter = indexmap::map::IntoIter<String, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorMap {
    type Item = (&'a String, &'a ValidationError);
    type IntoIter = indexmap::map::Iter<'a, String, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first() {
            Some((key, error)) => write!(f, "{key}: {error}"),
            None => Ok(()),
        }
    }
}

impl std::error::Error for ErrorMap {}

impl Serialize for ErrorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for (key, error) in &self.errors {
            map.serialize_entry(key, error)?;
        }
        map.end()
    }
}

// ============================================================================
// REGISTRY ERROR
// ============================================================================

/// Errors from rule registration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Rule names must be non-empty.
    #[error("bad parameter: rule name cannot be empty")]
    EmptyName,
}

// ============================================================================
// TESTS
// ============================================================================
