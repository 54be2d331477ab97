//! Length and magnitude rules: `len`, `min`, `max`
//!
//! Strings are measured in characters and collections in items; numbers are
//! compared by value against a parameter parsed for their kind.

use std::cmp::Ordering;

use super::params::{parse_float, parse_int, parse_uint};
use crate::error::ValidationError;
use crate::value::Value;

/// Compares the value (or its length) with the parameter.
///
/// `None` means the two are unordered (NaN).
fn measure(value: &Value<'_>, param: &str) -> Result<Option<Ordering>, ValidationError> {
    match value.resolve() {
        Value::Str(s) => {
            let expected = i128::from(parse_int(param)?);
            Ok(Some((s.chars().count() as i128).cmp(&expected)))
        }
        Value::Seq(len) => {
            let expected = i128::from(parse_int(param)?);
            Ok(Some((len as i128).cmp(&expected)))
        }
        Value::Int(i) => Ok(Some(i.cmp(&parse_int(param)?))),
        Value::Uint(u) => Ok(Some(u.cmp(&parse_uint(param)?))),
        Value::Float(f) => Ok(f.partial_cmp(&parse_float(param)?)),
        Value::Invalid => Err(ValidationError::Invalid),
        Value::Bool(_) | Value::Record(_) | Value::Nullable(_) => Err(ValidationError::Unsupported),
    }
}

/// `len=N`: length (or numeric value) equals `N`.
pub fn len(value: &Value<'_>, param: &str) -> Result<(), ValidationError> {
    match measure(value, param)? {
        Some(Ordering::Equal) => Ok(()),
        _ => Err(ValidationError::Len),
    }
}

/// `min=N`: length (or numeric value) is at least `N`.
pub fn min(value: &Value<'_>, param: &str) -> Result<(), ValidationError> {
    match measure(value, param)? {
        Some(Ordering::Less) => Err(ValidationError::Min),
        _ => Ok(()),
    }
}

/// `max=N`: length (or numeric value) is at most `N`.
pub fn max(value: &Value<'_>, param: &str) -> Result<(), ValidationError> {
    match measure(value, param)? {
        Some(Ordering::Greater) => Err(ValidationError::Max),
        _ => Ok(()),
    }
}
