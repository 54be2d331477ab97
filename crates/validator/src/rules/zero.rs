//! Zero-value and presence rules

use crate::error::ValidationError;
use crate::value::Value;

fn is_zero(value: Value<'_>) -> Result<bool, ValidationError> {
    let zero = match value {
        Value::Invalid | Value::Nullable(None) => true,
        Value::Bool(b) => !b,
        Value::Int(i) => i == 0,
        Value::Uint(u) => u == 0,
        Value::Float(f) => f == 0.0,
        Value::Str(s) => s.is_empty(),
        Value::Seq(len) => len == 0,
        Value::Nullable(Some(inner)) => return is_zero(inner.as_value()),
        Value::Record(_) => return Err(ValidationError::Unsupported),
    };
    Ok(zero)
}

/// `notempty` / `empty`: the value is not the zero value of its kind.
///
/// Absent values, `false`, `0`, `""` and empty collections fail, as does a
/// nullable holding one of those.
pub fn not_zero(value: &Value<'_>, _param: &str) -> Result<(), ValidationError> {
    if is_zero(*value)? {
        Err(ValidationError::ZeroValue)
    } else {
        Ok(())
    }
}

/// `present`: a string or collection has content, or a nullable holds a
/// value (whatever that value is).
pub fn present(value: &Value<'_>, _param: &str) -> Result<(), ValidationError> {
    let present = match *value {
        Value::Invalid | Value::Nullable(None) => false,
        Value::Nullable(Some(_)) => true,
        Value::Str(s) => !s.is_empty(),
        Value::Seq(len) => len != 0,
        Value::Bool(_) | Value::Int(_) | Value::Uint(_) | Value::Float(_) | Value::Record(_) => {
            return Err(ValidationError::Unsupported);
        }
    };

    if present {
        Ok(())
    } else {
        Err(ValidationError::ZeroValue)
    }
}
