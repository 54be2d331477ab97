//! `type` rule: named string formats

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use chrono::DateTime;

use crate::error::ValidationError;
use crate::value::Value;

fn is_timestamp(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
}

// Standard alphabet with canonical padding; unused bits in the last symbol
// are not checked.
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical),
);

fn is_base64(s: &str) -> bool {
    !s.is_empty() && BASE64.decode(s).is_ok()
}

/// `type=timestamp` (RFC 3339) or `type=base64` (standard alphabet, padded).
pub fn typed(value: &Value<'_>, param: &str) -> Result<(), ValidationError> {
    let check: fn(&str) -> bool = match param {
        "timestamp" => is_timestamp,
        "base64" => is_base64,
        _ => return Err(ValidationError::BadParameter),
    };

    let s = match value.resolve() {
        Value::Str(s) => s,
        Value::Invalid => return Err(ValidationError::Invalid),
        _ => return Err(ValidationError::Unsupported),
    };

    if check(s) {
        Ok(())
    } else {
        Err(ValidationError::InvalidTypedValue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("not_base64", "base64", Err(ValidationError::InvalidTypedValue))]
    #[case("dGVzdA==", "base64", Ok(()))]
    #[case("", "base64", Err(ValidationError::InvalidTypedValue))]
    #[case("AB==", "base64", Ok(()))]
    #[case("dGVzdB==", "base64", Ok(()))]
    #[case("dGVzdA", "base64", Err(ValidationError::InvalidTypedValue))]
    #[case("dGVzd===", "base64", Err(ValidationError::InvalidTypedValue))]
    #[case("not_timestamp", "timestamp", Err(ValidationError::InvalidTypedValue))]
    #[case("2008-09-08T22:47:31-07:00", "timestamp", Ok(()))]
    #[case("2008-09-08T22:47:31Z", "timestamp", Ok(()))]
    #[case("dGVzdA==", "uuid", Err(ValidationError::BadParameter))]
    fn formats(
        #[case] input: &str,
        #[case] param: &str,
        #[case] expected: Result<(), ValidationError>,
    ) {
        assert_eq!(typed(&Value::Str(input), param), expected);
    }

    #[test]
    fn non_strings_are_unsupported() {
        assert_eq!(typed(&Value::Int(1), "base64"), Err(ValidationError::Unsupported));
    }
}
