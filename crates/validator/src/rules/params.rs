//! Rule parameter parsing
//!
//! Integers accept an optional sign and the `0x`, `0o`, `0b` prefixes; a
//! leading `0` means octal. Underscores may separate digits (`1_000`,
//! `0x_ff`) but may not lead, trail or repeat. Anything unparsable is a
//! [`ValidationError::BadParameter`].

use std::borrow::Cow;

use crate::error::ValidationError;

fn split_radix(digits: &str) -> (u32, &str) {
    let lower = digits.get(..2).map(str::to_ascii_lowercase);
    match lower.as_deref() {
        Some("0x") => (16, &digits[2..]),
        Some("0o") => (8, &digits[2..]),
        Some("0b") => (2, &digits[2..]),
        _ if digits.len() > 1 && digits.starts_with('0') => (8, &digits[1..]),
        _ => (10, digits),
    }
}

fn strip_separators(digits: &str, prefixed: bool) -> Result<Cow<'_, str>, ValidationError> {
    if !digits.contains('_') {
        return Ok(Cow::Borrowed(digits));
    }
    // a separator right after a base prefix is allowed
    if (digits.starts_with('_') && !prefixed) || digits.ends_with('_') || digits.contains("__") {
        return Err(ValidationError::BadParameter);
    }
    Ok(Cow::Owned(digits.replace('_', "")))
}

fn parse_magnitude(raw: &str) -> Result<u64, ValidationError> {
    let (radix, rest) = split_radix(raw);
    let digits = strip_separators(rest, rest.len() != raw.len())?;
    // from_str_radix tolerates a leading '+', which must not follow a prefix
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(ValidationError::BadParameter);
    }
    u64::from_str_radix(&digits, radix).map_err(|_| ValidationError::BadParameter)
}

pub(crate) fn parse_int(param: &str) -> Result<i64, ValidationError> {
    let (negative, unsigned) = match param.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, param.strip_prefix('+').unwrap_or(param)),
    };

    let magnitude = i128::from(parse_magnitude(unsigned)?);
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).map_err(|_| ValidationError::BadParameter)
}

pub(crate) fn parse_uint(param: &str) -> Result<u64, ValidationError> {
    parse_magnitude(param)
}

pub(crate) fn parse_float(param: &str) -> Result<f64, ValidationError> {
    param.parse().map_err(|_| ValidationError::BadParameter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("3", 3)]
    #[case("-3", -3)]
    #[case("+7", 7)]
    #[case("0x1F", 31)]
    #[case("0b101", 5)]
    #[case("0o17", 15)]
    #[case("017", 15)]
    #[case("0", 0)]
    #[case("-9223372036854775808", i64::MIN)]
    #[case("1_000", 1000)]
    #[case("-1_000_000", -1_000_000)]
    #[case("0x_1F", 31)]
    #[case("0b1_01", 5)]
    #[case("0_17", 15)]
    fn parses_ints(#[case] param: &str, #[case] expected: i64) {
        assert_eq!(parse_int(param), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("foo")]
    #[case("0x")]
    #[case("0x+1")]
    #[case("--1")]
    #[case("9223372036854775808")]
    #[case("1.5")]
    #[case("_1")]
    #[case("1_")]
    #[case("1__0")]
    #[case("0x_")]
    #[case("0x__1")]
    #[case("-_1")]
    #[case("0x_+1")]
    fn rejects_bad_ints(#[case] param: &str) {
        assert_eq!(parse_int(param), Err(ValidationError::BadParameter));
    }

    #[test]
    fn uints_reject_signs() {
        assert_eq!(parse_uint("42"), Ok(42));
        assert_eq!(parse_uint("-1"), Err(ValidationError::BadParameter));
        assert_eq!(parse_uint("+1"), Err(ValidationError::BadParameter));
        assert_eq!(parse_uint("18_446_744_073_709_551_615"), Ok(u64::MAX));
    }

    #[test]
    fn floats() {
        assert_eq!(parse_float("2.5"), Ok(2.5));
        assert_eq!(parse_float("1e3"), Ok(1000.0));
        assert_eq!(parse_float("not_float"), Err(ValidationError::BadParameter));
    }
}
