//! `in` rule: membership in an enumerated set

use super::params::{parse_float, parse_int, parse_uint};
use crate::error::ValidationError;
use crate::value::Value;

fn parse_all<T>(
    param: &str,
    parse: fn(&str) -> Result<T, ValidationError>,
) -> Result<Vec<T>, ValidationError> {
    param.split(',').map(parse).collect()
}

/// `in='a,b,c'`: the value equals one of the listed members.
///
/// Members are parsed for the value's kind; every member must parse, even
/// when an earlier one already matched. Strings are compared verbatim.
pub fn one_of(value: &Value<'_>, param: &str) -> Result<(), ValidationError> {
    let found = match value.resolve() {
        Value::Int(i) => parse_all(param, parse_int)?.contains(&i),
        Value::Uint(u) => parse_all(param, parse_uint)?.contains(&u),
        Value::Float(f) => parse_all(param, parse_float)?.contains(&f),
        Value::Str(s) => param.split(',').any(|member| member == s),
        Value::Invalid => return Err(ValidationError::Invalid),
        _ => return Err(ValidationError::Unsupported),
    };

    if found {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Int(1), "2,3,4", Err(ValidationError::InvalidValue))]
    #[case(Value::Int(1), "1,2,3", Ok(()))]
    #[case(Value::Uint(3), "1,2,3", Ok(()))]
    #[case(Value::Float(1.1), "2.2,3,4", Err(ValidationError::InvalidValue))]
    #[case(Value::Float(1.1), "1.1,2.3,3", Ok(()))]
    #[case(Value::Str("str1"), "str2,str3,str4", Err(ValidationError::InvalidValue))]
    #[case(Value::Str("str1"), "str1,str2,str3", Ok(()))]
    #[case(Value::Float(1.1), "2.2,3,4,not_float", Err(ValidationError::BadParameter))]
    #[case(Value::Int(1), "1,x", Err(ValidationError::BadParameter))]
    #[case(Value::Bool(true), "true", Err(ValidationError::Unsupported))]
    fn membership(
        #[case] value: Value<'static>,
        #[case] param: &str,
        #[case] expected: Result<(), ValidationError>,
    ) {
        assert_eq!(one_of(&value, param), expected);
    }
}
