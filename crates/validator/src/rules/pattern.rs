//! `regexp` rule
//!
//! Compiled patterns are cached; annotations are static in practice, so the
//! cache stays small. It is cleared when it reaches its capacity.

use std::collections::HashMap;
use std::sync::LazyLock;

use parking_lot::RwLock;
use regex::Regex;

use crate::error::ValidationError;
use crate::value::Value;

const CACHE_CAPACITY: usize = 256;

static PATTERN_CACHE: LazyLock<RwLock<HashMap<String, Regex>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

fn compile(pattern: &str) -> Result<Regex, ValidationError> {
    if let Some(re) = PATTERN_CACHE.read().get(pattern) {
        return Ok(re.clone());
    }

    let re = Regex::new(pattern).map_err(|_| ValidationError::BadParameter)?;

    let mut cache = PATTERN_CACHE.write();
    if cache.len() >= CACHE_CAPACITY {
        cache.clear();
    }
    cache.insert(pattern.to_owned(), re.clone());
    Ok(re)
}

/// `regexp=PATTERN`: the string matches `PATTERN` (unanchored).
pub fn regexp(value: &Value<'_>, param: &str) -> Result<(), ValidationError> {
    let s = match value.resolve() {
        Value::Str(s) => s,
        Value::Invalid => return Err(ValidationError::Invalid),
        _ => return Err(ValidationError::Unsupported),
    };

    if compile(param)?.is_match(s) {
        Ok(())
    } else {
        Err(ValidationError::Regexp)
    }
}
