//! Built-in rules
//!
//! Every validator starts with these registered (unless built with
//! [`ValidatorBuilder::without_builtins`](crate::ValidatorBuilder::without_builtins)):
//!
//! | Name | Check |
//! |------|-------|
//! | `notempty`, `empty` | value is not the zero value of its kind |
//! | `present` | string/collection is non-empty, nullable holds a value |
//! | `len` | length (strings, collections) or value (numbers) equals the parameter |
//! | `min` / `max` | length or value is at least / at most the parameter |
//! | `regexp` | string matches the regular expression parameter |
//! | `in` | value is one of the comma-separated parameter values |
//! | `type` | string is a valid `timestamp` (RFC 3339) or `base64` |
//!
//! The functions are public so they can be registered under other names.

mod compare;
mod format;
mod params;
mod pattern;
mod set;
mod zero;

use std::sync::Arc;

use crate::error::ValidationError;
use crate::registry::RuleFn;
use crate::value::Value;

pub use compare::{len, max, min};
pub use format::typed;
pub use pattern::regexp;
pub use set::one_of;
pub use zero::{not_zero, present};

fn rule<F>(f: F) -> RuleFn
where
    F: Fn(&Value<'_>, &str) -> Result<(), ValidationError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// The default rule table.
pub(crate) fn builtins() -> Vec<(&'static str, RuleFn)> {
    vec![
        ("notempty", rule(not_zero)),
        ("empty", rule(not_zero)),
        ("present", rule(present)),
        ("len", rule(len)),
        ("min", rule(min)),
        ("max", rule(max)),
        ("regexp", rule(regexp)),
        ("in", rule(one_of)),
        ("type", rule(typed)),
    ]
}
