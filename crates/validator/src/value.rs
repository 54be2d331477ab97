//! Normalized value model
//!
//! Every input is converted once into a [`Value`], a small closed set of
//! shapes that rules and the record traversal branch on. Types opt in by
//! implementing [`AsValue`]; implementations for the standard library's
//! scalars, strings, collections and smart pointers are provided here.
//!
//! Transparent wrappers (`Option`, `Box`, `Rc`, `Arc`, references) normalize
//! to their pointee, so a chain like `Option<Box<u32>>` reaches the number
//! directly. `None` becomes [`Value::Invalid`].
//!
//! [`Null<T>`] is the opposite: a scalar-shaped wrapper that reports whether
//! it holds a value without being dereferenced by traversal.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::record::Record;

// ============================================================================
// VALUE
// ============================================================================

/// Shape of a value as seen by rules.
#[derive(Clone, Copy)]
pub enum Value<'a> {
    /// Nil, unset optional, or anything that could not be resolved.
    Invalid,
    /// Boolean.
    Bool(bool),
    /// Signed integer of any width.
    Int(i64),
    /// Unsigned integer of any width.
    Uint(u64),
    /// Floating point number.
    Float(f64),
    /// String slice.
    Str(&'a str),
    /// Sequence, map or set; only the number of items is observable.
    Seq(usize),
    /// Nested record; traversal recurses into it.
    Record(&'a dyn Record),
    /// Presence-reporting wrapper: `Some` holds the inner value.
    Nullable(Option<&'a dyn AsValue>),
}

impl<'a> Value<'a> {
    /// Returns true for [`Value::Record`].
    #[must_use]
    pub fn is_record(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    /// Returns true for [`Value::Invalid`].
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Value::Invalid)
    }

    /// Unwraps nullable wrappers: a present one yields its inner value, an
    /// absent one yields [`Value::Invalid`]. Other shapes are returned as-is.
    #[must_use]
    pub fn resolve(self) -> Value<'a> {
        match self {
            Value::Nullable(Some(inner)) => inner.as_value().resolve(),
            Value::Nullable(None) => Value::Invalid,
            other => other,
        }
    }

    /// Short name of the shape, used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Invalid => "invalid",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Uint(_) => "uint",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Seq(_) => "sequence",
            Value::Record(_) => "record",
            Value::Nullable(_) => "nullable",
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Invalid => f.write_str("Invalid"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Uint(u) => f.debug_tuple("Uint").field(u).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Seq(len) => f.debug_tuple("Seq").field(len).finish(),
            Value::Record(r) => f.debug_tuple("Record").field(&r.type_name()).finish(),
            Value::Nullable(None) => f.write_str("Nullable(None)"),
            Value::Nullable(Some(inner)) => f
                .debug_tuple("Nullable")
                .field(&inner.as_value())
                .finish(),
        }
    }
}

// ============================================================================
// AS VALUE
// ============================================================================

/// Conversion into the normalized [`Value`] model.
///
/// `#[derive(Record)]` implements this for records; implement it by hand for
/// custom scalar types.
///
/// ```rust,ignore
/// use tagcheck::{AsValue, Value};
///
/// struct Celsius(f64);
///
/// impl AsValue for Celsius {
///     fn as_value(&self) -> Value<'_> {
///         Value::Float(self.0)
///     }
/// }
/// ```
pub trait AsValue {
    /// Returns the normalized view of `self`.
    fn as_value(&self) -> Value<'_>;
}

impl AsValue for Value<'_> {
    fn as_value(&self) -> Value<'_> {
        *self
    }
}

impl<'r> AsValue for dyn Record + 'r {
    fn as_value(&self) -> Value<'_> {
        Value::Record(self)
    }
}

impl AsValue for bool {
    fn as_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

macro_rules! impl_as_value_numeric {
    ($variant:ident as $target:ty => $($ty:ty),+ $(,)?) => {
        $(
            impl AsValue for $ty {
                #[allow(trivial_numeric_casts, clippy::cast_lossless)]
                fn as_value(&self) -> Value<'_> {
                    Value::$variant(*self as $target)
                }
            }
        )+
    };
}

impl_as_value_numeric!(Int as i64 => i8, i16, i32, i64, isize);
impl_as_value_numeric!(Uint as u64 => u8, u16, u32, u64, usize);
impl_as_value_numeric!(Float as f64 => f32, f64);

impl AsValue for char {
    fn as_value(&self) -> Value<'_> {
        Value::Int(i64::from(u32::from(*self)))
    }
}

// Wide integers keep their kind while they fit, and fall back to a float
// magnitude beyond 64 bits.
impl AsValue for i128 {
    fn as_value(&self) -> Value<'_> {
        i64::try_from(*self).map_or(Value::Float(*self as f64), Value::Int)
    }
}

impl AsValue for u128 {
    fn as_value(&self) -> Value<'_> {
        u64::try_from(*self).map_or(Value::Float(*self as f64), Value::Uint)
    }
}

impl AsValue for str {
    fn as_value(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl AsValue for String {
    fn as_value(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl AsValue for Cow<'_, str> {
    fn as_value(&self) -> Value<'_> {
        Value::Str(self)
    }
}

// Transparent wrappers

impl<T: AsValue> AsValue for Option<T> {
    fn as_value(&self) -> Value<'_> {
        match self {
            Some(inner) => inner.as_value(),
            None => Value::Invalid,
        }
    }
}

impl<T: AsValue + ?Sized> AsValue for &T {
    fn as_value(&self) -> Value<'_> {
        (**self).as_value()
    }
}

impl<T: AsValue + ?Sized> AsValue for Box<T> {
    fn as_value(&self) -> Value<'_> {
        (**self).as_value()
    }
}

impl<T: AsValue + ?Sized> AsValue for Rc<T> {
    fn as_value(&self) -> Value<'_> {
        (**self).as_value()
    }
}

impl<T: AsValue + ?Sized> AsValue for Arc<T> {
    fn as_value(&self) -> Value<'_> {
        (**self).as_value()
    }
}

// Collections only expose their length

impl<T> AsValue for [T] {
    fn as_value(&self) -> Value<'_> {
        Value::Seq(self.len())
    }
}

impl<T, const N: usize> AsValue for [T; N] {
    fn as_value(&self) -> Value<'_> {
        Value::Seq(N)
    }
}

impl<T> AsValue for Vec<T> {
    fn as_value(&self) -> Value<'_> {
        Value::Seq(self.len())
    }
}

impl<T> AsValue for VecDeque<T> {
    fn as_value(&self) -> Value<'_> {
        Value::Seq(self.len())
    }
}

impl<K, V, S> AsValue for HashMap<K, V, S> {
    fn as_value(&self) -> Value<'_> {
        Value::Seq(self.len())
    }
}

impl<K, V> AsValue for BTreeMap<K, V> {
    fn as_value(&self) -> Value<'_> {
        Value::Seq(self.len())
    }
}

impl<T, S> AsValue for HashSet<T, S> {
    fn as_value(&self) -> Value<'_> {
        Value::Seq(self.len())
    }
}

impl<T> AsValue for BTreeSet<T> {
    fn as_value(&self) -> Value<'_> {
        Value::Seq(self.len())
    }
}

// ============================================================================
// NULL
// ============================================================================

/// A nullable scalar that reports presence instead of being dereferenced.
///
/// Unlike `Option<T>`, which traversal looks through, `Null<T>` stays a
/// single value: `notempty` fails when it is absent *or* when the held value
/// is zero, while `present` only checks that something is held.
///
/// ```rust,ignore
/// use tagcheck::{Null, validate_field};
///
/// assert!(validate_field(&Null::<i64>::none(), "notempty=").is_err());
/// assert!(validate_field(&Null::some(0_i64), "present=").is_ok());
/// assert!(validate_field(&Null::some(0_i64), "notempty=").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Null<T> {
    inner: Option<T>,
}

impl<T> Null<T> {
    /// A present value.
    pub fn some(value: T) -> Self {
        Self { inner: Some(value) }
    }

    /// An absent value.
    #[must_use]
    pub fn none() -> Self {
        Self { inner: None }
    }

    /// Returns true when a value is held.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.inner.is_some()
    }

    /// Borrows the held value.
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.inner.as_ref()
    }

    /// Unwraps into an `Option`.
    pub fn into_inner(self) -> Option<T> {
        self.inner
    }
}

impl<T> From<Option<T>> for Null<T> {
    fn from(inner: Option<T>) -> Self {
        Self { inner }
    }
}

impl<T: AsValue> AsValue for Null<T> {
    fn as_value(&self) -> Value<'_> {
        Value::Nullable(self.inner.as_ref().map(|v| v as &dyn AsValue))
    }
}

// ============================================================================
// TESTS
// ============================================================================
