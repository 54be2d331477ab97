//! Record field descriptors
//!
//! A [`Record`] exposes its fields as a table of [`Field`] descriptors: the
//! declared name, whether the field is publicly visible, the annotation
//! strings attached to it and its current value. `#[derive(Record)]`
//! generates the table; it can also be written by hand.
//!
//! ```rust,ignore
//! use tagcheck::{AsValue, Field, Record, Value};
//!
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl Record for Point {
//!     fn fields(&self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::new("x", self.x.as_value()).with_tags(&[("validate", "min=0")]),
//!             Field::new("y", self.y.as_value()).with_tags(&[("validate", "min=0")]),
//!         ]
//!     }
//! }
//!
//! impl AsValue for Point {
//!     fn as_value(&self) -> Value<'_> {
//!         Value::Record(self)
//!     }
//! }
//! ```

use crate::value::Value;

/// A composite value with named, annotated fields.
pub trait Record {
    /// Field descriptors in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;

    /// Type name used in diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Descriptor of one record field.
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    name: &'a str,
    public: bool,
    tags: &'a [(&'a str, &'a str)],
    value: Value<'a>,
}

impl<'a> Field<'a> {
    /// Creates a public, unannotated field.
    pub fn new(name: &'a str, value: Value<'a>) -> Self {
        Self {
            name,
            public: true,
            tags: &[],
            value,
        }
    }

    /// Attaches `(key, annotation)` pairs, e.g. `("validate", "min=3")`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_tags(mut self, tags: &'a [(&'a str, &'a str)]) -> Self {
        self.tags = tags;
        self
    }

    /// Sets whether the field is visible outside its record.
    ///
    /// Nested records held by non-public fields are not traversed.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    /// Declared field name.
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Whether the field is publicly visible.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.public
    }

    /// Normalized field value.
    #[must_use]
    pub fn value(&self) -> Value<'a> {
        self.value
    }

    /// Annotation stored under `key`, or `""` when there is none.
    #[must_use]
    pub fn tag(&self, key: &str) -> &'a str {
        self.tags
            .iter()
            .find(|(k, _)| *k == key)
            .map_or("", |(_, v)| *v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_lookup_defaults_to_empty() {
        let field = Field::new("Age", Value::Int(3))
            .with_tags(&[("validate", "min=3"), ("json", "age")]);

        assert_eq!(field.tag("validate"), "min=3");
        assert_eq!(field.tag("json"), "age");
        assert_eq!(field.tag("other"), "");
        assert!(field.is_public());
        assert!(!field.with_public(false).is_public());
    }
}
