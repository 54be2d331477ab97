//! Annotation grammar
//!
//! An annotation is a comma-separated list of `name=value` directives:
//!
//! ```text
//! min=3,max=10,in='a,b,c',attr=display_name,msg_min=too small: {param}
//! ```
//!
//! A value is either a bare token running to the next `,` (or the end), or a
//! single-quoted token that may itself contain commas. Whitespace around
//! names and values is trimmed (spaces only; tabs and newlines are kept).
//!
//! Two directive shapes are metadata rather than rules:
//!
//! - `attr=<alias>` renames the field in reported errors.
//! - `msg_<rule>=<template>` replaces the error of `<rule>`; `{param}` in the
//!   template is substituted with that rule's parameter.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

/// Annotation that removes a field from validation entirely.
pub const SKIP: &str = "-";

/// Directive supplying the display name of a field.
pub const ATTR: &str = "attr";

/// Prefix of directives carrying custom error templates.
pub const MESSAGE_PREFIX: &str = "msg_";

/// Placeholder substituted in message templates.
pub const PARAM_PLACEHOLDER: &str = "{param}";

static DIRECTIVE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([^'=]+)=(?:'?)([^'=]*)(?:'?)(?:,|$)").expect("directive pattern is valid")
});

// ============================================================================
// DIRECTIVE
// ============================================================================

/// One `name=param` instruction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Directive {
    name: String,
    param: String,
}

impl Directive {
    /// Creates a directive.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownTag`] if `name` is empty or only
    /// spaces.
    pub fn new(
        name: impl Into<String>,
        param: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim_matches(' ').is_empty() {
            return Err(ValidationError::UnknownTag);
        }
        Ok(Self {
            name,
            param: param.into(),
        })
    }

    /// Rule (or metadata) name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw parameter; empty when none was given.
    #[must_use]
    pub fn param(&self) -> &str {
        &self.param
    }

    /// True for `attr` and `msg_*` directives, which are never dispatched.
    #[must_use]
    pub fn is_metadata(&self) -> bool {
        self.name == ATTR || self.name.starts_with(MESSAGE_PREFIX)
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.param.contains(',') {
            write!(f, "{}='{}'", self.name, self.param)
        } else {
            write!(f, "{}={}", self.name, self.param)
        }
    }
}

// ============================================================================
// DIRECTIVE LIST
// ============================================================================

/// Ordered directives of one annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveList {
    directives: Vec<Directive>,
}

impl DirectiveList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// First directive with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Directive> {
        self.directives.iter().find(|d| d.name == name)
    }

    /// The alias from an `attr` directive, if present.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.get(ATTR).map(Directive::param)
    }

    /// The `msg_<rule>` template for a rule, if present.
    #[must_use]
    pub fn message_for(&self, rule: &str) -> Option<&str> {
        self.directives
            .iter()
            .find(|d| {
                d.name
                    .strip_prefix(MESSAGE_PREFIX)
                    .is_some_and(|target| target == rule)
            })
            .map(Directive::param)
    }

    /// Iterates in annotation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Directive> {
        self.directives.iter()
    }

    /// Number of directives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    /// Returns true when the annotation held no directives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

impl From<Vec<Directive>> for DirectiveList {
    fn from(directives: Vec<Directive>) -> Self {
        Self { directives }
    }
}

impl FromIterator<Directive> for DirectiveList {
    fn from_iter<I: IntoIterator<Item = Directive>>(iter: I) -> Self {
        Self {
            directives: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DirectiveList {
    type Item = &'a Directive;
    type IntoIter = std::slice::Iter<'a, Directive>;

    fn into_iter(self) -> Self::IntoIter {
        self.directives.iter()
    }
}

impl fmt::Display for DirectiveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, directive) in self.directives.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{directive}")?;
        }
        Ok(())
    }
}

impl FromStr for DirectiveList {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

// ============================================================================
// PARSER
// ============================================================================

/// Parses a raw annotation into its directives.
///
/// Fails with [`ValidationError::UnknownTag`] when a directive name is blank;
/// no partial list is returned in that case. Text that does not form a
/// `name=value` pair is ignored.
pub fn parse(raw: &str) -> Result<DirectiveList, ValidationError> {
    let mut directives = Vec::new();

    for captures in DIRECTIVE_REGEX.captures_iter(raw) {
        let name = captures.get(1).map_or("", |m| m.as_str()).trim_matches(' ');
        let param = captures.get(2).map_or("", |m| m.as_str()).trim_matches(' ');
        directives.push(Directive::new(name, param)?);
    }

    Ok(DirectiveList { directives })
}

// ============================================================================
// TESTS
// ============================================================================
