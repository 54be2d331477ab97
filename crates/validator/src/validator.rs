//! Validator: value validation and record traversal
//!
//! A [`Validator`] pairs the name of the annotation key it reads (`validate`
//! by default) with a [`RuleRegistry`]. It validates single values against
//! raw annotations ([`Validator::validate_field`]) and whole records
//! ([`Validator::validate`]).
//!
//! # Record traversal
//!
//! Fields are visited in declaration order:
//!
//! 1. an annotation of `-`, or an empty annotation on a non-record field,
//!    skips the field;
//! 2. the annotation is parsed; a parse error is reported under the declared
//!    field name;
//! 3. `attr=<alias>` replaces the field name in everything reported below;
//! 4. record-shaped values of public fields are validated recursively and
//!    their errors are reported as `<alias>.<nested key>`;
//! 5. any other value is checked against the directives and the first error
//!    is reported.
//!
//! One failing field never stops the others from being validated.

use tracing::{debug, trace};

use crate::config::ValidatorBuilder;
use crate::error::{ErrorArray, ErrorMap, RegistryError, SUMMARY_KEY, ValidationError};
use crate::registry::{RuleFn, RuleRegistry};
use crate::tags::{self, DirectiveList, SKIP};
use crate::value::{AsValue, Value};

/// Annotation key read from record fields unless configured otherwise.
pub const DEFAULT_TAG_NAME: &str = "validate";

/// Tag-driven validator.
///
/// Cloning a validator (or deriving one with [`Validator::with_tag_name`])
/// shares its rule registry; [`Validator::deep_copy`] does not.
#[derive(Debug, Clone)]
pub struct Validator {
    tag_name: String,
    rules: RuleRegistry,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Creates a validator reading `validate` annotations, with the built-in
    /// rules registered.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(DEFAULT_TAG_NAME, RuleRegistry::with_builtins())
    }

    /// Starts a [`ValidatorBuilder`].
    #[must_use]
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::new()
    }

    pub(crate) fn from_parts(tag_name: impl Into<String>, rules: RuleRegistry) -> Self {
        Self {
            tag_name: tag_name.into(),
            rules,
        }
    }

    // ==================== Configuration ====================

    /// Annotation key consulted on each field.
    #[must_use]
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// Changes the annotation key consulted on each field.
    pub fn set_tag_name(&mut self, tag_name: impl Into<String>) {
        self.tag_name = tag_name.into();
        debug!(tag_name = %self.tag_name, "validator tag name changed");
    }

    /// Returns a validator reading `tag_name` that shares this validator's
    /// registry.
    ///
    /// ```rust,ignore
    /// let errors = validator.with_tag_name("form").validate(&input);
    /// ```
    #[must_use]
    pub fn with_tag_name(&self, tag_name: impl Into<String>) -> Self {
        let mut derived = self.clone();
        derived.set_tag_name(tag_name);
        derived
    }

    /// Returns a validator with the same tag name and an independent copy of
    /// the registry.
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        Self::from_parts(self.tag_name.clone(), self.rules.deep_copy())
    }

    /// The rule registry.
    #[must_use]
    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    /// Adds or replaces a rule.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EmptyName`] if `name` is empty.
    pub fn register<F>(&self, name: &str, rule: F) -> Result<(), RegistryError>
    where
        F: Fn(&Value<'_>, &str) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.rules.register(name, rule)
    }

    /// Adds, replaces (`Some`) or removes (`None`) a rule.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EmptyName`] if `name` is empty.
    pub fn set_rule(&self, name: &str, rule: Option<RuleFn>) -> Result<(), RegistryError> {
        self.rules.set(name, rule)
    }

    /// Removes a rule.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EmptyName`] if `name` is empty.
    pub fn unregister(&self, name: &str) -> Result<(), RegistryError> {
        self.rules.unregister(name)
    }

    // ==================== Single values ====================

    /// Validates a value against a raw annotation such as `"min=3,max=10"`.
    ///
    /// An annotation of `-` always passes.
    ///
    /// # Errors
    ///
    /// Returns every failure in directive order. A malformed annotation or an
    /// unregistered rule name yields a single [`ValidationError::UnknownTag`].
    pub fn validate_field<T>(&self, value: &T, raw: &str) -> Result<(), ErrorArray>
    where
        T: AsValue + ?Sized,
    {
        if raw == SKIP {
            return Ok(());
        }

        let directives = tags::parse(raw)?;
        self.validate_value(value.as_value(), &directives)
    }

    /// Checks a value against parsed directives.
    ///
    /// Rule failures accumulate: every directive runs even after one fails.
    /// A `msg_<rule>` directive replaces that rule's error, with `{param}`
    /// substituted.
    ///
    /// # Errors
    ///
    /// Returns the accumulated failures. An unregistered rule name aborts
    /// immediately with only [`ValidationError::UnknownTag`]; a record-shaped
    /// value is rejected with [`ValidationError::Unsupported`].
    pub fn validate_value(
        &self,
        value: Value<'_>,
        directives: &DirectiveList,
    ) -> Result<(), ErrorArray> {
        if value.is_record() {
            return Err(ValidationError::Unsupported.into());
        }

        let mut errors = ErrorArray::new();
        for directive in directives {
            if directive.is_metadata() {
                continue;
            }

            let Some(rule) = self.rules.get(directive.name()) else {
                trace!(rule = directive.name(), "unknown validation rule");
                return Err(ValidationError::UnknownTag.into());
            };

            if let Err(error) = rule(&value, directive.param()) {
                let error = match directives.message_for(directive.name()) {
                    Some(template) => ValidationError::custom(
                        template.replace(tags::PARAM_PLACEHOLDER, directive.param()),
                    ),
                    None => error,
                };
                errors.push(error);
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    // ==================== Records ====================

    /// Validates every annotated field of a record.
    ///
    /// A value that is not record-shaped (after looking through `Option`,
    /// `Box` and friends) yields a single [`SUMMARY_KEY`] entry with
    /// [`ValidationError::Unsupported`].
    pub fn validate<T>(&self, value: &T) -> ErrorMap
    where
        T: AsValue + ?Sized,
    {
        self.validate_record(value.as_value())
    }

    fn validate_record(&self, value: Value<'_>) -> ErrorMap {
        let mut errors = ErrorMap::new();

        let Value::Record(record) = value else {
            errors.insert(SUMMARY_KEY, ValidationError::Unsupported);
            return errors;
        };

        for field in record.fields() {
            let declared = field.name();
            let value = field.value();
            let raw = field.tag(&self.tag_name);

            if raw == SKIP || (raw.is_empty() && !value.is_record()) {
                continue;
            }

            let directives = match tags::parse(raw) {
                Ok(directives) => directives,
                Err(error) => {
                    trace!(field = declared, %error, "malformed annotation");
                    errors.insert(declared, error);
                    continue;
                }
            };

            let reported = directives.alias().unwrap_or(declared);

            if value.is_record() {
                if !field.is_public() {
                    continue;
                }
                for (key, error) in self.validate_record(value) {
                    errors.insert(format!("{reported}.{key}"), error);
                }
            } else if let Err(failures) = self.validate_value(value, &directives) {
                if let Some(error) = failures.into_first() {
                    trace!(field = reported, %error, "field failed validation");
                    errors.insert(reported, error);
                }
            }
        }

        errors
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Field, Record};
    use crate::value::Null;
    use pretty_assertions::assert_eq;

    struct Address {
        zip: String,
        city: String,
    }

    impl Record for Address {
        fn fields(&self) -> Vec<Field<'_>> {
            vec![
                Field::new("Zip", self.zip.as_value()).with_tags(&[("validate", "len=5")]),
                Field::new("City", self.city.as_value())
                    .with_tags(&[("validate", "notempty="), ("form", "min=2")]),
            ]
        }
    }

    impl AsValue for Address {
        fn as_value(&self) -> Value<'_> {
            Value::Record(self)
        }
    }

    struct Person {
        age: i64,
        nick: String,
        ignored: i64,
        untagged: i64,
        home: Address,
        hidden: Address,
        work: Option<Box<Address>>,
        parent_id: Option<u64>,
        score: Null<f64>,
    }

    impl Record for Person {
        fn fields(&self) -> Vec<Field<'_>> {
            vec![
                Field::new("Age", self.age.as_value()).with_tags(&[("validate", "min=18")]),
                Field::new("Nick", self.nick.as_value())
                    .with_tags(&[("validate", "attr=nickname,max=4"), ("form", "notempty=")]),
                Field::new("Ignored", self.ignored.as_value()).with_tags(&[("validate", "-")]),
                Field::new("Untagged", self.untagged.as_value()),
                Field::new("Home", self.home.as_value()),
                Field::new("hidden", self.hidden.as_value()).with_public(false),
                Field::new("Work", self.work.as_value()).with_tags(&[("validate", "attr=office")]),
                Field::new("ParentID", self.parent_id.as_value())
                    .with_tags(&[("validate", "notempty=")]),
                Field::new("Score", self.score.as_value()).with_tags(&[("validate", "notempty=")]),
            ]
        }
    }

    impl AsValue for Person {
        fn as_value(&self) -> Value<'_> {
            Value::Record(self)
        }
    }

    fn address(zip: &str, city: &str) -> Address {
        Address {
            zip: zip.to_owned(),
            city: city.to_owned(),
        }
    }

    fn person() -> Person {
        Person {
            age: 12,
            nick: "longname".to_owned(),
            ignored: 0,
            untagged: 0,
            home: address("123", "Oslo"),
            hidden: address("1", ""),
            work: Some(Box::new(address("12345", ""))),
            parent_id: None,
            score: Null::some(0.0),
        }
    }

    #[test]
    fn traversal_reports_each_failing_field_once() {
        let errors = Validator::new().validate(&person());

        assert_eq!(
            errors.iter().collect::<Vec<_>>(),
            vec![
                ("Age", &ValidationError::Min),
                ("nickname", &ValidationError::Max),
                ("Home.Zip", &ValidationError::Len),
                ("office.City", &ValidationError::ZeroValue),
                ("ParentID", &ValidationError::ZeroValue),
                ("Score", &ValidationError::ZeroValue),
            ]
        );
    }

    #[test]
    fn valid_record_yields_empty_map() {
        let p = Person {
            age: 30,
            nick: "bob".to_owned(),
            ignored: 0,
            untagged: 0,
            home: address("12345", "Oslo"),
            hidden: address("", ""),
            work: None,
            parent_id: Some(7),
            score: Null::some(1.5),
        };
        let errors = Validator::new().validate(&p);
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn non_record_input_is_unsupported() {
        let errors = Validator::new().validate(&42_i32);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(SUMMARY_KEY), Some(&ValidationError::Unsupported));

        let missing: Option<Person> = None;
        assert!(Validator::new().validate(&missing).contains_key(SUMMARY_KEY));
    }

    #[test]
    fn optional_record_is_dereferenced() {
        let boxed = Some(Box::new(person()));
        assert_eq!(Validator::new().validate(&boxed), Validator::new().validate(&person()));
    }

    #[test]
    fn other_tag_name_reads_other_annotations() {
        let validator = Validator::new().with_tag_name("form");
        let errors = validator.validate(&person());

        // aliases come from the `form` annotation too, so Work keeps its name
        assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["Work.City"]);
        assert_eq!(errors.get("Work.City"), Some(&ValidationError::Min));
    }

    #[test]
    fn malformed_annotation_is_reported_under_declared_name() {
        struct Broken {
            a: i64,
            b: i64,
        }
        impl Record for Broken {
            fn fields(&self) -> Vec<Field<'_>> {
                vec![
                    Field::new("A", self.a.as_value())
                        .with_tags(&[("validate", "attr=alias, =3")]),
                    Field::new("B", self.b.as_value()).with_tags(&[("validate", "foo=bar")]),
                ]
            }
        }
        impl AsValue for Broken {
            fn as_value(&self) -> Value<'_> {
                Value::Record(self)
            }
        }

        let errors = Validator::new().validate(&Broken { a: 1, b: 2 });
        assert_eq!(errors.get("A"), Some(&ValidationError::UnknownTag));
        assert_eq!(errors.get("B"), Some(&ValidationError::UnknownTag));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn validate_value_accumulates_and_applies_messages() {
        let validator = Validator::new();
        let directives = tags::parse("min=10,max=0,msg_max=at most {param}").unwrap();

        let errors = validator
            .validate_value(Value::Int(5), &directives)
            .unwrap_err();
        assert_eq!(
            errors.as_slice(),
            &[ValidationError::Min, ValidationError::custom("at most 0")]
        );
    }

    #[test]
    fn unknown_rule_aborts_the_field() {
        let validator = Validator::new();
        let directives = tags::parse("min=10,nope=1,max=0").unwrap();

        let errors = validator
            .validate_value(Value::Int(5), &directives)
            .unwrap_err();
        assert_eq!(errors.as_slice(), &[ValidationError::UnknownTag]);
    }

    #[test]
    fn validate_field_handles_skip_and_records() {
        let validator = Validator::new();
        assert!(validator.validate_field(&0_i32, "-").is_ok());
        assert!(validator.validate_field(&"anything", "-").is_ok());
        assert_eq!(
            validator.validate_field(&address("1", "x"), "len=5").unwrap_err().first(),
            Some(&ValidationError::Unsupported)
        );
        assert_eq!(
            validator.validate_field(&3_i32, " =1").unwrap_err().first(),
            Some(&ValidationError::UnknownTag)
        );
    }

    #[test]
    fn deep_copy_isolates_registry() {
        let base = Validator::new();
        let shared = base.with_tag_name("form");
        let isolated = base.deep_copy();

        shared
            .register("even", |value, _| match value {
                Value::Int(i) if i % 2 == 0 => Ok(()),
                _ => Err(ValidationError::custom("odd")),
            })
            .unwrap();

        assert!(base.validate_field(&2_i64, "even=").is_ok());
        assert_eq!(
            isolated.validate_field(&2_i64, "even=").unwrap_err().first(),
            Some(&ValidationError::UnknownTag)
        );
        assert_eq!(base.tag_name(), DEFAULT_TAG_NAME);
        assert_eq!(shared.tag_name(), "form");
    }

    #[test]
    fn validation_is_idempotent() {
        let validator = Validator::new();
        let p = person();
        assert_eq!(validator.validate(&p), validator.validate(&p));
    }
}
