//! Validator configuration
//!
//! [`ValidatorConfig`] is the serializable part of a validator's setup (the
//! annotation key and whether built-in rules are seeded). Custom rules are
//! functions and can only be added through [`ValidatorBuilder`] or the
//! registry afterwards.

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, ValidationError};
use crate::registry::{RuleFn, RuleRegistry};
use crate::validator::{DEFAULT_TAG_NAME, Validator};
use crate::value::Value;

/// Serializable validator settings.
///
/// ```rust,ignore
/// let config: ValidatorConfig = serde_json::from_str(r#"{"tag_name":"form"}"#)?;
/// let validator = Validator::from_config(config);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Annotation key read from record fields
    pub tag_name: String,
    /// Seed the registry with the built-in rules
    pub builtins: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            tag_name: DEFAULT_TAG_NAME.to_owned(),
            builtins: true,
        }
    }
}

impl ValidatorConfig {
    /// Default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses settings from a JSON value; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the deserialization error for ill-typed keys.
    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

impl Validator {
    /// Builds a validator from settings.
    #[must_use]
    pub fn from_config(config: ValidatorConfig) -> Self {
        let rules = if config.builtins {
            RuleRegistry::with_builtins()
        } else {
            RuleRegistry::new()
        };
        Self::from_parts(config.tag_name, rules)
    }
}

// ==================== Validator Builder ====================

/// Builder for validators with custom settings and rules.
///
/// ```rust,ignore
/// let validator = Validator::builder()
///     .tag_name("form")
///     .rule("even", |value, _| match value {
///         Value::Int(i) if i % 2 == 0 => Ok(()),
///         _ => Err(ValidationError::custom("must be even")),
///     })
///     .build()?;
/// ```
#[must_use = "builder does nothing until .build() is called"]
pub struct ValidatorBuilder {
    config: ValidatorConfig,
    rules: Vec<(String, RuleFn)>,
}

impl ValidatorBuilder {
    /// Starts from the default settings.
    pub fn new() -> Self {
        Self {
            config: ValidatorConfig::default(),
            rules: Vec::new(),
        }
    }

    /// Replaces the settings.
    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the annotation key.
    pub fn tag_name(mut self, tag_name: impl Into<String>) -> Self {
        self.config.tag_name = tag_name.into();
        self
    }

    /// Starts from an empty registry.
    pub fn without_builtins(mut self) -> Self {
        self.config.builtins = false;
        self
    }

    /// Adds a rule, replacing a built-in of the same name.
    pub fn rule<F>(mut self, name: impl Into<String>, rule: F) -> Self
    where
        F: Fn(&Value<'_>, &str) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.rules.push((name.into(), std::sync::Arc::new(rule)));
        self
    }

    /// Builds the validator.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EmptyName`] if a rule was added under an
    /// empty name.
    pub fn build(self) -> Result<Validator, RegistryError> {
        let validator = Validator::from_config(self.config);
        for (name, rule) in self.rules {
            validator.set_rule(&name, Some(rule))?;
        }
        Ok(validator)
    }
}

impl Default for ValidatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ValidatorBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorBuilder")
            .field("config", &self.config)
            .field(
                "rules",
                &self.rules.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn config_defaults_fill_missing_keys() {
        let config = ValidatorConfig::from_json(serde_json::json!({ "tag_name": "form" })).unwrap();
        assert_eq!(
            config,
            ValidatorConfig {
                tag_name: "form".to_owned(),
                builtins: true,
            }
        );

        let validator = Validator::from_config(config);
        assert_eq!(validator.tag_name(), "form");
        assert!(validator.rules().contains("min"));
    }

    #[test]
    fn config_rejects_ill_typed_keys() {
        assert!(ValidatorConfig::from_json(serde_json::json!({ "builtins": "yes" })).is_err());
    }

    #[test]
    fn builder_without_builtins_only_has_custom_rules() {
        let validator = Validator::builder()
            .without_builtins()
            .rule("never", |_, _| Err(ValidationError::custom("never")))
            .build()
            .unwrap();

        assert_eq!(validator.rules().names(), vec!["never".to_owned()]);
        assert_eq!(validator.tag_name(), DEFAULT_TAG_NAME);
    }

    #[test]
    fn builder_rule_overrides_builtin() {
        let validator = Validator::builder()
            .rule("min", |_, _| Ok(()))
            .build()
            .unwrap();
        assert!(validator.validate_field(&0_i32, "min=100").is_ok());
    }

    #[test]
    fn builder_rejects_empty_rule_name() {
        let result = Validator::builder().rule("", |_, _| Ok(())).build();
        assert_eq!(result.unwrap_err(), RegistryError::EmptyName);
    }
}
