//! Rule registry
//!
//! Maps directive names to rule functions. A [`RuleRegistry`] is a cheap
//! handle: cloning it shares the underlying mapping, so a registration made
//! through one clone is visible through every other. Use
//! [`RuleRegistry::deep_copy`] when an independent mapping is needed.
//!
//! The mapping sits behind a read-write lock, so rules may be registered
//! while other threads validate. Rule functions are cloned out of the lock
//! before they run.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::error::{RegistryError, ValidationError};
use crate::value::Value;

/// A registered validation check.
///
/// Receives the field value and the directive parameter (`"3"` for `min=3`).
pub type RuleFn = Arc<dyn Fn(&Value<'_>, &str) -> Result<(), ValidationError> + Send + Sync>;

// ==================== Rule Registry ====================

/// Shared, mutable mapping from rule name to [`RuleFn`].
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: Arc<RwLock<HashMap<String, RuleFn>>>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry seeded with the built-in rules.
    #[must_use]
    pub fn with_builtins() -> Self {
        let rules = crate::rules::builtins()
            .into_iter()
            .map(|(name, rule)| (name.to_owned(), rule))
            .collect();

        Self {
            rules: Arc::new(RwLock::new(rules)),
        }
    }

    /// Adds or replaces a rule.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EmptyName`] if `name` is empty; the registry
    /// is left untouched.
    pub fn register<F>(&self, name: &str, rule: F) -> Result<(), RegistryError>
    where
        F: Fn(&Value<'_>, &str) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.set(name, Some(Arc::new(rule)))
    }

    /// Removes a rule. Removing an unknown name is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EmptyName`] if `name` is empty.
    pub fn unregister(&self, name: &str) -> Result<(), RegistryError> {
        self.set(name, None)
    }

    /// Adds, replaces (`Some`) or removes (`None`) a rule.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EmptyName`] if `name` is empty.
    pub fn set(&self, name: &str, rule: Option<RuleFn>) -> Result<(), RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }

        let mut rules = self.rules.write();
        match rule {
            Some(rule) => {
                rules.insert(name.to_owned(), rule);
                debug!(rule = name, "registered validation rule");
            }
            None => {
                if rules.remove(name).is_some() {
                    debug!(rule = name, "unregistered validation rule");
                }
            }
        }
        Ok(())
    }

    /// Looks up a rule.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<RuleFn> {
        self.rules.read().get(name).cloned()
    }

    /// Returns true if a rule is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.rules.read().contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rules.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.read().len()
    }

    /// Returns true if no rule is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.read().is_empty()
    }

    /// Copies the mapping into a new, independent registry.
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        let rules = self.rules.read().clone();
        Self {
            rules: Arc::new(RwLock::new(rules)),
        }
    }

    /// Returns true if both handles point at the same mapping.
    #[must_use]
    pub fn shares_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.rules, &other.rules)
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always_fails(_: &Value<'_>, _: &str) -> Result<(), ValidationError> {
        Err(ValidationError::custom("nope"))
    }

    #[test]
    fn builtins_are_seeded() {
        let registry = RuleRegistry::with_builtins();
        for name in ["notempty", "empty", "present", "len", "min", "max", "regexp", "in", "type"] {
            assert!(registry.contains(name), "missing builtin {name}");
        }
        assert!(RuleRegistry::new().is_empty());
    }

    #[test]
    fn register_and_unregister() {
        let registry = RuleRegistry::new();
        registry.register("never", always_fails).unwrap();
        assert!(registry.contains("never"));

        let rule = registry.get("never").unwrap();
        assert_eq!(rule(&Value::Int(1), ""), Err(ValidationError::custom("nope")));

        registry.unregister("never").unwrap();
        assert!(!registry.contains("never"));
        // removing twice is fine
        registry.unregister("never").unwrap();
    }

    #[test]
    fn empty_name_is_rejected_without_side_effects() {
        let registry = RuleRegistry::with_builtins();
        let before = registry.names();

        assert_eq!(registry.register("", always_fails), Err(RegistryError::EmptyName));
        assert_eq!(registry.unregister(""), Err(RegistryError::EmptyName));
        assert_eq!(registry.names(), before);
    }

    #[test]
    fn registration_overlaps_validation_across_threads() {
        let validator = crate::Validator::new();

        std::thread::scope(|scope| {
            let writer = scope.spawn(|| {
                for i in 0..500 {
                    if i % 2 == 0 {
                        validator.register("flaky", |_, _| Ok(())).unwrap();
                    } else {
                        validator.unregister("flaky").unwrap();
                    }
                }
            });

            let readers: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        for _ in 0..500 {
                            if let Err(errors) = validator.validate_field(&1_i32, "min=0,flaky=") {
                                assert_eq!(errors.as_slice(), &[ValidationError::UnknownTag]);
                            }
                        }
                    })
                })
                .collect();

            writer.join().unwrap();
            for reader in readers {
                reader.join().unwrap();
            }
        });

        assert!(!validator.rules().contains("flaky"));
    }

    #[test]
    fn clones_share_deep_copies_do_not() {
        let registry = RuleRegistry::new();
        let shared = registry.clone();
        let copied = registry.deep_copy();

        shared.register("never", always_fails).unwrap();

        assert!(registry.contains("never"));
        assert!(!copied.contains("never"));
        assert!(registry.shares_with(&shared));
        assert!(!registry.shares_with(&copied));
    }
}
