use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use thiserror::Error;

use super::rule::Rule;

/// Errors raised by [`RuleRegistry::try_register`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("rule name must not be blank (got {name:?})")]
    InvalidName { name: String },
}

/// Maps rule names to rule implementations.
///
/// Registration overwrites any earlier rule of the same name and there is no
/// removal. Lookups are never cached by the executor, so a rule registered
/// after some validations have already run is visible to the next call.
///
/// Registries are cheap to share behind `Arc`. [`RuleRegistry::global`] is a
/// process-wide default; independent registries keep tests and tenants apart.
#[derive(Default)]
pub struct RuleRegistry {
    rules: RwLock<HashMap<String, Arc<dyn Rule>>>,
}

static GLOBAL: Lazy<Arc<RuleRegistry>> = Lazy::new(|| Arc::new(RuleRegistry::with_builtins()));

impl RuleRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the built-in rule catalog.
    #[must_use]
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        crate::rules::register_builtins(&registry);
        registry
    }

    /// The shared process-wide registry, populated with the built-ins on first use.
    #[must_use]
    pub fn global() -> Arc<RuleRegistry> {
        Arc::clone(&GLOBAL)
    }

    /// Store `rule` under `name`, replacing any previous entry.
    ///
    /// A blank name is ignored and `false` is returned; use
    /// [`try_register`](Self::try_register) to treat it as an error.
    pub fn register(&self, name: &str, rule: Arc<dyn Rule>) -> bool {
        self.try_register(name, rule).is_ok()
    }

    /// Like [`register`](Self::register), but rejects blank names.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidName`] when `name` is empty or whitespace.
    /// Surrounding whitespace is trimmed, matching how rule expressions are parsed.
    pub fn try_register(&self, name: &str, rule: Arc<dyn Rule>) -> Result<(), RegistryError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            tracing::debug!(name, "ignoring rule registration with blank name");
            return Err(RegistryError::InvalidName {
                name: name.to_owned(),
            });
        }
        let replaced = self.rules.write().insert(trimmed.to_owned(), rule).is_some();
        tracing::trace!(name = trimmed, replaced, "registered rule");
        Ok(())
    }

    /// Look up the rule registered under `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Rule>> {
        self.rules.read().get(name).cloned()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.rules.read().contains_key(name)
    }

    /// All registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rules.read().keys().cloned().collect();
        names.sort();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.read().is_empty()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.names())
            .finish()
    }
}
