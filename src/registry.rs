use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::input::FieldValue;
use crate::rules::{self, Outcome};

/// A named rule implementation.
///
/// Receives the field value, the rule parameter (empty when the tag has no
/// `=`) and the field label. Any `Fn(&FieldValue, &str, &str) -> Outcome`
/// closure or function is an evaluator.
///
/// # Example
/// ```
/// use tagvld::prelude::*;
///
/// let even = |value: &FieldValue, _param: &str, label: &str| -> Outcome {
///     match value {
///         FieldValue::Int(i) if i % 2 == 0 => Ok(None),
///         FieldValue::Int(_) => Ok(Some(format!("{} must be even", label))),
///         other => Err(RuleError::UnsupportedKind(other.kind())),
///     }
/// };
/// assert_eq!(even.evaluate(&FieldValue::Int(3), "", "Count").unwrap().unwrap(), "Count must be even");
/// ```
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, value: &FieldValue, param: &str, label: &str) -> Outcome;
}

impl<F> Evaluator for F
where
    F: Fn(&FieldValue, &str, &str) -> Outcome + Send + Sync,
{
    fn evaluate(&self, value: &FieldValue, param: &str, label: &str) -> Outcome {
        self(value, param, label)
    }
}

/// Rule name → evaluator table.
///
/// Filled while a [`Validator`](crate::validator::Validator) is being built
/// and read-only afterwards, so a validator can be shared between threads.
#[derive(Clone, Default)]
pub struct Registry {
    rules: HashMap<String, Arc<dyn Evaluator>>,
}

impl Registry {
    /// A registry without any rules.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry holding every built-in rule.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        rules::register_builtins(&mut registry);
        registry
    }

    /// Register `evaluator` under `name`, replacing any previous entry.
    pub(crate) fn insert<E: Evaluator + 'static>(&mut self, name: impl Into<String>, evaluator: E) {
        self.insert_shared(name, Arc::new(evaluator));
    }

    pub(crate) fn insert_shared(&mut self, name: impl Into<String>, evaluator: Arc<dyn Evaluator>) {
        self.rules.insert(name.into(), evaluator);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Evaluator>> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered rule names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("rules", &self.names())
            .finish()
    }
}
