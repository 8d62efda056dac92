use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::{Error, UnknownTag, Unsupported};
use crate::record::{Field, Record};
use crate::registry::{Evaluator, Registry};
use crate::report::ValidationErrors;
use crate::tag::{parse_tags, Rule};

/// Validates records against their tag strings.
///
/// Holds an immutable rule registry, so one validator can serve any number
/// of threads.
///
/// # Example
/// ```
/// use tagvld::prelude::*;
///
/// let fields = vec![
///     Field::new("Name", "", "required"),
///     Field::new("Age", &15, "min=18,max=99"),
///     Field::new("Notes", "anything", ""),
/// ];
///
/// let errors = Validator::new().validate(&fields).unwrap();
/// assert_eq!(errors.get("Name").unwrap(), ["Name cannot be empty or zero value"]);
/// assert_eq!(errors.get("Age").unwrap(), ["Age cannot less than equal to 18"]);
/// assert!(!errors.contains("Notes"));
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    registry: Registry,
}

impl Validator {
    /// A validator with the built-in rules.
    pub fn new() -> Self {
        Self {
            registry: Registry::builtin(),
        }
    }

    /// Start building a validator with additional rules.
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder {
            registry: Registry::builtin(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Parse a tag string against this validator's rules.
    pub fn parse(&self, tag: &str) -> Result<Vec<Rule>, UnknownTag> {
        parse_tags(tag, &self.registry)
    }

    /// Validate every tagged field of `record`.
    ///
    /// Returns the failing fields with their messages. A hard error (unknown
    /// rule, unsupported value kind, bad parameter, non-record input) aborts
    /// the whole pass and discards the messages gathered so far.
    pub fn validate<R: Record + ?Sized>(&self, record: &R) -> Result<ValidationErrors, Error> {
        let fields = record.fields().map_err(|err| {
            debug!(error = %err, "record cannot be validated");
            Error::Unsupported(err)
        })?;

        let mut errors = ValidationErrors::new();
        for field in &fields {
            if let Some(messages) = self.validate_field(field)? {
                errors.insert(field.label.to_string(), messages);
            }
        }

        debug!(
            fields = fields.len(),
            failed = errors.len(),
            "record validated"
        );
        Ok(errors)
    }

    /// Validate a single field.
    ///
    /// `Ok(None)` when the field passes or has no rules, otherwise its
    /// messages in rule order.
    pub fn validate_field(&self, field: &Field<'_>) -> Result<Option<Vec<String>>, Error> {
        if field.rules.is_empty() {
            return Ok(None);
        }

        let rules = parse_tags(&field.rules, &self.registry).map_err(|source| {
            debug!(field = %field.label, error = %source, "invalid tag");
            Error::Unsupported(Unsupported::Tags {
                field: field.label.to_string(),
                source,
            })
        })?;

        let mut messages = Vec::with_capacity(rules.len());
        for rule in &rules {
            let outcome = rule.evaluate(&field.value, &field.label).map_err(|err| {
                debug!(field = %field.label, rule = rule.name(), error = %err, "rule failed to run");
                Error::from_rule(err, &field.label, rule.name())
            })?;
            trace!(
                field = %field.label,
                rule = rule.name(),
                param = rule.param(),
                passed = outcome.is_none(),
                "rule evaluated"
            );
            messages.extend(outcome);
        }

        Ok(if messages.is_empty() {
            None
        } else {
            Some(messages)
        })
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a [`Validator`] with custom rules.
///
/// # Example
/// ```
/// use tagvld::prelude::*;
///
/// let validator = Validator::builder()
///     .rule("even", |value: &FieldValue, _: &str, label: &str| -> Outcome {
///         match value {
///             FieldValue::Int(i) => Ok((i % 2 != 0).then(|| format!("{} must be even", label))),
///             other => Err(RuleError::UnsupportedKind(other.kind())),
///         }
///     })
///     .build();
///
/// let errors = validator.validate(&vec![Field::new("Count", &3, "even,max=10")]).unwrap();
/// assert_eq!(errors.get("Count").unwrap(), ["Count must be even"]);
/// ```
#[derive(Debug, Clone)]
pub struct ValidatorBuilder {
    registry: Registry,
}

impl ValidatorBuilder {
    /// Drop the built-in rules; only rules added afterwards are known.
    pub fn without_builtins(mut self) -> Self {
        self.registry = Registry::empty();
        self
    }

    /// Register `evaluator` under `name`. A built-in with the same name is
    /// replaced.
    pub fn rule<E: Evaluator + 'static>(mut self, name: impl Into<String>, evaluator: E) -> Self {
        self.registry.insert(name, evaluator);
        self
    }

    /// Register an evaluator that is already shared, e.g. under an alias.
    pub fn shared_rule(mut self, name: impl Into<String>, evaluator: Arc<dyn Evaluator>) -> Self {
        self.registry.insert_shared(name, evaluator);
        self
    }

    pub fn build(self) -> Validator {
        Validator {
            registry: self.registry,
        }
    }
}
