use thiserror::Error;

/// A rule name in a tag string that is empty or not registered.
///
/// Returned by [`parse_tags`](crate::tag::parse_tags). The validation driver
/// wraps it in [`Unsupported::Tags`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tag `{name}`")]
pub struct UnknownTag {
    pub name: String,
}

/// Failure of a single evaluator, independent of the rule's name.
///
/// Evaluators return this when they cannot evaluate at all. A value that
/// simply does not satisfy the rule is reported as a message instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The value's kind is not handled by the rule.
    #[error("unsupported value kind `{0}`")]
    UnsupportedKind(&'static str),
    /// The rule parameter does not parse as the type the rule expects.
    #[error("bad parameter `{0}`")]
    BadParameter(String),
}

impl RuleError {
    pub fn bad_parameter(param: impl Into<String>) -> Self {
        RuleError::BadParameter(param.into())
    }
}

/// Why a validation pass could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unsupported {
    /// The host value is not a flat record (or is absent).
    #[error("expected a record, received {0}")]
    Shape(&'static str),
    /// A field's tag string names an unknown rule.
    #[error("field `{field}` has an invalid tag")]
    Tags {
        field: String,
        #[source]
        source: UnknownTag,
    },
    /// A rule was attached to a field whose value kind it cannot handle.
    #[error("rule `{rule}` cannot validate field `{field}` of kind `{kind}`")]
    Kind {
        field: String,
        rule: String,
        kind: &'static str,
    },
}

/// Hard error that aborts a whole validation pass.
///
/// These point at programming or configuration mistakes. Values that fail a
/// rule are not errors; they end up in
/// [`ValidationErrors`](crate::report::ValidationErrors).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unsupported validation: {0}")]
    Unsupported(#[from] Unsupported),
    #[error("bad parameter `{param}` for rule `{rule}` on field `{field}`")]
    BadParameter {
        field: String,
        rule: String,
        param: String,
    },
}

impl Error {
    /// Attach field and rule context to an evaluator failure.
    pub(crate) fn from_rule(err: RuleError, field: &str, rule: &str) -> Self {
        match err {
            RuleError::UnsupportedKind(kind) => Error::Unsupported(Unsupported::Kind {
                field: field.to_string(),
                rule: rule.to_string(),
                kind,
            }),
            RuleError::BadParameter(param) => Error::BadParameter {
                field: field.to_string(),
                rule: rule.to_string(),
                param,
            },
        }
    }

    /// Whether this error came from an unknown rule name.
    pub fn is_unknown_tag(&self) -> bool {
        matches!(self, Error::Unsupported(Unsupported::Tags { .. }))
    }
}

/// The first validation message of a result, as an error value.
///
/// Produced by [`first_error`](crate::first_error).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FirstError {
    /// Label of the field the message belongs to.
    pub field: String,
    pub message: String,
}
