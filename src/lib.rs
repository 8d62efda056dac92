//! # tagvld: tag-driven field validation
//!
//! Attach short rule strings to the fields of a struct and get back the
//! human-readable messages of every rule that failed, grouped by field.
//!
//! ## Quick Start
//!
//! ```rust
//! use tagvld::Validate;
//!
//! #[derive(Validate)]
//! struct Signup {
//!     #[validate("required,minlen=3,maxlen=20")]
//!     username: String,
//!     #[validate("email")]
//!     email: String,
//!     #[validate("min=18")]
//!     age: i32,
//!     #[validate("starts=~https://|http://")]
//!     homepage: Option<String>,
//! }
//!
//! let signup = Signup {
//!     username: "al".into(),
//!     email: "al@example.com".into(),
//!     age: 16,
//!     homepage: None,
//! };
//!
//! let errors = tagvld::validate(&signup).unwrap();
//! assert_eq!(errors.get("username").unwrap(), ["username length or digit must be more than equal to 3"]);
//! assert_eq!(errors.get("age").unwrap(), ["age cannot less than equal to 18"]);
//! assert_eq!(errors.len(), 2);
//! ```
//!
//! ## Tag syntax
//!
//! `rule[=param](,rule[=param])*`. Write `\,` for a comma inside a
//! parameter. The `starts`, `ends`, `contain` and `contains` rules take
//! `|`-separated alternatives; a leading `~` makes them case-insensitive.
//!
//! ## Errors
//!
//! A value that fails a rule is reported in [`ValidationErrors`]. An unknown
//! rule name, a rule applied to a kind of value it cannot handle, or a
//! parameter that does not parse aborts the pass with an [`Error`].

pub mod error;
pub mod input;
pub mod record;
pub mod registry;
pub mod report;
pub mod rules;
pub mod tag;
pub mod validator;

use std::sync::OnceLock;

pub use error::{Error, FirstError, RuleError, UnknownTag, Unsupported};
pub use input::{FieldValue, ToFieldValue};
pub use record::{Field, JsonRecord, Record, RuleSet};
pub use report::ValidationErrors;
pub use validator::{Validator, ValidatorBuilder};

// Re-export the derive macro when the `derive` feature is enabled
#[cfg(feature = "derive")]
pub use tagvld_derive::Validate;

/// The shared validator with the built-in rules.
///
/// Built on first use and never modified afterwards.
pub fn default_validator() -> &'static Validator {
    static DEFAULT: OnceLock<Validator> = OnceLock::new();
    DEFAULT.get_or_init(Validator::new)
}

/// Validate `record` with the built-in rules.
///
/// See [`Validator::validate`].
pub fn validate<R: Record + ?Sized>(record: &R) -> Result<ValidationErrors, Error> {
    default_validator().validate(record)
}

/// The first message of some failing field, or `None` when nothing failed.
///
/// Which field is picked is unspecified.
///
/// ```
/// use tagvld::prelude::*;
///
/// let errors = tagvld::validate(&vec![Field::new("Code", "abc", "digit")]).unwrap();
/// let err = tagvld::first_error(&errors).unwrap();
/// assert_eq!(err.to_string(), "Code must be digit");
///
/// let clean = tagvld::validate(&vec![Field::new("Code", "123", "digit")]).unwrap();
/// assert!(tagvld::first_error(&clean).is_none());
/// ```
pub fn first_error(errors: &ValidationErrors) -> Option<FirstError> {
    errors.first_error()
}

/// Parse a tag string against the built-in rules.
pub fn parse_tags(tag: &str) -> Result<Vec<tag::Rule>, UnknownTag> {
    default_validator().parse(tag)
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Common imports for working with `tagvld`.
pub mod prelude {
    pub use crate::error::{Error, FirstError, RuleError, UnknownTag, Unsupported};
    pub use crate::input::{FieldValue, ToFieldValue};
    pub use crate::record::{Field, JsonRecord, Record, RuleSet};
    pub use crate::registry::{Evaluator, Registry};
    pub use crate::report::ValidationErrors;
    pub use crate::rules::{Message, Outcome};
    pub use crate::tag::Rule;
    pub use crate::validator::{Validator, ValidatorBuilder};
    #[cfg(feature = "derive")]
    pub use tagvld_derive::Validate;
}
