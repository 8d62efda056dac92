//! Tag string parsing.
//!
//! A tag string is a comma-separated list of rules, each `name` or
//! `name=param`:
//!
//! ```text
//! required,minlen=3,starts=~foo|bar,contain=a\,b
//! ```
//!
//! A comma preceded by an odd number of backslashes belongs to the
//! parameter; `\,` is unescaped to `,` before the segment is split on its
//! first `=`.

use std::fmt;
use std::sync::Arc;

use crate::error::UnknownTag;
use crate::input::FieldValue;
use crate::registry::{Evaluator, Registry};
use crate::rules::Outcome;

/// One parsed rule invocation with its resolved evaluator.
#[derive(Clone)]
pub struct Rule {
    name: String,
    param: String,
    evaluator: Arc<dyn Evaluator>,
}

impl Rule {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameter after `=`, or an empty string.
    pub fn param(&self) -> &str {
        &self.param
    }

    pub fn evaluate(&self, value: &FieldValue, label: &str) -> Outcome {
        self.evaluator.evaluate(value, &self.param, label)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("param", &self.param)
            .finish_non_exhaustive()
    }
}

/// Split on commas that are not escaped by an odd run of backslashes.
pub(crate) fn split_unescaped(tag: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut backslashes = 0usize;

    for (i, b) in tag.bytes().enumerate() {
        match b {
            b'\\' => backslashes += 1,
            b',' if backslashes % 2 == 0 => {
                segments.push(&tag[start..i]);
                start = i + 1;
                backslashes = 0;
            }
            _ => backslashes = 0,
        }
    }
    segments.push(&tag[start..]);
    segments
}

/// Parse a tag string against `registry`.
///
/// Fails on the first segment whose name is empty or not registered.
///
/// # Example
/// ```
/// use tagvld::registry::Registry;
/// use tagvld::tag::parse_tags;
///
/// let rules = parse_tags("minlen=3, max=10", &Registry::builtin()).unwrap();
/// let names: Vec<_> = rules.iter().map(|r| (r.name(), r.param())).collect();
/// assert_eq!(names, [("minlen", "3"), ("max", "10")]);
/// ```
pub fn parse_tags(tag: &str, registry: &Registry) -> Result<Vec<Rule>, UnknownTag> {
    split_unescaped(tag)
        .into_iter()
        .map(|segment| parse_segment(segment, registry))
        .collect()
}

fn parse_segment(segment: &str, registry: &Registry) -> Result<Rule, UnknownTag> {
    let segment = segment.replace("\\,", ",");
    let (name, param) = match segment.split_once('=') {
        Some((name, param)) => (name.trim(), param.trim()),
        None => (segment.trim(), ""),
    };

    let evaluator = match registry.get(name) {
        Some(evaluator) if !name.is_empty() => Arc::clone(evaluator),
        _ => {
            return Err(UnknownTag {
                name: name.to_string(),
            })
        }
    };

    Ok(Rule {
        name: name.to_string(),
        param: param.to_string(),
        evaluator,
    })
}
