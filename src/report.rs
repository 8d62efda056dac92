use std::collections::hash_map;
use std::collections::HashMap;
use std::fmt;

use crate::error::FirstError;

/// Validation messages grouped by field label.
///
/// Only failing fields appear, each with at least one message, in the order
/// its rules were written. Label order is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "serialize", serde(transparent))]
pub struct ValidationErrors {
    fields: HashMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the messages of one field. Empty lists are ignored; an
    /// existing entry for the same label is replaced.
    pub(crate) fn insert(&mut self, label: String, messages: Vec<String>) {
        if !messages.is_empty() {
            self.fields.insert(label, messages);
        }
    }

    /// True when every field passed.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, label: &str) -> Option<&[String]> {
        self.fields.get(label).map(Vec::as_slice)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.fields.contains_key(label)
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Vec<String>> {
        self.fields.iter()
    }

    /// Failing field labels, sorted.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }

    /// The first message of some failing field.
    ///
    /// Which field is picked is unspecified; do not rely on it across runs.
    pub fn first_error(&self) -> Option<FirstError> {
        self.fields.iter().find_map(|(label, messages)| {
            messages.first().map(|message| FirstError {
                field: label.clone(),
                message: message.clone(),
            })
        })
    }

    pub fn into_inner(self) -> HashMap<String, Vec<String>> {
        self.fields
    }
}

impl IntoIterator for ValidationErrors {
    type Item = (String, Vec<String>);
    type IntoIter = hash_map::IntoIter<String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = hash_map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// One line per message, grouped by label in sorted order:
///
/// ```text
/// ✖ Name cannot be empty or zero value
///   → at Name
/// ```
impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for label in self.labels() {
            for message in &self.fields[label] {
                if !first {
                    writeln!(f)?;
                }
                first = false;
                write!(f, "✖ {}\n  → at {}", message, label)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
