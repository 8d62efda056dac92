//! Record introspection.
//!
//! The validator never looks inside Rust types itself. A [`Record`] hands it
//! one [`Field`] per validated field: the label, the current value and the
//! tag string. `#[derive(Validate)]` implements it for structs;
//! [`JsonRecord`] implements it for a JSON object paired with a [`RuleSet`].

use std::borrow::Cow;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::Unsupported;
use crate::input::{value_type_name, FieldValue, ToFieldValue};

/// One field of a record, as presented to the validator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct Field<'a> {
    pub label: Cow<'a, str>,
    pub value: FieldValue,
    /// Tag string, e.g. `"required,maxlen=20"`. Empty means unconstrained.
    pub rules: Cow<'a, str>,
}

impl<'a> Field<'a> {
    pub fn new<V: ToFieldValue + ?Sized>(
        label: impl Into<Cow<'a, str>>,
        value: &V,
        rules: impl Into<Cow<'a, str>>,
    ) -> Self {
        Self {
            label: label.into(),
            value: value.to_field_value(),
            rules: rules.into(),
        }
    }
}

/// A value the validator can walk field by field.
///
/// Fields are returned in declaration order; that order is the order in
/// which they are validated.
pub trait Record {
    /// Present the fields, or explain why this value is not a flat record.
    fn fields(&self) -> Result<Vec<Field<'_>>, Unsupported>;
}

impl<R: Record + ?Sized> Record for &R {
    fn fields(&self) -> Result<Vec<Field<'_>>, Unsupported> {
        (**self).fields()
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn fields(&self) -> Result<Vec<Field<'_>>, Unsupported> {
        (**self).fields()
    }
}

/// An absent record cannot be validated.
impl<R: Record> Record for Option<R> {
    fn fields(&self) -> Result<Vec<Field<'_>>, Unsupported> {
        match self {
            Some(record) => record.fields(),
            None => Err(Unsupported::Shape("nothing")),
        }
    }
}

/// Hand-built field lists are records too.
impl<'a> Record for [Field<'a>] {
    fn fields(&self) -> Result<Vec<Field<'_>>, Unsupported> {
        Ok(self
            .iter()
            .map(|f| Field {
                label: Cow::Borrowed(f.label.as_ref()),
                value: f.value.clone(),
                rules: Cow::Borrowed(f.rules.as_ref()),
            })
            .collect())
    }
}

impl<'a> Record for Vec<Field<'a>> {
    fn fields(&self) -> Result<Vec<Field<'_>>, Unsupported> {
        self.as_slice().fields()
    }
}

// ---------------------------------------------------------------------------
// JSON records
// ---------------------------------------------------------------------------

/// Ordered `field → tag string` table for validating JSON objects.
///
/// Deserializes from a JSON object and keeps the document order, which is
/// the validation order.
///
/// # Example
/// ```
/// use tagvld::record::RuleSet;
///
/// let rules: RuleSet = serde_json::from_str(r#"{"name": "required", "age": "min=18"}"#).unwrap();
/// let names: Vec<_> = rules.iter().map(|(field, _)| field).collect();
/// assert_eq!(names, ["name", "age"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    entries: Vec<(String, String)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the tag string of `field`. A replaced field keeps its
    /// original position.
    pub fn rule(mut self, field: impl Into<String>, rules: impl Into<String>) -> Self {
        self.insert(field.into(), rules.into());
        self
    }

    fn insert(&mut self, field: String, rules: String) {
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = rules,
            None => self.entries.push((field, rules)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, rules)| rules.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(field, rules)| (field.as_str(), rules.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = RuleSet::new();
        for (field, rules) in iter {
            set.insert(field.into(), rules.into());
        }
        set
    }
}

impl Serialize for RuleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, rules) in &self.entries {
            map.serialize_entry(field, rules)?;
        }
        map.end()
    }
}

struct RuleSetVisitor;

impl<'de> Visitor<'de> for RuleSetVisitor {
    type Value = RuleSet;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of field names to tag strings")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RuleSet, A::Error> {
        let mut set = RuleSet::new();
        while let Some((field, rules)) = access.next_entry::<String, String>()? {
            set.insert(field, rules);
        }
        Ok(set)
    }
}

impl<'de> Deserialize<'de> for RuleSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RuleSetVisitor)
    }
}

/// A JSON object validated against a [`RuleSet`].
///
/// Fields are visited in rule set order. A field missing from the object is
/// presented as [`FieldValue::Null`], which fails only `required`/`nonzero`.
///
/// # Example
/// ```
/// use serde_json::json;
/// use tagvld::record::{JsonRecord, RuleSet};
///
/// let rules = RuleSet::new().rule("name", "required").rule("age", "min=18");
/// let body = json!({"name": "", "age": 16});
/// let errors = tagvld::validate(&JsonRecord::new(&body, &rules)).unwrap();
/// assert_eq!(errors.len(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct JsonRecord<'a> {
    value: &'a Value,
    rules: &'a RuleSet,
}

impl<'a> JsonRecord<'a> {
    pub fn new(value: &'a Value, rules: &'a RuleSet) -> Self {
        Self { value, rules }
    }
}

impl Record for JsonRecord<'_> {
    fn fields(&self) -> Result<Vec<Field<'_>>, Unsupported> {
        let object = match self.value {
            Value::Object(object) => object,
            other => return Err(Unsupported::Shape(value_type_name(other))),
        };

        Ok(self
            .rules
            .iter()
            .map(|(name, rules)| Field {
                label: Cow::Borrowed(name),
                value: object
                    .get(name)
                    .map_or(FieldValue::Null, ToFieldValue::to_field_value),
                rules: Cow::Borrowed(rules),
            })
            .collect())
    }
}
