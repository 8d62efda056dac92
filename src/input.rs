use serde_json::Value;

/// Runtime value of a record field, as seen by the rule evaluators.
///
/// The set of kinds is closed: every evaluator matches on it exhaustively
/// and reports the kinds it does not handle as
/// [`RuleError::UnsupportedKind`](crate::error::RuleError::UnsupportedKind).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum FieldValue {
    /// Absent value (`None`, JSON `null`).
    Null,
    Bool(bool),
    /// Any signed integer, or an unsigned one that fits losslessly.
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<FieldValue>),
    /// A nested record. Its own fields are never inspected.
    Record,
}

impl FieldValue {
    /// Name of the value's kind, used in error reports.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::Int(_) => "int",
            FieldValue::Float(_) => "float",
            FieldValue::Str(_) => "string",
            FieldValue::Seq(_) => "sequence",
            FieldValue::Record => "record",
        }
    }
}

/// Conversion of a Rust value into a [`FieldValue`].
///
/// Implemented for strings, integers, floats, booleans, `Option`,
/// sequences and `serde_json::Value`. `#[derive(Validate)]` implements it
/// for the deriving struct (as [`FieldValue::Record`]).
pub trait ToFieldValue {
    fn to_field_value(&self) -> FieldValue;
}

impl<T: ToFieldValue + ?Sized> ToFieldValue for &T {
    fn to_field_value(&self) -> FieldValue {
        (**self).to_field_value()
    }
}

impl<T: ToFieldValue + ?Sized> ToFieldValue for Box<T> {
    fn to_field_value(&self) -> FieldValue {
        (**self).to_field_value()
    }
}

impl ToFieldValue for FieldValue {
    fn to_field_value(&self) -> FieldValue {
        self.clone()
    }
}

impl ToFieldValue for str {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Str(self.to_string())
    }
}

impl ToFieldValue for String {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Str(self.clone())
    }
}

impl ToFieldValue for std::borrow::Cow<'_, str> {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Str(self.to_string())
    }
}

impl ToFieldValue for char {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Str(self.to_string())
    }
}

impl ToFieldValue for bool {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Bool(*self)
    }
}

macro_rules! int_field_value {
    ($($t:ty),*) => {
        $(
            impl ToFieldValue for $t {
                fn to_field_value(&self) -> FieldValue {
                    FieldValue::Int(i64::from(*self))
                }
            }
        )*
    };
}

int_field_value!(i8, i16, i32, i64, u8, u16, u32);

impl ToFieldValue for isize {
    fn to_field_value(&self) -> FieldValue {
        // isize is at most 64 bits on every supported target.
        FieldValue::Int(*self as i64)
    }
}

impl ToFieldValue for f64 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(*self)
    }
}

impl ToFieldValue for f32 {
    /// Widens through the shortest decimal representation, so `1.1f32`
    /// becomes `1.1` rather than `1.100000023841858`.
    fn to_field_value(&self) -> FieldValue {
        let widened = self
            .to_string()
            .parse::<f64>()
            .unwrap_or_else(|_| f64::from(*self));
        FieldValue::Float(widened)
    }
}

impl<T: ToFieldValue> ToFieldValue for Option<T> {
    fn to_field_value(&self) -> FieldValue {
        match self {
            Some(v) => v.to_field_value(),
            None => FieldValue::Null,
        }
    }
}

impl<T: ToFieldValue> ToFieldValue for [T] {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Seq(self.iter().map(ToFieldValue::to_field_value).collect())
    }
}

impl<T: ToFieldValue, const N: usize> ToFieldValue for [T; N] {
    fn to_field_value(&self) -> FieldValue {
        self.as_slice().to_field_value()
    }
}

impl<T: ToFieldValue> ToFieldValue for Vec<T> {
    fn to_field_value(&self) -> FieldValue {
        self.as_slice().to_field_value()
    }
}

impl ToFieldValue for Value {
    /// JSON numbers become `Int` when they fit an `i64`, `Float` otherwise.
    /// Objects are opaque nested records.
    fn to_field_value(&self) -> FieldValue {
        match self {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Int(i),
                None => FieldValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => FieldValue::Str(s.clone()),
            Value::Array(items) => {
                FieldValue::Seq(items.iter().map(ToFieldValue::to_field_value).collect())
            }
            Value::Object(_) => FieldValue::Record,
        }
    }
}

/// Returns the JSON type name for a value.
#[doc(hidden)]
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
