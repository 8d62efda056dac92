use crate::input::FieldValue;

use super::{check, parse_float, parse_int, unsupported, Message, Outcome};

/// `nonzero` / `required`: strings and sequences must be non-empty, numbers
/// non-zero, and the value must be present. Nested records always pass.
pub fn nonzero(value: &FieldValue, param: &str, label: &str) -> Outcome {
    let valid = match value {
        FieldValue::Str(s) => !s.is_empty(),
        FieldValue::Int(i) => *i != 0,
        FieldValue::Float(f) => *f != 0.0,
        FieldValue::Seq(items) => !items.is_empty(),
        FieldValue::Record => true,
        FieldValue::Null => false,
        FieldValue::Bool(_) => return Err(unsupported(value)),
    };
    check(valid, Message::NonZero, label, param)
}

/// `max=N`: the number must be at most `N`.
pub fn max(value: &FieldValue, param: &str, label: &str) -> Outcome {
    let valid = match value {
        FieldValue::Int(i) => *i <= parse_int(param)?,
        FieldValue::Float(f) => *f <= parse_float(param)?,
        FieldValue::Null => return Ok(None),
        FieldValue::Bool(_) | FieldValue::Str(_) | FieldValue::Seq(_) | FieldValue::Record => {
            return Err(unsupported(value))
        }
    };
    check(valid, Message::Max, label, param)
}

/// `min=N`: the number must be at least `N`.
pub fn min(value: &FieldValue, param: &str, label: &str) -> Outcome {
    let valid = match value {
        FieldValue::Int(i) => *i >= parse_int(param)?,
        FieldValue::Float(f) => *f >= parse_float(param)?,
        FieldValue::Null => return Ok(None),
        FieldValue::Bool(_) | FieldValue::Str(_) | FieldValue::Seq(_) | FieldValue::Record => {
            return Err(unsupported(value))
        }
    };
    check(valid, Message::Min, label, param)
}

/// `equal=X`: exact string match, or numeric equality with the parsed `X`.
pub fn equal(value: &FieldValue, param: &str, label: &str) -> Outcome {
    let valid = match value {
        FieldValue::Str(s) => s == param,
        FieldValue::Int(i) => *i == parse_int(param)?,
        FieldValue::Float(f) => *f == parse_float(param)?,
        FieldValue::Null => return Ok(None),
        FieldValue::Bool(_) | FieldValue::Seq(_) | FieldValue::Record => {
            return Err(unsupported(value))
        }
    };
    check(valid, Message::Equal, label, param)
}
