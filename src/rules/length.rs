//! `len`, `minlen` and `maxlen`.
//!
//! Strings are measured in characters and sequences in elements. Integers
//! are measured in decimal digits: with `d` the parameter, the rules look at
//! `q = value / 10^(d-1)` (truncating division):
//!
//! | rule | passes when |
//! |---|---|
//! | `len` | `1 <= q <= 9` |
//! | `minlen` | `q >= 1` |
//! | `maxlen` | `q` is `0` or `1` |

use crate::error::RuleError;
use crate::input::FieldValue;

use super::{check, parse_int, unsupported, Message, Outcome};

/// Measured size of a value, or the digit quotient of an integer.
enum Size {
    Count(i64),
    Quotient(i64),
}

/// Kind check first, then the parameter; `None` for absent values.
fn measure(value: &FieldValue, param: &str) -> Result<Option<(Size, i64)>, RuleError> {
    let size = match value {
        FieldValue::Str(s) => Size::Count(s.chars().count() as i64),
        FieldValue::Seq(items) => Size::Count(items.len() as i64),
        FieldValue::Int(i) => {
            let expected = parse_int(param)?;
            return Ok(Some((Size::Quotient(digit_quotient(*i, expected, param)?), expected)));
        }
        FieldValue::Null => return Ok(None),
        FieldValue::Bool(_) | FieldValue::Float(_) | FieldValue::Record => {
            return Err(unsupported(value))
        }
    };
    Ok(Some((size, parse_int(param)?)))
}

/// `value / 10^(digits-1)`; `0` once the power no longer fits an `i64`.
fn digit_quotient(value: i64, digits: i64, param: &str) -> Result<i64, RuleError> {
    if digits < 1 {
        return Err(RuleError::bad_parameter(param));
    }
    let power = u32::try_from(digits - 1)
        .ok()
        .and_then(|exp| 10i64.checked_pow(exp));
    Ok(power.map_or(0, |p| value / p))
}

/// `len=N`: exact character count, element count or digit count.
pub fn len(value: &FieldValue, param: &str, label: &str) -> Outcome {
    let Some((size, expected)) = measure(value, param)? else {
        return Ok(None);
    };
    let valid = match size {
        Size::Count(n) => n == expected,
        Size::Quotient(q) => (1..=9).contains(&q),
    };
    check(valid, Message::Length, label, param)
}

/// `minlen=N`: at least `N` characters, elements or digits.
pub fn minlen(value: &FieldValue, param: &str, label: &str) -> Outcome {
    let Some((size, expected)) = measure(value, param)? else {
        return Ok(None);
    };
    let valid = match size {
        Size::Count(n) => n >= expected,
        Size::Quotient(q) => q >= 1,
    };
    check(valid, Message::MinLength, label, param)
}

/// `maxlen=N`: at most `N` characters or elements; for integers see the
/// module docs.
pub fn maxlen(value: &FieldValue, param: &str, label: &str) -> Outcome {
    let Some((size, expected)) = measure(value, param)? else {
        return Ok(None);
    };
    let valid = match size {
        Size::Count(n) => n <= expected,
        Size::Quotient(q) => q == 0 || q == 1,
    };
    check(valid, Message::MaxLength, label, param)
}
