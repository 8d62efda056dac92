//! Built-in rule evaluators.
//!
//! Every evaluator has the shape `(value, param, label) -> Outcome` and is
//! registered by name in [`Registry::builtin`](crate::registry::Registry::builtin).

mod format;
mod length;
mod number;
mod string;

use std::sync::Arc;

use crate::error::RuleError;
use crate::registry::{Evaluator, Registry};

pub use format::{date, email, time};
pub use length::{len, maxlen, minlen};
pub use number::{equal, max, min, nonzero};
pub use string::{
    alphanum, contain, contains, digit, ends, letter, lowercase, numeric, starts, uppercase,
};

/// Result of evaluating one rule: `Ok(None)` when the value passes,
/// `Ok(Some(message))` when it does not.
pub type Outcome = Result<Option<String>, RuleError>;

/// Message template of a failed rule.
///
/// The full message is `<label><template><param>`, see [`Message::compose`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    NonZero,
    Min,
    Max,
    Equal,
    InvalidFormat,
    Length,
    MinLength,
    MaxLength,
    StartsWith,
    EndsWith,
    Contain,
    Contains,
    Letter,
    Digit,
    Numeric,
    AlphaNumeric,
    Upper,
    Lower,
}

impl Message {
    pub fn template(self) -> &'static str {
        match self {
            Message::NonZero => " cannot be empty or zero value",
            Message::Min => " cannot less than equal to ",
            Message::Max => " cannot be more than equal to ",
            Message::Equal => " must be equal to ",
            Message::InvalidFormat => " format is invalid",
            Message::Length => " length or digit must be equal to ",
            Message::MinLength => " length or digit must be more than equal to ",
            Message::MaxLength => " length or digit must be less than equal to ",
            Message::StartsWith => " starts with ",
            Message::EndsWith => " ends with ",
            Message::Contain => " must be contains at least one of ",
            Message::Contains => " must be contains all of ",
            Message::Letter => " must be letter",
            Message::Digit => " must be digit",
            Message::Numeric => " must be numeric",
            Message::AlphaNumeric => " must be alphanumeric",
            Message::Upper => " must be upper case",
            Message::Lower => " must be lower case",
        }
    }

    /// Build the message for `label`, trimmed of surrounding spaces.
    ///
    /// ```
    /// use tagvld::rules::Message;
    ///
    /// assert_eq!(Message::Max.compose("Age", "99"), "Age cannot be more than equal to 99");
    /// assert_eq!(Message::InvalidFormat.compose("Email", ""), "Email format is invalid");
    /// ```
    pub fn compose(self, label: &str, param: &str) -> String {
        let mut msg = String::with_capacity(label.len() + self.template().len() + param.len());
        msg.push_str(label);
        msg.push_str(self.template());
        msg.push_str(param);
        msg.trim_matches(' ').to_string()
    }
}

/// `Ok(Some(message))` when `valid` is false, `Ok(None)` otherwise.
pub(crate) fn check(valid: bool, message: Message, label: &str, param: &str) -> Outcome {
    if valid {
        Ok(None)
    } else {
        Ok(Some(message.compose(label, param)))
    }
}

/// Parse an integer parameter with base prefixes: `0x`, `0o`, `0b` and a
/// bare leading `0` for octal. `_` may separate digits.
pub(crate) fn parse_int(param: &str) -> Result<i64, RuleError> {
    let bad = || RuleError::bad_parameter(param);

    let (negative, body) = if let Some(rest) = param.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = param.strip_prefix('+') {
        (false, rest)
    } else {
        (false, param)
    };

    let (radix, digits, prefixed) = if let Some(rest) =
        body.strip_prefix("0x").or_else(|| body.strip_prefix("0X"))
    {
        (16, rest, true)
    } else if let Some(rest) = body.strip_prefix("0o").or_else(|| body.strip_prefix("0O")) {
        (8, rest, true)
    } else if let Some(rest) = body.strip_prefix("0b").or_else(|| body.strip_prefix("0B")) {
        (2, rest, true)
    } else if body.len() > 1 && body.starts_with('0') {
        (8, &body[1..], true)
    } else {
        (10, body, false)
    };

    if !underscores_ok(digits, prefixed) {
        return Err(bad());
    }
    let digits: String = digits.chars().filter(|&c| c != '_').collect();
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(bad());
    }

    let signed = if negative {
        format!("-{}", digits)
    } else {
        digits
    };
    i64::from_str_radix(&signed, radix).map_err(|_| bad())
}

/// `_` must sit between two digits, or directly after a base prefix.
fn underscores_ok(digits: &str, prefixed: bool) -> bool {
    let bytes = digits.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'_' {
            continue;
        }
        let before = if i == 0 {
            prefixed
        } else {
            bytes[i - 1] != b'_'
        };
        let after = i + 1 < bytes.len() && bytes[i + 1] != b'_';
        if !before || !after {
            return false;
        }
    }
    true
}

pub(crate) fn parse_float(param: &str) -> Result<f64, RuleError> {
    param
        .parse::<f64>()
        .map_err(|_| RuleError::bad_parameter(param))
}

pub(crate) fn unsupported(value: &crate::input::FieldValue) -> RuleError {
    RuleError::UnsupportedKind(value.kind())
}

/// Register every built-in rule. `required` shares the `nonzero` evaluator.
pub(crate) fn register_builtins(registry: &mut Registry) {
    let nonzero_rule: Arc<dyn Evaluator> = Arc::new(nonzero);
    registry.insert_shared("nonzero", Arc::clone(&nonzero_rule));
    registry.insert_shared("required", nonzero_rule);

    registry.insert("max", max);
    registry.insert("min", min);
    registry.insert("equal", equal);
    registry.insert("date", date);
    registry.insert("time", time);
    registry.insert("email", email);
    registry.insert("len", len);
    registry.insert("minlen", minlen);
    registry.insert("maxlen", maxlen);
    registry.insert("starts", starts);
    registry.insert("ends", ends);
    registry.insert("uppercase", uppercase);
    registry.insert("lowercase", lowercase);
    registry.insert("contain", contain);
    registry.insert("contains", contains);
    registry.insert("letter", letter);
    registry.insert("digit", digit);
    registry.insert("numeric", numeric);
    registry.insert("alphanum", alphanum);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_param_bases() {
        assert_eq!(parse_int("42"), Ok(42));
        assert_eq!(parse_int("-42"), Ok(-42));
        assert_eq!(parse_int("+7"), Ok(7));
        assert_eq!(parse_int("0x1F"), Ok(31));
        assert_eq!(parse_int("0o17"), Ok(15));
        assert_eq!(parse_int("017"), Ok(15));
        assert_eq!(parse_int("0b101"), Ok(5));
        assert_eq!(parse_int("0"), Ok(0));
        assert_eq!(parse_int("1_000"), Ok(1000));
        assert_eq!(parse_int("0x_ff"), Ok(255));
        assert_eq!(parse_int("-9223372036854775808"), Ok(i64::MIN));
    }

    #[test]
    fn int_param_rejects_garbage() {
        for bad in ["", "-", "abc", "1.5", "08", "1__0", "_1", "1_", "--1", "+-1", "0x", "99999999999999999999"] {
            assert_eq!(
                parse_int(bad),
                Err(RuleError::BadParameter(bad.to_string())),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn compose_trims_spaces() {
        assert_eq!(Message::NonZero.compose("", ""), "cannot be empty or zero value");
        assert_eq!(
            Message::StartsWith.compose("Code", "ab|cd"),
            "Code starts with ab|cd"
        );
    }
}
