use unicode_general_category::{get_general_category, GeneralCategory};

use crate::input::FieldValue;

use super::{check, unsupported, Message, Outcome};

/// A string value prepared for the `starts`/`ends`/`contain`/`contains`
/// family.
///
/// The parameter is a `|`-separated list of alternatives. A leading `~`
/// makes the comparison case-insensitive; it is stripped from the
/// parameter echoed in the message.
struct Alternatives<'p> {
    value: String,
    options: Vec<String>,
    shown: &'p str,
}

impl<'p> Alternatives<'p> {
    fn new(value: &str, param: &'p str) -> Self {
        let value = value.trim_matches(' ');
        match param.strip_prefix('~') {
            Some(rest) => Self {
                value: value.to_lowercase(),
                options: rest.to_lowercase().split('|').map(String::from).collect(),
                shown: rest,
            },
            None => Self {
                value: value.to_string(),
                options: param.split('|').map(String::from).collect(),
                shown: param,
            },
        }
    }

    fn any(&self, pred: impl Fn(&str, &str) -> bool) -> bool {
        self.options.iter().any(|opt| pred(&self.value, opt))
    }

    fn all(&self, pred: impl Fn(&str, &str) -> bool) -> bool {
        self.options.iter().all(|opt| pred(&self.value, opt))
    }
}

fn string_rule(
    value: &FieldValue,
    param: &str,
    label: &str,
    message: Message,
    test: impl Fn(&Alternatives<'_>) -> bool,
) -> Outcome {
    match value {
        FieldValue::Str(s) => {
            let alts = Alternatives::new(s, param);
            check(test(&alts), message, label, alts.shown)
        }
        FieldValue::Null => Ok(None),
        _ => Err(unsupported(value)),
    }
}

/// `starts=a|b`: the value starts with any alternative.
pub fn starts(value: &FieldValue, param: &str, label: &str) -> Outcome {
    string_rule(value, param, label, Message::StartsWith, |alts| {
        alts.any(|v, opt| v.starts_with(opt))
    })
}

/// `ends=a|b`: the value ends with any alternative.
pub fn ends(value: &FieldValue, param: &str, label: &str) -> Outcome {
    string_rule(value, param, label, Message::EndsWith, |alts| {
        alts.any(|v, opt| v.ends_with(opt))
    })
}

/// `contain=a|b`: the value contains at least one alternative.
pub fn contain(value: &FieldValue, param: &str, label: &str) -> Outcome {
    string_rule(value, param, label, Message::Contain, |alts| {
        alts.any(|v, opt| v.contains(opt))
    })
}

/// `contains=a|b`: the value contains every alternative.
pub fn contains(value: &FieldValue, param: &str, label: &str) -> Outcome {
    string_rule(value, param, label, Message::Contains, |alts| {
        alts.all(|v, opt| v.contains(opt))
    })
}

/// Character-level predicate over the whole string.
fn char_rule(
    value: &FieldValue,
    param: &str,
    label: &str,
    message: Message,
    trim: bool,
    pred: impl Fn(char) -> bool,
) -> Outcome {
    match value {
        FieldValue::Str(s) => {
            let s = if trim { s.trim_matches(' ') } else { s.as_str() };
            check(s.chars().all(pred), message, label, param)
        }
        FieldValue::Null => Ok(None),
        _ => Err(unsupported(value)),
    }
}

/// True when `map` leaves `c` alone. Characters whose case mapping expands
/// to several characters (`ß` → `SS`) have no single-character mapping and
/// count as unchanged.
fn keeps_case(c: char, mut mapped: impl Iterator<Item = char>) -> bool {
    match (mapped.next(), mapped.next()) {
        (Some(single), None) => single == c,
        _ => true,
    }
}

/// `uppercase`: no character changes when upper-cased.
pub fn uppercase(value: &FieldValue, param: &str, label: &str) -> Outcome {
    match value {
        FieldValue::Str(s) => {
            let valid = s.trim_matches(' ').chars().all(|c| keeps_case(c, c.to_uppercase()));
            check(valid, Message::Upper, label, param)
        }
        FieldValue::Null => Ok(None),
        _ => Err(unsupported(value)),
    }
}

/// `lowercase`: no character changes when lower-cased.
pub fn lowercase(value: &FieldValue, param: &str, label: &str) -> Outcome {
    match value {
        FieldValue::Str(s) => {
            let valid = s.trim_matches(' ').chars().all(|c| keeps_case(c, c.to_lowercase()));
            check(valid, Message::Lower, label, param)
        }
        FieldValue::Null => Ok(None),
        _ => Err(unsupported(value)),
    }
}

/// `letter`: alphabetic characters only, surrounding spaces ignored.
pub fn letter(value: &FieldValue, param: &str, label: &str) -> Outcome {
    char_rule(value, param, label, Message::Letter, true, char::is_alphabetic)
}

/// `digit`: decimal digits (`Nd`) of any script.
pub fn digit(value: &FieldValue, param: &str, label: &str) -> Outcome {
    char_rule(value, param, label, Message::Digit, false, |c| {
        get_general_category(c) == GeneralCategory::DecimalNumber
    })
}

/// `numeric`: any Unicode numeric character (`Nd`, `Nl`, `No`).
pub fn numeric(value: &FieldValue, param: &str, label: &str) -> Outcome {
    char_rule(value, param, label, Message::Numeric, false, char::is_numeric)
}

pub fn alphanum(value: &FieldValue, param: &str, label: &str) -> Outcome {
    char_rule(value, param, label, Message::AlphaNumeric, false, |c| {
        c.is_alphabetic() || c.is_numeric()
    })
}
