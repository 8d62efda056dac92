use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveTime, Timelike};
use regex_lite::Regex;

use crate::input::FieldValue;

use super::{check, unsupported, Message, Outcome};

const DATE_PATTERN: &str = r"\d{4}-\d{2}-\d{2}";
const SHORT_TIME_PATTERN: &str = r"\d{2}:\d{2}";
const LONG_TIME_PATTERN: &str = r"\d{2}:\d{2}:\d{2}";
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";

fn compiled(cell: &'static OnceLock<Regex>, pattern: &'static str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("built-in pattern compiles"))
}

fn date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, DATE_PATTERN)
}

fn short_time_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, SHORT_TIME_PATTERN)
}

fn long_time_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, LONG_TIME_PATTERN)
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, EMAIL_PATTERN)
}

fn is_valid_date(s: &str) -> bool {
    if s.len() != 10 || !date_regex().is_match(s) {
        return false;
    }
    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        // 0001-01-01 is the zero date.
        Ok(date) => date.format("%Y-%m-%d").to_string() != "0001-01-01",
        Err(_) => false,
    }
}

fn is_valid_time(s: &str) -> bool {
    let layout = match s.len() {
        5 if short_time_regex().is_match(s) => "%H:%M",
        8 if long_time_regex().is_match(s) => "%H:%M:%S",
        _ => return false,
    };
    match NaiveTime::parse_from_str(s, layout) {
        // Midnight is the zero time; nanoseconds past 1e9 encode a leap second.
        Ok(t) => t.num_seconds_from_midnight() != 0 && t.nanosecond() < 1_000_000_000,
        Err(_) => false,
    }
}

/// `date`: a real calendar date written `YYYY-MM-DD`.
pub fn date(value: &FieldValue, param: &str, label: &str) -> Outcome {
    match value {
        FieldValue::Str(s) => check(is_valid_date(s), Message::InvalidFormat, label, param),
        FieldValue::Null => Ok(None),
        _ => Err(unsupported(value)),
    }
}

/// `time`: `HH:MM` or `HH:MM:SS`, other than midnight.
pub fn time(value: &FieldValue, param: &str, label: &str) -> Outcome {
    match value {
        FieldValue::Str(s) => check(is_valid_time(s), Message::InvalidFormat, label, param),
        FieldValue::Null => Ok(None),
        _ => Err(unsupported(value)),
    }
}

/// `email`: `local@domain` with an RFC 5322 style local part.
pub fn email(value: &FieldValue, param: &str, label: &str) -> Outcome {
    match value {
        FieldValue::Str(s) => check(email_regex().is_match(s), Message::InvalidFormat, label, param),
        FieldValue::Null => Ok(None),
        _ => Err(unsupported(value)),
    }
}
