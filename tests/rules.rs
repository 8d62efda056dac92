use tagvld::prelude::*;
use tagvld::rules;

fn s(v: &str) -> FieldValue {
    FieldValue::Str(v.to_string())
}

fn pass(outcome: Outcome) {
    assert_eq!(outcome, Ok(None));
}

fn fail(outcome: Outcome) -> String {
    outcome.unwrap().expect("rule should fail")
}

// === nonzero / required ===

#[test]
fn nonzero_per_kind() {
    pass(rules::nonzero(&s("x"), "", "Name"));
    pass(rules::nonzero(&FieldValue::Int(-1), "", "Age"));
    pass(rules::nonzero(&FieldValue::Float(0.5), "", "Score"));
    pass(rules::nonzero(&FieldValue::Seq(vec![s("a")]), "", "Tags"));
    pass(rules::nonzero(&FieldValue::Record, "", "Address"));

    assert_eq!(
        fail(rules::nonzero(&s(""), "", "Name")),
        "Name cannot be empty or zero value"
    );
    fail(rules::nonzero(&FieldValue::Int(0), "", "Age"));
    fail(rules::nonzero(&FieldValue::Float(0.0), "", "Score"));
    fail(rules::nonzero(&FieldValue::Seq(vec![]), "", "Tags"));
    fail(rules::nonzero(&FieldValue::Null, "", "Nick"));
}

#[test]
fn nonzero_rejects_bool() {
    assert_eq!(
        rules::nonzero(&FieldValue::Bool(true), "", "Flag"),
        Err(RuleError::UnsupportedKind("bool"))
    );
}

// === max / min ===

#[test]
fn max_int_and_float() {
    pass(rules::max(&FieldValue::Int(10), "10", "Age"));
    pass(rules::max(&FieldValue::Int(-3), "0", "Age"));
    assert_eq!(
        fail(rules::max(&FieldValue::Int(11), "10", "Age")),
        "Age cannot be more than equal to 10"
    );
    pass(rules::max(&FieldValue::Float(1.5), "1.5", "Ratio"));
    fail(rules::max(&FieldValue::Float(1.51), "1.5", "Ratio"));
}

#[test]
fn min_int_and_float() {
    pass(rules::min(&FieldValue::Int(18), "18", "Age"));
    assert_eq!(
        fail(rules::min(&FieldValue::Int(17), "18", "Age")),
        "Age cannot less than equal to 18"
    );
    pass(rules::min(&FieldValue::Float(0.0), "-0.5", "Delta"));
    fail(rules::min(&FieldValue::Float(-1.0), "-0.5", "Delta"));
}

#[test]
fn min_max_accept_based_integers() {
    pass(rules::max(&FieldValue::Int(255), "0xff", "Byte"));
    fail(rules::max(&FieldValue::Int(256), "0xff", "Byte"));
    pass(rules::min(&FieldValue::Int(8), "010", "Octal"));
}

#[test]
fn min_max_bad_parameter() {
    assert_eq!(
        rules::max(&FieldValue::Int(1), "ten", "Age"),
        Err(RuleError::BadParameter("ten".into()))
    );
    assert_eq!(
        rules::min(&FieldValue::Int(1), "1.5", "Age"),
        Err(RuleError::BadParameter("1.5".into()))
    );
    assert_eq!(
        rules::min(&FieldValue::Float(1.0), "", "Ratio"),
        Err(RuleError::BadParameter("".into()))
    );
}

#[test]
fn min_max_reject_strings() {
    assert_eq!(
        rules::max(&s("abc"), "10", "Name"),
        Err(RuleError::UnsupportedKind("string"))
    );
    assert_eq!(
        rules::min(&FieldValue::Seq(vec![]), "1", "Tags"),
        Err(RuleError::UnsupportedKind("sequence"))
    );
}

// === len / minlen / maxlen ===

#[test]
fn len_counts_characters() {
    pass(rules::len(&s("héllo"), "5", "Word"));
    assert_eq!(
        fail(rules::len(&s("hello"), "4", "Word")),
        "Word length or digit must be equal to 4"
    );
    pass(rules::len(&s(""), "0", "Word"));
}

#[test]
fn len_counts_sequence_elements() {
    let tags = FieldValue::Seq(vec![s("a"), s("b"), s("c")]);
    pass(rules::len(&tags, "3", "Tags"));
    fail(rules::len(&tags, "2", "Tags"));
    pass(rules::minlen(&tags, "3", "Tags"));
    fail(rules::minlen(&tags, "4", "Tags"));
    pass(rules::maxlen(&tags, "3", "Tags"));
    fail(rules::maxlen(&tags, "2", "Tags"));
}

#[test]
fn len_counts_integer_digits() {
    pass(rules::len(&FieldValue::Int(12345), "5", "Zip"));
    fail(rules::len(&FieldValue::Int(12345), "4", "Zip"));
    fail(rules::len(&FieldValue::Int(12345), "6", "Zip"));
    pass(rules::len(&FieldValue::Int(7), "1", "Digit"));
}

#[test]
fn len_integer_edge_cases() {
    // Zero has no leading nonzero digit.
    fail(rules::len(&FieldValue::Int(0), "1", "N"));
    // Truncating division keeps negative quotients negative.
    fail(rules::len(&FieldValue::Int(-15), "2", "N"));
    // 10^19 does not fit an i64.
    fail(rules::len(&FieldValue::Int(i64::MAX), "20", "N"));
    pass(rules::len(&FieldValue::Int(i64::MAX), "19", "N"));
}

#[test]
fn minlen_integer_digits() {
    pass(rules::minlen(&FieldValue::Int(100), "3", "Code"));
    pass(rules::minlen(&FieldValue::Int(123456), "3", "Code"));
    assert_eq!(
        fail(rules::minlen(&FieldValue::Int(99), "3", "Code")),
        "Code length or digit must be more than equal to 3"
    );
}

#[test]
fn maxlen_integer_digits() {
    pass(rules::maxlen(&FieldValue::Int(5), "2", "Code"));
    pass(rules::maxlen(&FieldValue::Int(15), "2", "Code"));
    // The quotient must be 0 or 1.
    fail(rules::maxlen(&FieldValue::Int(99), "2", "Code"));
    assert_eq!(
        fail(rules::maxlen(&FieldValue::Int(150), "2", "Code")),
        "Code length or digit must be less than equal to 2"
    );
    fail(rules::maxlen(&FieldValue::Int(-5), "1", "Code"));
}

#[test]
fn len_strings_min_max() {
    pass(rules::minlen(&s("abc"), "3", "Name"));
    fail(rules::minlen(&s("ab"), "3", "Name"));
    pass(rules::maxlen(&s("abc"), "3", "Name"));
    fail(rules::maxlen(&s("abcd"), "3", "Name"));
}

#[test]
fn len_errors() {
    assert_eq!(
        rules::len(&FieldValue::Float(1.0), "1", "F"),
        Err(RuleError::UnsupportedKind("float"))
    );
    assert_eq!(
        rules::len(&FieldValue::Int(5), "0", "N"),
        Err(RuleError::BadParameter("0".into()))
    );
    assert_eq!(
        rules::minlen(&s("abc"), "x", "N"),
        Err(RuleError::BadParameter("x".into()))
    );
    // Kind is checked before the parameter.
    assert_eq!(
        rules::maxlen(&FieldValue::Bool(false), "x", "N"),
        Err(RuleError::UnsupportedKind("bool"))
    );
}

// === equal ===

#[test]
fn equal_per_kind() {
    pass(rules::equal(&s("yes"), "yes", "Answer"));
    assert_eq!(
        fail(rules::equal(&s("Yes"), "yes", "Answer")),
        "Answer must be equal to yes"
    );
    pass(rules::equal(&FieldValue::Int(16), "0x10", "N"));
    fail(rules::equal(&FieldValue::Int(15), "16", "N"));
    pass(rules::equal(&FieldValue::Float(1.1), "1.1", "F"));
    pass(rules::equal(&1.1f32.to_field_value(), "1.1", "F"));
    assert_eq!(
        rules::equal(&FieldValue::Seq(vec![]), "1", "Tags"),
        Err(RuleError::UnsupportedKind("sequence"))
    );
}

// === date / time / email ===

#[test]
fn date_format() {
    pass(rules::date(&s("2023-02-28"), "", "Birth"));
    assert_eq!(
        fail(rules::date(&s("2023-02-30"), "", "Birth")),
        "Birth format is invalid"
    );
    fail(rules::date(&s("28-02-2023"), "", "Birth"));
    fail(rules::date(&s("2023-02-28T00:00"), "", "Birth"));
    fail(rules::date(&s("0001-01-01"), "", "Birth"));
    assert_eq!(
        rules::date(&FieldValue::Int(20230228), "", "Birth"),
        Err(RuleError::UnsupportedKind("int"))
    );
}

#[test]
fn time_format() {
    pass(rules::time(&s("08:30"), "", "Start"));
    pass(rules::time(&s("23:59:59"), "", "Start"));
    fail(rules::time(&s("00:00:00"), "", "Start"));
    fail(rules::time(&s("25:00"), "", "Start"));
    fail(rules::time(&s("8:30"), "", "Start"));
    fail(rules::time(&s("08:30:0"), "", "Start"));
}

#[test]
fn email_format() {
    pass(rules::email(&s("test@example.com"), "", "Email"));
    pass(rules::email(&s("user+tag@sub.example.co.uk"), "", "Email"));
    pass(rules::email(&s("localhost@host"), "", "Email"));
    fail(rules::email(&s("not-an-email"), "", "Email"));
    fail(rules::email(&s("@no-local.com"), "", "Email"));
    fail(rules::email(&s("no-domain@"), "", "Email"));
    fail(rules::email(&s("spaces @example.com"), "", "Email"));
    fail(rules::email(&s("a@-bad.com"), "", "Email"));
}

// === starts / ends / contain / contains ===

#[test]
fn starts_case_insensitive() {
    pass(rules::starts(&s("HELLO world"), "~hello", "Greeting"));
    assert_eq!(
        fail(rules::starts(&s("HELLO world"), "hello", "Greeting")),
        "Greeting starts with hello"
    );
    // The `~` is not echoed.
    assert_eq!(
        fail(rules::starts(&s("bye"), "~Hello", "Greeting")),
        "Greeting starts with Hello"
    );
}

#[test]
fn starts_alternatives_and_trim() {
    pass(rules::starts(&s("  https://x"), "http://|https://", "Url"));
    fail(rules::starts(&s("ftp://x"), "http://|https://", "Url"));
}

#[test]
fn ends_alternatives() {
    pass(rules::ends(&s("me@x.COM"), "~.com|.org", "Email"));
    pass(rules::ends(&s("me@x.org "), ".com|.org", "Email"));
    assert_eq!(
        fail(rules::ends(&s("me@x.net"), ".com|.org", "Email")),
        "Email ends with .com|.org"
    );
}

#[test]
fn contain_any_vs_contains_all() {
    pass(rules::contain(&s("xby"), "a|b", "Text"));
    assert_eq!(
        fail(rules::contains(&s("xby"), "a|b", "Text")),
        "Text must be contains all of a|b"
    );
    pass(rules::contains(&s("xaby"), "a|b", "Text"));
    assert_eq!(
        fail(rules::contain(&s("xyz"), "a|b", "Text")),
        "Text must be contains at least one of a|b"
    );
    pass(rules::contains(&s("Alpha BETA"), "~alpha|beta", "Text"));
    fail(rules::contains(&s("Alpha BETA"), "alpha|beta", "Text"));
}

#[test]
fn string_predicates_reject_numbers() {
    for rule in [rules::starts, rules::ends, rules::contain, rules::contains] {
        assert_eq!(
            rule(&FieldValue::Int(1), "1", "N"),
            Err(RuleError::UnsupportedKind("int"))
        );
    }
}

// === case and character classes ===

#[test]
fn case_rules() {
    pass(rules::uppercase(&s(" ABC 1 "), "", "Code"));
    assert_eq!(
        fail(rules::uppercase(&s("Abc"), "", "Code")),
        "Code must be upper case"
    );
    pass(rules::lowercase(&s("abc-1"), "", "Slug"));
    assert_eq!(
        fail(rules::lowercase(&s("abC"), "", "Slug")),
        "Slug must be lower case"
    );
}

#[test]
fn case_rules_compare_character_by_character() {
    // `ß` has no single-character upper case form.
    pass(rules::uppercase(&s("STRAßE"), "", "Street"));
    pass(rules::lowercase(&s("straße"), "", "Street"));
    assert_eq!(
        fail(rules::uppercase(&s("Straße"), "", "Street")),
        "Street must be upper case"
    );
    pass(rules::uppercase(&s("ÀÉÎ"), "", "Street"));
    fail(rules::lowercase(&s("àÉî"), "", "Street"));
}

#[test]
fn character_classes() {
    pass(rules::letter(&s("  Ünïcode  "), "", "Name"));
    assert_eq!(
        fail(rules::letter(&s("ab c"), "", "Name")),
        "Name must be letter"
    );
    pass(rules::digit(&s("0123"), "", "Pin"));
    assert_eq!(fail(rules::digit(&s("12a"), "", "Pin")), "Pin must be digit");
    fail(rules::digit(&s(" 12"), "", "Pin"));
    pass(rules::digit(&s("١٢٣"), "", "Pin"));
    pass(rules::digit(&s("०९"), "", "Pin"));
    fail(rules::digit(&s("½"), "", "Pin"));
    pass(rules::numeric(&s("½"), "", "Amount"));
    pass(rules::numeric(&s("١٢½"), "", "Amount"));
    assert_eq!(
        fail(rules::numeric(&s("1.5"), "", "Amount")),
        "Amount must be numeric"
    );
    pass(rules::alphanum(&s("abc123"), "", "Handle"));
    assert_eq!(
        fail(rules::alphanum(&s("abc-123"), "", "Handle")),
        "Handle must be alphanumeric"
    );
}

#[test]
fn empty_string_passes_character_classes() {
    for rule in [rules::letter, rules::digit, rules::numeric, rules::alphanum] {
        pass(rule(&s(""), "", "X"));
    }
}

// === absent values ===

#[test]
fn null_only_fails_nonzero() {
    let checks: [(fn(&FieldValue, &str, &str) -> Outcome, &str); 8] = [
        (rules::max, "1"),
        (rules::min, "1"),
        (rules::len, "1"),
        (rules::equal, "x"),
        (rules::date, ""),
        (rules::email, ""),
        (rules::starts, "a"),
        (rules::letter, ""),
    ];
    for (rule, param) in checks {
        pass(rule(&FieldValue::Null, param, "Opt"));
    }
    fail(rules::nonzero(&FieldValue::Null, "", "Opt"));
}
