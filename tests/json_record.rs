use serde_json::json;
use tagvld::prelude::*;

#[test]
fn rule_set_keeps_document_order() {
    let rules: RuleSet = serde_json::from_str(
        r#"{"zeta": "required", "alpha": "min=1", "mid": "email"}"#,
    )
    .unwrap();
    let fields: Vec<&str> = rules.iter().map(|(field, _)| field).collect();
    assert_eq!(fields, ["zeta", "alpha", "mid"]);
    assert_eq!(rules.get("alpha"), Some("min=1"));
    assert_eq!(rules.len(), 3);
}

#[test]
fn rule_set_round_trips_through_json() {
    let rules = RuleSet::new()
        .rule("name", "required,maxlen=20")
        .rule("age", "min=18");
    let text = serde_json::to_string(&rules).unwrap();
    assert_eq!(text, r#"{"name":"required,maxlen=20","age":"min=18"}"#);
}

#[test]
fn rule_set_replaces_in_place() {
    let rules: RuleSet = [("a", "required"), ("b", "email"), ("a", "min=1")]
        .into_iter()
        .collect();
    let entries: Vec<(&str, &str)> = rules.iter().collect();
    assert_eq!(entries, [("a", "min=1"), ("b", "email")]);
}

#[test]
fn rule_set_rejects_non_string_rules() {
    assert!(serde_json::from_str::<RuleSet>(r#"{"age": 18}"#).is_err());
    assert!(serde_json::from_str::<RuleSet>(r#"["required"]"#).is_err());
}

#[test]
fn validates_json_object() {
    let rules = RuleSet::new()
        .rule("name", "required,minlen=2")
        .rule("email", "email")
        .rule("age", "min=18,max=130")
        .rule("tags", "minlen=1")
        .rule("score", "max=1.0");
    let body = json!({
        "name": "A",
        "email": "a@example.com",
        "age": 17,
        "tags": [],
        "score": 0.75
    });

    let errors = tagvld::validate(&JsonRecord::new(&body, &rules)).unwrap();
    assert_eq!(errors.labels(), ["age", "name", "tags"]);
    assert_eq!(
        errors.get("name").unwrap(),
        ["name length or digit must be more than equal to 2"]
    );
    assert_eq!(
        errors.get("age").unwrap(),
        ["age cannot less than equal to 18"]
    );
}

#[test]
fn missing_fields_only_fail_required() {
    let rules = RuleSet::new()
        .rule("nickname", "maxlen=10")
        .rule("id", "required");
    let body = json!({});
    let errors = tagvld::validate(&JsonRecord::new(&body, &rules)).unwrap();
    assert_eq!(errors.labels(), ["id"]);

    let body = json!({"id": null});
    let errors = tagvld::validate(&JsonRecord::new(&body, &rules)).unwrap();
    assert_eq!(
        errors.get("id").unwrap(),
        ["id cannot be empty or zero value"]
    );
}

#[test]
fn nested_objects_are_opaque_records() {
    let rules = RuleSet::new().rule("address", "required");
    let body = json!({"address": {"city": ""}});
    assert!(tagvld::validate(&JsonRecord::new(&body, &rules))
        .unwrap()
        .is_empty());

    let rules = RuleSet::new().rule("address", "minlen=1");
    assert_eq!(
        tagvld::validate(&JsonRecord::new(&body, &rules)).unwrap_err(),
        Error::Unsupported(Unsupported::Kind {
            field: "address".into(),
            rule: "minlen".into(),
            kind: "record",
        })
    );
}

#[test]
fn non_object_json_is_unsupported() {
    let rules = RuleSet::new().rule("name", "required");
    for (body, kind) in [
        (json!([1, 2]), "array"),
        (json!("text"), "string"),
        (json!(null), "null"),
    ] {
        assert_eq!(
            tagvld::validate(&JsonRecord::new(&body, &rules)).unwrap_err(),
            Error::Unsupported(Unsupported::Shape(kind))
        );
    }
}

#[test]
fn json_booleans_are_unsupported_by_builtins() {
    let rules = RuleSet::new().rule("active", "required");
    let body = json!({"active": true});
    assert!(matches!(
        tagvld::validate(&JsonRecord::new(&body, &rules)),
        Err(Error::Unsupported(Unsupported::Kind { kind: "bool", .. }))
    ));
}
