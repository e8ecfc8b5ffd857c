//! Integration tests for the prelude module.
//!
//! Verifies that `use telephone_validator::prelude::*` covers a typical
//! argument declaration end to end.

use pretty_assertions::assert_eq;
use serde_json::json;
use telephone_validator::prelude::*;

#[test]
fn prelude_provides_rules_and_errors() {
    let username = RuleSet::new()
        .rule(ValidationRule::presence())
        .rule(ValidationRule::length(Some(3), Some(20)))
        .rule(ValidationRule::exclusion([json!("admin"), json!("root")]));

    let mut errors = ValidationErrors::new();
    username.validate_field("username", Some(&json!("alice")), &mut errors);
    assert!(errors.is_empty());

    username.validate_field("username", Some(&json!("admin")), &mut errors);
    username.validate_field("username", Some(&json!("al")), &mut errors);
    assert_eq!(
        errors.full_messages(),
        vec![
            "username is reserved",
            "username is too short (minimum is 3 characters)",
        ]
    );
}

#[test]
fn validate_trait_is_usable_directly() {
    let rule = ValidationRule::between(1.0, 65535.0);
    assert!(rule.is_valid(&json!(8080)));
    assert!(!rule.is_valid(&json!(0)));
    assert!(is_blank(&json!("   ")));
}

#[test]
fn rule_sets_load_from_json_schemas() {
    let schema = json!({
        "rules": [
            {"rule": "presence", "message": "is required"},
            {"rule": "numericality", "only_integer": true, "greater_than": 0.0}
        ]
    });
    let rules: RuleSet = serde_json::from_value(schema).unwrap();

    let mut errors = ValidationErrors::new();
    rules.validate_field("quantity", None, &mut errors);

    let messages: Vec<String> = errors.full_messages();
    assert_eq!(
        messages,
        vec!["quantity is required", "quantity is not a number"]
    );

    let mut errors = ValidationErrors::new();
    rules.validate_field("quantity", Some(&json!(0)), &mut errors);
    assert_eq!(errors.errors()[0].code, "greater_than");
    assert_eq!(errors.errors()[0].message, "must be greater than 0");
}
