use super::*;

#[test]
fn test_accessors() {
    assert_eq!(Value::Bool(true).as_bool(), Some(true));
    assert_eq!(Value::Int(42).as_int(), Some(42));
    assert_eq!(Value::Float(1.5).as_float(), Some(1.5));
    assert_eq!(Value::from("Bar").as_str(), Some("Bar"));
    assert_eq!(Value::Int(1).as_str(), None);
    assert_eq!(Value::from("x").as_bool(), None);
}

#[test]
fn test_int_widens_to_float() {
    assert_eq!(Value::Int(3).as_float(), Some(3.0));
}

#[test]
fn test_string_list_from_comma_separated() {
    let value = Value::from("modules, /opt/extra ,,plugins");
    assert_eq!(
        value.to_string_list(),
        vec!["modules".to_string(), "/opt/extra".to_string(), "plugins".to_string()]
    );
}

#[test]
fn test_string_list_from_list() {
    let value = Value::from(vec!["a", "b"]);
    assert_eq!(value.to_string_list(), vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn test_string_list_from_empty_string() {
    assert!(Value::from("").to_string_list().is_empty());
}

#[test]
fn test_string_list_from_scalar() {
    assert_eq!(Value::Int(7).to_string_list(), vec!["7".to_string()]);
}

#[test]
fn test_display() {
    assert_eq!(Value::Bool(false).to_string(), "false");
    assert_eq!(Value::from(vec!["a", "b"]).to_string(), "a,b");
    assert_eq!(Value::from("text").to_string(), "text");
}

#[test]
fn test_kind() {
    assert_eq!(Value::Bool(true).kind(), "bool");
    assert_eq!(Value::Int(0).kind(), "integer");
    assert_eq!(Value::Float(0.0).kind(), "float");
    assert_eq!(Value::from("").kind(), "string");
    assert_eq!(Value::List(vec![]).kind(), "list");
}

#[test]
fn test_untagged_deserialization() {
    let parsed: Value = serde_json::from_str("true").unwrap();
    assert_eq!(parsed, Value::Bool(true));

    let parsed: Value = serde_json::from_str("12").unwrap();
    assert_eq!(parsed, Value::Int(12));

    let parsed: Value = serde_json::from_str("2.5").unwrap();
    assert_eq!(parsed, Value::Float(2.5));

    let parsed: Value = serde_json::from_str("\"EnglishGreeter\"").unwrap();
    assert_eq!(parsed, Value::from("EnglishGreeter"));

    let parsed: Value = serde_json::from_str("[\"a\", \"b\"]").unwrap();
    assert_eq!(parsed, Value::from(vec!["a", "b"]));
}
