use super::*;
use crate::{Nameable, Object};
use pretty_assertions::assert_eq;

struct Repository {
    name: String,
}

impl Object for Repository {
    fn type_name(&self) -> &str {
        "Repository"
    }

    fn as_nameable(&self) -> Option<&dyn Nameable> {
        Some(self)
    }
}

impl Nameable for Repository {
    fn display_name(&self) -> &str {
        &self.name
    }
}

struct Anonymous;

impl Object for Anonymous {
    fn type_name(&self) -> &str {
        "Anonymous"
    }
}

fn render(value: &Value) -> String {
    ValueSerializer::default().to_string(value)
}

// Scalars

#[test]
fn null_is_stable_literal() {
    assert_eq!(render(&Value::Null), "null");
    assert_eq!(render(&Value::Null), render(&Value::Null));
}

#[test]
fn scalars_encode_as_json() {
    assert_eq!(render(&Value::Bool(false)), "false");
    assert_eq!(render(&Value::Int(-12)), "-12");
    assert_eq!(render(&Value::Float(2.5)), "2.5");
    assert_eq!(render(&Value::string("say \"hi\"")), r#""say \"hi\"""#);
}

#[test]
fn collections_encode_in_order() {
    let value = Value::map([
        ("id", Value::Int(4)),
        ("tags", Value::list(["a", "b"])),
    ]);
    assert_eq!(render(&value), r#"{"id":4,"tags":["a","b"]}"#);
}

// Opaque values

#[test]
fn callable_is_placeholder() {
    let secret = "do-not-print";
    let value = Value::callable(move |_| Value::string(secret));
    assert_eq!(render(&value), CALLABLE_PLACEHOLDER);
}

#[test]
fn nameable_object_shows_type_and_name() {
    let value = Value::object(Repository {
        name: "users".to_string(),
    });
    assert_eq!(render(&value), "Repository (users)");
}

#[test]
fn plain_object_shows_type_only() {
    assert_eq!(render(&Value::object(Anonymous)), "Object Anonymous");
}

#[test]
fn nested_opaque_values_encode_as_labels() {
    let value = Value::list([Value::object(Anonymous), Value::callable(|_| Value::Null)]);
    assert_eq!(render(&value), r#"["Object Anonymous","Closure"]"#);
}

// Fallbacks

#[test]
fn handle_falls_back_to_placeholder() {
    assert_eq!(render(&Value::handle("stream", 7)), UNENCODABLE);
}

#[test]
fn non_finite_float_falls_back_to_placeholder() {
    assert_eq!(render(&Value::Float(f64::NAN)), UNENCODABLE);
    assert_eq!(render(&Value::Float(f64::INFINITY)), UNENCODABLE);
}

#[test]
fn nested_handle_poisons_whole_value() {
    let value = Value::map([("fd", Value::handle("file", 1))]);
    assert_eq!(render(&value), UNENCODABLE);
}

#[test]
fn excessive_nesting_falls_back_to_placeholder() {
    let mut value = Value::Int(0);
    for _ in 0..=MAX_ENCODE_DEPTH + 1 {
        value = Value::List(vec![value]);
    }
    assert_eq!(render(&value), UNENCODABLE);
}

#[test]
fn nesting_at_limit_still_encodes() {
    let mut value = Value::Int(0);
    for _ in 0..MAX_ENCODE_DEPTH {
        value = Value::List(vec![value]);
    }
    assert!(render(&value).starts_with("[["));
}

// Bounds

#[test]
fn long_output_is_truncated() {
    let serializer = ValueSerializer::new(5);
    assert_eq!(serializer.to_string(&Value::string("abcdefgh")), "\"abcd...");
}

#[test]
fn truncation_respects_char_boundaries() {
    let serializer = ValueSerializer::new(3);
    assert_eq!(serializer.to_string(&Value::string("ééééé")), "\"éé...");
}

#[test]
fn short_output_is_untouched() {
    let serializer = ValueSerializer::new(8);
    assert_eq!(serializer.to_string(&Value::Int(123)), "123");
}

#[test]
fn unbounded_never_truncates() {
    let long = "x".repeat(DEFAULT_MAX_LEN * 2);
    let text = ValueSerializer::unbounded().to_string(&Value::string(long.clone()));
    assert_eq!(text.len(), long.len() + 2);
    assert_eq!(ValueSerializer::unbounded().max_len(), 0);
}

// Messages

#[test]
fn message_takes_strings_verbatim() {
    let serializer = ValueSerializer::default();
    assert_eq!(serializer.to_message(&Value::string("boom")), "boom");
    assert_eq!(serializer.to_message(&Value::Null), "");
    assert_eq!(serializer.to_message(&Value::Int(5)), "5");
}
