use super::*;
use pretty_assertions::assert_eq;

struct Widget;

impl Object for Widget {
    fn type_name(&self) -> &str {
        "Widget"
    }
}

#[test]
fn builder_sets_fields() {
    let frame = Frame::new("save")
        .at("src/model.rs", 42)
        .in_class("Model")
        .with_receiver_name("users")
        .with_arguments([1, 2]);

    assert_eq!(frame.file, "src/model.rs");
    assert_eq!(frame.line, Some(42));
    assert_eq!(frame.class.as_deref(), Some("Model"));
    assert_eq!(frame.receiver_name.as_deref(), Some("users"));
    assert_eq!(frame.arguments, vec![Value::Int(1), Value::Int(2)]);
}

#[test]
fn receiver_without_name_uses_type_name() {
    let frame = Frame::new("render").with_receiver(&Widget);
    assert_eq!(frame.receiver_name.as_deref(), Some("Widget"));
}

#[test]
fn in_file_leaves_line_unset() {
    let frame = Frame::new("main").in_file("src/main.rs");
    assert_eq!(frame.file, "src/main.rs");
    assert_eq!(frame.line, None);
}

#[test]
fn qualified_name() {
    assert_eq!(Frame::new("run").qualified_name(), "run");
    assert_eq!(Frame::new("run").in_class("App").qualified_name(), "App::run");
}

#[test]
fn empty_backtrace_displays_nothing() {
    let bt = Backtrace::default();
    assert!(bt.is_empty());
    assert_eq!(bt.to_string(), "");
}

#[test]
fn backtrace_display_lists_frames_in_order() {
    let bt = Backtrace::new(vec![
        Frame::new("inner").at("src/a.rs", 3),
        Frame::new("outer").in_class("App"),
    ]);
    assert_eq!(bt.len(), 2);
    assert_eq!(
        bt.to_string(),
        "stack backtrace:\n  0: inner at src/a.rs:3\n  1: App::outer\n"
    );
}

#[test]
fn iteration_matches_frames() {
    let bt = Backtrace::new(vec![Frame::new("a"), Frame::new("b")]);
    let names: Vec<_> = bt.iter().map(|f| f.function.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!((&bt).into_iter().count(), bt.frames().len());
}
