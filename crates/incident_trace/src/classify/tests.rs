use super::*;
use pretty_assertions::assert_eq;

fn classifier() -> FrameClassifier {
    FrameClassifier::new(["/core/src/", "/data/src/"])
}

fn frame_in(file: &str) -> Frame {
    Frame::new("call").in_file(file)
}

#[test]
fn boundary_is_first_frame_outside_framework() {
    let frames = vec![
        frame_in("/vendor/core/src/exception.rs"),
        frame_in("/vendor/data/src/model.rs"),
        frame_in("/vendor/core/src/app.rs"),
        frame_in("/srv/app/handlers/user.rs"),
        frame_in("/srv/app/main.rs"),
        frame_in("/vendor/core/src/run.rs"),
    ];
    let classification = classifier().classify(&frames);

    assert_eq!(classification.boundary(), Some(3));
    let kinds: Vec<_> = classification.kinds().collect();
    assert_eq!(
        kinds,
        vec![
            FrameKind::Framework,
            FrameKind::Framework,
            FrameKind::Framework,
            FrameKind::Boundary,
            FrameKind::Application,
            FrameKind::Application,
        ]
    );
}

#[test]
fn exactly_one_boundary() {
    let frames = vec![
        frame_in("/app/a.rs"),
        frame_in("/app/b.rs"),
        frame_in("/app/c.rs"),
    ];
    let classification = classifier().classify(&frames);
    let boundaries = classification
        .kinds()
        .filter(|kind| *kind == FrameKind::Boundary)
        .count();
    assert_eq!(boundaries, 1);
    assert_eq!(classification.boundary(), Some(0));
}

#[test]
fn all_framework_has_no_boundary() {
    let frames = vec![frame_in("/x/core/src/a.rs"), frame_in("/x/data/src/b.rs")];
    let classification = classifier().classify(&frames);
    assert_eq!(classification.boundary(), None);
    assert!(classification
        .kinds()
        .all(|kind| kind == FrameKind::Framework));
}

#[test]
fn empty_file_does_not_move_cursor() {
    let frames = vec![
        frame_in("/x/core/src/a.rs"),
        Frame::new("unknown"),
        frame_in("/app/main.rs"),
    ];
    assert_eq!(classifier().classify(&frames).boundary(), Some(2));
}

#[test]
fn empty_trace() {
    let classification = classifier().classify(&[]);
    assert_eq!(classification.boundary(), None);
    assert_eq!(classification.kinds().count(), 0);
}

#[test]
fn cursor_stays_outside_after_boundary() {
    let classifier = classifier();
    let mut cursor = classifier.cursor();
    assert!(cursor.inside_framework());
    assert_eq!(cursor.advance(&frame_in("/app/a.rs")), FrameKind::Boundary);
    assert!(!cursor.inside_framework());
    assert_eq!(
        cursor.advance(&frame_in("/x/core/src/a.rs")),
        FrameKind::Application
    );
    assert_eq!(cursor.advance(&frame_in("/app/b.rs")), FrameKind::Application);
}

#[test]
fn markers_match_relative_paths() {
    let classifier = FrameClassifier::new(["/incident/src/"]);
    assert!(classifier.is_framework_file("crates/incident/src/report.rs"));
    assert!(!classifier.is_framework_file("src/main.rs"));
    assert_eq!(classifier.markers(), ["/incident/src/".to_string()]);
}

#[test]
fn no_markers_means_first_located_frame_is_boundary() {
    let classifier = FrameClassifier::default();
    let frames = vec![Frame::new("a"), frame_in("/x/core/src/a.rs")];
    assert_eq!(classifier.classify(&frames).boundary(), Some(1));
}

fn crate_classifier() -> FrameClassifier {
    FrameClassifier::new(["/incident/src/", "/incident_trace/src/"])
        .with_modules(["incident", "incident_trace"])
}

#[test]
fn registry_sources_are_framework_by_module() {
    let registry = "/home/u/.cargo/registry/src/index.crates.io-6f17d22bba15001f";
    let frames = vec![
        Frame::new("capture")
            .in_class("<incident_trace::capture::native::NativeFrames as incident_trace::capture::FrameSource>")
            .at(format!("{registry}/incident_trace-0.1.0/src/capture/native.rs"), 26),
        Frame::new("capture_with")
            .in_class("incident::exception::Exception")
            .at(format!("{registry}/incident-0.1.0/src/exception.rs"), 179),
        Frame::new("new")
            .in_class("incident::exception::Exception")
            .at(format!("{registry}/incident-0.1.0/src/exception.rs"), 168),
        Frame::new("main").in_class("app").at("/srv/app/src/main.rs", 4),
    ];
    let classification = crate_classifier().classify(&frames);
    assert_eq!(classification.boundary(), Some(3));
    assert_eq!(classification.kind(0), FrameKind::Framework);
}

#[test]
fn windows_paths_match_markers() {
    let classifier = crate_classifier();
    assert!(classifier.is_framework_file(r"C:\work\crates\incident\src\exception.rs"));
    assert!(!classifier.is_framework_file(r"C:\work\app\src\main.rs"));

    let backslash = FrameClassifier::new([r"\core\src\"]);
    assert!(backslash.is_framework_file("/vendor/core/src/app.rs"));
    assert_eq!(backslash.markers(), ["/core/src/".to_string()]);
}

#[test]
fn module_match_requires_path_boundary() {
    let classifier = crate_classifier();
    assert!(classifier.is_framework_symbol("incident::init_tracing"));
    assert!(classifier.is_framework_symbol("incident"));
    assert!(classifier.is_framework_symbol("<incident_trace::CallStack as core::fmt::Debug>"));
    assert!(!classifier.is_framework_symbol("incident_app::run"));
    assert!(!classifier.is_framework_symbol("app::incident::run"));
}

#[test]
fn framework_symbol_without_file_stays_framework() {
    let frames = vec![
        Frame::new("capture_with").in_class("incident::exception::Exception"),
        Frame::new("handler").in_class("app").in_file("src/handler.rs"),
    ];
    assert_eq!(crate_classifier().classify(&frames).boundary(), Some(1));
}
