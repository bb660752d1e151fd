//! Framework/application frame classification.
//!
//! A snapshot starts inside the framework (the code that built the
//! incident) and at some point escapes into the calling application. The
//! first frame outside the framework is the *boundary frame*; reports dump
//! its arguments to make the transition explicit.
//!
//! Classification is a single pass with one boolean cursor,
//! `inside_framework`, starting `true`:
//!
//! ```text
//! frame 0  core/src/exception.rs   Framework
//! frame 1  core/src/model.rs       Framework
//! frame 2  app/handlers/user.rs    Boundary     (cursor flips here)
//! frame 3  core/src/model.rs       Application  (never flips back)
//! ```
//!
//! A frame with an empty file does not move the cursor: missing location
//! information is not evidence of having left the framework.

use std::borrow::Cow;

use crate::Frame;

/// Role of a frame relative to the framework boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// Before the boundary.
    Framework,
    /// The first frame outside the framework. At most one per pass.
    Boundary,
    /// After the boundary.
    Application,
}

/// Decides which frames belong to the framework.
///
/// A frame belongs to the framework when its file contains any of the path
/// markers as a substring, or when its symbol lives in one of the framework
/// modules.
///
/// Markers match both absolute and workspace-relative paths
/// (`"/incident/src/"` matches `crates/incident/src/report.rs`). Path
/// separators are normalized to `/` on both sides, so the same markers work
/// for Windows paths.
///
/// Modules are crate or module paths (`"incident_trace"`). They match
/// `incident_trace::...` and trait impls written `<incident_trace::... as
/// ...>`, and hold wherever the sources were built from (a workspace
/// checkout or the registry's `incident_trace-0.1.0/src/`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameClassifier {
    markers: Vec<String>,
    modules: Vec<String>,
}

impl FrameClassifier {
    pub fn new<S: Into<String>>(markers: impl IntoIterator<Item = S>) -> Self {
        FrameClassifier {
            markers: markers
                .into_iter()
                .map(|marker| normalize_separators(&marker.into()).into_owned())
                .collect(),
            modules: Vec::new(),
        }
    }

    /// Also treat frames whose symbol lives in `modules` as framework frames.
    #[must_use]
    pub fn with_modules<S: Into<String>>(mut self, modules: impl IntoIterator<Item = S>) -> Self {
        self.modules = modules.into_iter().map(Into::into).collect();
        self
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    pub fn is_framework_file(&self, file: &str) -> bool {
        let file = normalize_separators(file);
        self.markers
            .iter()
            .any(|marker| file.contains(marker.as_str()))
    }

    /// Whether `symbol` (a qualified path, optionally `<`-prefixed) lives in
    /// one of the framework modules.
    pub fn is_framework_symbol(&self, symbol: &str) -> bool {
        let symbol = symbol.strip_prefix('<').unwrap_or(symbol);
        self.modules.iter().any(|module| {
            symbol
                .strip_prefix(module.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
        })
    }

    pub fn is_framework_frame(&self, frame: &Frame) -> bool {
        let symbol = frame.class.as_deref().unwrap_or(&frame.function);
        self.is_framework_symbol(symbol) || self.is_framework_file(&frame.file)
    }

    /// Start a classification pass.
    pub fn cursor(&self) -> FrameCursor<'_> {
        FrameCursor {
            classifier: self,
            inside_framework: true,
        }
    }

    /// Classify a whole frame sequence.
    pub fn classify(&self, frames: &[Frame]) -> Classification {
        let mut cursor = self.cursor();
        let boundary = frames
            .iter()
            .map(|frame| cursor.advance(frame))
            .position(|kind| kind == FrameKind::Boundary);
        Classification {
            boundary,
            len: frames.len(),
        }
    }
}

/// One classification pass over frames in trace order.
#[derive(Clone, Debug)]
pub struct FrameCursor<'a> {
    classifier: &'a FrameClassifier,
    inside_framework: bool,
}

impl FrameCursor<'_> {
    /// Classify the next frame and move the cursor.
    pub fn advance(&mut self, frame: &Frame) -> FrameKind {
        if !self.inside_framework {
            return FrameKind::Application;
        }
        if frame.file.is_empty() || self.classifier.is_framework_frame(frame) {
            return FrameKind::Framework;
        }
        self.inside_framework = false;
        FrameKind::Boundary
    }

    pub fn inside_framework(&self) -> bool {
        self.inside_framework
    }
}

fn normalize_separators(path: &str) -> Cow<'_, str> {
    if path.contains('\\') {
        Cow::Owned(path.replace('\\', "/"))
    } else {
        Cow::Borrowed(path)
    }
}

/// Result of classifying a frame sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Classification {
    boundary: Option<usize>,
    len: usize,
}

impl Classification {
    /// Index of the boundary frame, if the trace ever leaves the framework.
    pub fn boundary(&self) -> Option<usize> {
        self.boundary
    }

    /// Kind of the frame at `index`.
    pub fn kind(&self, index: usize) -> FrameKind {
        match self.boundary {
            Some(b) if index == b => FrameKind::Boundary,
            Some(b) if index > b => FrameKind::Application,
            _ => FrameKind::Framework,
        }
    }

    /// Kinds of all frames, in order.
    pub fn kinds(&self) -> impl Iterator<Item = FrameKind> + '_ {
        (0..self.len).map(|index| self.kind(index))
    }
}

#[cfg(test)]
mod tests;
