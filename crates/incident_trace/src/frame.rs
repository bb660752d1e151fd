//! Captured call frames and the immutable snapshot that holds them.

use std::fmt;

use incident_value::{Object, Value};

/// A single captured call.
///
/// Every field except `function` may be missing: native capture depends on
/// debug info, and instrumented frames carry only what the caller supplied.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    /// Source file, empty if unavailable.
    pub file: String,
    /// Source line, if known.
    pub line: Option<u32>,
    /// Function or method name.
    pub function: String,
    /// Enclosing type or module path, for calls made inside one.
    pub class: Option<String>,
    /// Display name of the call's receiver.
    pub receiver_name: Option<String>,
    /// Raw argument values. Only instrumented frames carry them.
    pub arguments: Vec<Value>,
}

impl Frame {
    pub fn new(function: impl Into<String>) -> Self {
        Frame {
            function: function.into(),
            ..Frame::default()
        }
    }

    /// Set the source location.
    #[must_use]
    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = file.into();
        self.line = Some(line);
        self
    }

    /// Set the source file without a line.
    #[must_use]
    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    #[must_use]
    pub fn in_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Record the receiver of the call by its label (display name when
    /// nameable, type name otherwise).
    #[must_use]
    pub fn with_receiver(mut self, receiver: &dyn Object) -> Self {
        self.receiver_name = Some(receiver.receiver_label().to_string());
        self
    }

    #[must_use]
    pub fn with_receiver_name(mut self, name: impl Into<String>) -> Self {
        self.receiver_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_arguments<T: Into<Value>>(mut self, args: impl IntoIterator<Item = T>) -> Self {
        self.arguments = args.into_iter().map(Into::into).collect();
        self
    }

    /// `Class::function`, or just `function` outside any class.
    pub fn qualified_name(&self) -> String {
        match &self.class {
            Some(class) => format!("{class}::{}", self.function),
            None => self.function.clone(),
        }
    }
}

/// Immutable snapshot of the call stack, innermost frame first.
///
/// Produced once by a [`FrameSource`](crate::FrameSource) and never
/// modified afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Backtrace {
    frames: Vec<Frame>,
}

impl Backtrace {
    pub fn new(frames: Vec<Frame>) -> Self {
        Backtrace { frames }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }
}

impl<'a> IntoIterator for &'a Backtrace {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

impl fmt::Display for Backtrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "stack backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            write!(f, "  {i}: {}", frame.qualified_name())?;
            if !frame.file.is_empty() {
                write!(f, " at {}", frame.file)?;
                if let Some(line) = frame.line {
                    write!(f, ":{line}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
