//! Explicitly instrumented call stack.
//!
//! Native frames know nothing about receivers or argument values. Hosts that
//! want those in their reports push a [`Frame`] on entry to each call of
//! interest and pop it on return; the stack then serves as the snapshot
//! source.
//!
//! ```text
//! let mut stack = CallStack::new();
//! stack.push(Frame::new("save").in_class("Model").with_arguments([id]));
//! // ... the call fails ...
//! let err = Exception::capture_with("save failed", 0, None, &stack);
//! stack.pop();
//! ```

use crate::{Backtrace, Frame};

use super::FrameSource;

/// Live stack of instrumented calls, outermost first.
#[derive(Clone, Debug, Default)]
pub struct CallStack {
    frames: Vec<Frame>,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack::default()
    }

    /// Enter a call.
    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Leave the most recent call.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if the stack is empty. In release mode,
    /// this is a no-op on an empty stack.
    pub fn pop(&mut self) -> Option<Frame> {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop()
    }

    /// Run `f` with `frame` pushed, popping it afterwards.
    pub fn with_frame<R>(&mut self, frame: Frame, f: impl FnOnce(&mut Self) -> R) -> R {
        let depth = self.frames.len();
        self.frames.push(frame);
        let result = f(self);
        self.frames.truncate(depth);
        result
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The most recent call, if any.
    #[inline]
    pub fn current_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl FrameSource for CallStack {
    fn capture(&self) -> Backtrace {
        // Most recent call first
        let frames: Vec<Frame> = self.frames.iter().rev().cloned().collect();
        tracing::trace!(frames = frames.len(), "captured instrumented stack");
        Backtrace::new(frames)
    }
}
