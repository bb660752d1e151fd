//! Frame sources: where snapshots come from.
//!
//! A [`FrameSource`] is queried exactly once per incident, at construction.
//! Sources treat partial information as normal and never fail.

mod call_stack;
mod native;

pub use call_stack::CallStack;
pub use native::{NativeFrames, UNKNOWN_FUNCTION};

use crate::{Backtrace, Frame};

/// Produces a snapshot of the call stack at the current point of execution.
pub trait FrameSource {
    /// Capture the frames, innermost first.
    fn capture(&self) -> Backtrace;
}

/// Synthetic traces: the frames are replayed as given.
impl FrameSource for [Frame] {
    fn capture(&self) -> Backtrace {
        Backtrace::new(self.to_vec())
    }
}

impl<const N: usize> FrameSource for [Frame; N] {
    fn capture(&self) -> Backtrace {
        self.as_slice().capture()
    }
}

impl FrameSource for Vec<Frame> {
    fn capture(&self) -> Backtrace {
        self.as_slice().capture()
    }
}

/// Replays an existing snapshot.
impl FrameSource for Backtrace {
    fn capture(&self) -> Backtrace {
        self.clone()
    }
}
