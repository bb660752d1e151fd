//! Call stack snapshots for incident reports.
//!
//! - [`Frame`] / [`Backtrace`]: one captured call and the immutable
//!   snapshot holding them, innermost first
//! - [`FrameSource`]: anything that can produce a snapshot. [`NativeFrames`]
//!   asks the platform, [`CallStack`] replays explicitly instrumented calls,
//!   and plain frame slices serve synthetic traces
//! - [`FrameClassifier`]: splits a snapshot into framework frames and
//!   application frames at the boundary frame
//!
//! Capture never fails. Missing platform information yields partial frames
//! (blank file, no line) or an empty snapshot.

mod capture;
mod classify;
mod frame;

pub use capture::{CallStack, FrameSource, NativeFrames, UNKNOWN_FUNCTION};
pub use classify::{Classification, FrameClassifier, FrameCursor, FrameKind};
pub use frame::{Backtrace, Frame};
