//! Native stack introspection via the `backtrace` crate.

use crate::{Backtrace, Frame};

use super::FrameSource;

/// Function name used for frames whose symbol could not be resolved.
pub const UNKNOWN_FUNCTION: &str = "<unknown>";

/// Symbol prefixes of the capture machinery itself. Leading frames matching
/// these are dropped so the snapshot starts at the caller.
const CAPTURE_PREFIXES: &[&str] = &["backtrace::", "std::backtrace", "<backtrace::"];

/// Captures the current thread's native call stack.
///
/// Symbols are demangled without their hash and split into `class`
/// (everything before the last top-level `::`) and `function`. File and line
/// are present only when debug info is available. Native frames never carry
/// receivers or arguments.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeFrames;

impl FrameSource for NativeFrames {
    fn capture(&self) -> Backtrace {
        let native = backtrace::Backtrace::new();
        let frames: Vec<Frame> = native
            .frames()
            .iter()
            .flat_map(|frame| {
                let symbols = frame.symbols();
                if symbols.is_empty() {
                    vec![Frame::new(UNKNOWN_FUNCTION)]
                } else {
                    symbols.iter().map(frame_from_symbol).collect()
                }
            })
            .skip_while(is_capture_machinery)
            .collect();
        tracing::trace!(frames = frames.len(), "captured native stack");
        Backtrace::new(frames)
    }
}

fn frame_from_symbol(symbol: &backtrace::BacktraceSymbol) -> Frame {
    let name = symbol
        .name()
        .map_or_else(|| UNKNOWN_FUNCTION.to_string(), |name| format!("{name:#}"));
    let (class, function) = split_symbol(&name);
    Frame {
        file: symbol
            .filename()
            .map(|path| path.display().to_string())
            .unwrap_or_default(),
        line: symbol.lineno(),
        function: function.to_string(),
        class: class.map(str::to_string),
        receiver_name: None,
        arguments: Vec::new(),
    }
}

fn is_capture_machinery(frame: &Frame) -> bool {
    let name = frame.qualified_name();
    CAPTURE_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

/// Split a demangled path at its last top-level `::`.
///
/// Separators inside generic arguments (`<T as Trait>`) are ignored, so
/// `<alloc::vec::Vec<T> as Drop>::drop` splits into
/// `<alloc::vec::Vec<T> as Drop>` and `drop`. The arrow of a fn pointer
/// type (`fn() -> T`) is not a closing bracket.
pub(crate) fn split_symbol(path: &str) -> (Option<&str>, &str) {
    let bytes = path.as_bytes();
    let mut depth = 0_usize;
    let mut split = None;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            // `->` in fn pointer types does not close a generic
            b'>' if i > 0 && bytes[i - 1] == b'-' => {}
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                split = Some(i);
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    match split {
        Some(at) => (Some(&path[..at]), &path[at + 2..]),
        None => (None, path),
    }
}
