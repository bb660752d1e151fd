//! Incident Report Renderer
//!
//! Plain-text report with optional ANSI decoration. Decoration only wraps
//! spans in color sequences; stripping them yields the plain report.
//!
//! ```text
//! --[ Incident Report ]-----------------------------------
//! <Type>: <message> [code: N]
//!                 key: <value>
//! Stack Trace:
//!  <file, rightmost 40 chars>:<line> - <receiver> <Class>::<function>()
//!  <boundary file>:<line> <function>
//!                     (<arg>, <arg>)
//! Caused by Previous Exception:
//! <Type>: <message> [code: N]
//! --------------------------------------------------------
//! ```

use std::fmt::Write;

use incident_trace::{Frame, FrameClassifier, FrameKind};
use incident_value::ValueSerializer;

use crate::{Exception, ReportConfig};

/// ANSI color codes for decorated reports.
mod colors {
    pub const BANNER: &str = "\x1b[1;31m"; // Bold red
    pub const MESSAGE: &str = "\x1b[1m";
    pub const FILE: &str = "\x1b[0;34m"; // Blue
    pub const LINE: &str = "\x1b[0;31m"; // Red
    pub const RECEIVER: &str = "\x1b[0;32m"; // Green
    pub const FUNCTION: &str = "\x1b[0;33m"; // Yellow
    pub const BOUNDARY: &str = "\x1b[1;31m"; // Bold red
    pub const RESET: &str = "\x1b[0m";
}

/// Opening banner text, padded with dashes to 56 columns.
pub const HEADER_TITLE: &str = "--[ Incident Report ]";
pub const STACK_TRACE_LABEL: &str = "Stack Trace:";
pub const CAUSED_BY_LABEL: &str = "Caused by Previous Exception:";

const BANNER_WIDTH: usize = 56;
const KEY_WIDTH: usize = 19;
const FILE_WIDTH: usize = 40;
const LINE_WIDTH: usize = 4;
const ARGUMENT_INDENT: usize = 20;

/// Renders exceptions as incident reports.
#[derive(Clone, Debug, Default)]
pub struct ReportRenderer {
    classifier: FrameClassifier,
    serializer: ValueSerializer,
}

impl ReportRenderer {
    pub fn new(config: &ReportConfig) -> Self {
        ReportRenderer {
            classifier: config.classifier(),
            serializer: config.serializer(),
        }
    }

    /// Render `exception` as a report. Pure read; never fails.
    pub fn render(&self, exception: &Exception, decorated: bool) -> String {
        let mut out = ReportWriter {
            out: String::new(),
            colors: decorated,
        };

        out.write_colored(&format!("{HEADER_TITLE:-<BANNER_WIDTH$}"), colors::BANNER);
        out.newline();
        write_summary(&mut out, exception);

        for (key, value) in exception.params_ref().iter() {
            let value = self.serializer.to_string(value);
            let _ = writeln!(out.out, "{key:>KEY_WIDTH$}: {value}");
        }

        out.write_plain(STACK_TRACE_LABEL);
        out.newline();
        let mut cursor = self.classifier.cursor();
        for frame in exception.frames() {
            let kind = cursor.advance(frame);
            self.write_frame(&mut out, frame, kind);
        }

        if let Some(previous) = exception.previous() {
            out.write_plain(CAUSED_BY_LABEL);
            out.newline();
            write_summary(&mut out, previous);
        }

        out.write_colored(&"-".repeat(BANNER_WIDTH), colors::BANNER);
        out.newline();

        tracing::trace!(
            frames = exception.frames().len(),
            decorated,
            "rendered incident report"
        );
        out.out
    }

    fn write_frame(&self, out: &mut ReportWriter, frame: &Frame, kind: FrameKind) {
        let file = tail(&frame.file, FILE_WIDTH);
        out.write_colored(&format!("{file:>FILE_WIDTH$}"), colors::FILE);
        out.write_plain(":");
        let line = frame.line.map(|line| line.to_string()).unwrap_or_default();
        out.write_colored(&format!("{line:>LINE_WIDTH$}"), colors::LINE);

        if let Some(receiver) = &frame.receiver_name {
            out.write_plain(" - ");
            out.write_colored(receiver, colors::RECEIVER);
        }
        out.write_plain(" ");
        if let Some(class) = &frame.class {
            out.write_colored(class, colors::RECEIVER);
            out.write_plain("::");
        }

        if kind == FrameKind::Boundary {
            out.write_colored(&frame.function, colors::BOUNDARY);
            let arguments = frame
                .arguments
                .iter()
                .map(|arg| self.serializer.to_string(arg))
                .collect::<Vec<_>>()
                .join(", ");
            out.newline();
            let _ = write!(out.out, "{:ARGUMENT_INDENT$}", "");
            out.write_colored(&format!("({arguments})"), colors::BOUNDARY);
        } else {
            out.write_colored(&frame.function, colors::FUNCTION);
            out.write_plain("()");
        }
        out.newline();
    }
}

/// `<Type>: <message>` plus ` [code: N]` when the code is non-zero.
fn write_summary(out: &mut ReportWriter, exception: &Exception) {
    out.write_plain(exception.type_name());
    out.write_plain(": ");
    out.write_colored(exception.message(), colors::MESSAGE);
    if exception.code() != 0 {
        let _ = write!(out.out, " [code: {}]", exception.code());
    }
    out.newline();
}

/// The last `width` characters of `text`.
fn tail(text: &str, width: usize) -> &str {
    let len = text.chars().count();
    if len <= width {
        return text;
    }
    match text.char_indices().nth(len - width) {
        Some((start, _)) => &text[start..],
        None => text,
    }
}

/// Report text under construction.
struct ReportWriter {
    out: String,
    colors: bool,
}

impl ReportWriter {
    /// Write text with optional ANSI color codes.
    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.out, "{color}{text}{}", colors::RESET);
        } else {
            self.out.push_str(text);
        }
    }

    fn write_plain(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn newline(&mut self) {
        self.out.push('\n');
    }
}
