//! Diagnostic exceptions with contextual params and stack reports.
//!
//! An [`Exception`] is created once per failure, at the point of detection:
//! - it captures a snapshot of the call stack immediately
//! - intermediate handlers attach named context with
//!   [`add_more_info`](Exception::add_more_info) as it propagates
//! - on demand, [`render`](Exception::render) produces an incident report
//!   that marks where the stack leaves the framework and enters the calling
//!   application
//!
//! ```text
//! --[ Incident Report ]-----------------------------------
//! Exception: record not found [code: 404]
//!                  id: 17
//!               table: "users"
//! Stack Trace:
//!         crates/incident/src/exception.rs:  88 Exception::new()
//!                     src/handlers/user.rs:  31 - users app::handlers::load
//!                     (17, "users")
//! Caused by Previous Exception:
//! Exception: connection reset
//! --------------------------------------------------------
//! ```
//!
//! Raising and propagation use ordinary `Result`s: `Exception` implements
//! `std::error::Error`, with the previous exception as its `source()`.
//!
//! Everything here is total. Construction, augmentation, capture and
//! rendering never fail; a report can only become less detailed. The only
//! fallible API is configuration loading ([`ConfigError`]).

mod config;
mod exception;
mod logging;
mod params;
mod report;

pub use config::{
    ColorMode, ConfigError, ReportConfig, DEFAULT_FRAMEWORK_MARKERS, DEFAULT_FRAMEWORK_MODULES,
    ENV_COLOR, ENV_FRAMEWORK_MODULES, ENV_FRAMEWORK_PATHS, ENV_MAX_VALUE_LEN,
};
pub use exception::{Exception, ExceptionArgs, DEFAULT_TYPE_NAME};
pub use logging::init_tracing;
pub use params::ParamStore;
pub use report::{ReportRenderer, CAUSED_BY_LABEL, HEADER_TITLE, STACK_TRACE_LABEL};

pub use incident_trace::{
    Backtrace, CallStack, Classification, Frame, FrameClassifier, FrameKind, FrameSource,
    NativeFrames,
};
pub use incident_value::{Callable, Nameable, Object, Value, ValueSerializer, UNENCODABLE};
