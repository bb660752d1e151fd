//! The diagnostic exception.
//!
//! # Construction
//!
//! The first argument is either a plain message or a message bundled with
//! initial params:
//!
//! ```text
//! Exception::new("record not found");
//! Exception::new(("record not found", [("id", 17)]));
//! Exception::new(Value::map([("0", "boom".into()), ("a", 1.into())]));
//! ```
//!
//! Construction captures the call stack immediately and never fails.
//! Message shapes that are not strings are coerced to their display form.
//!
//! # Chaining
//!
//! `previous` links to the exception that caused this one. The link is a
//! shared `Rc` with no back-pointer; since the previous exception must exist
//! before this one is built, chains are acyclic by construction.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::io::{self, IsTerminal, Write};
use std::rc::Rc;

use incident_trace::{Backtrace, Frame, FrameSource, NativeFrames};
use incident_value::{Value, ValueSerializer};

use crate::report::ReportRenderer;
use crate::{ParamStore, ReportConfig};

/// Type name reported for exceptions that don't override it.
pub const DEFAULT_TYPE_NAME: &str = "Exception";

/// Message plus initial params, the first constructor argument.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExceptionArgs {
    pub message: String,
    pub params: Vec<(String, Value)>,
}

impl ExceptionArgs {
    /// Split a value into message and params.
    ///
    /// Maps and lists contribute their first entry as the message and the
    /// rest as params. List entries are keyed by position, counted from the
    /// first entry after the message. Map entries keep their keys, except
    /// integer keys, which are renumbered the same way in order:
    ///
    /// ```text
    /// {"0": "boom", "5": "x", "a": 1, "9": "y"}  ->  "boom", {"0": "x", "a": 1, "1": "y"}
    /// ```
    fn from_value(value: Value) -> Self {
        let serializer = ValueSerializer::default();
        match value {
            Value::Map(entries) => {
                let mut entries = entries.into_iter();
                let message = entries
                    .next()
                    .map(|(_, head)| serializer.to_message(&head))
                    .unwrap_or_default();
                let mut next_index = 0_usize;
                let params = entries
                    .map(|(key, item)| {
                        if !is_integer_key(&key) {
                            return (key, item);
                        }
                        let renumbered = next_index.to_string();
                        next_index += 1;
                        (renumbered, item)
                    })
                    .collect();
                ExceptionArgs { message, params }
            }
            Value::List(items) => {
                let mut items = items.into_iter();
                let message = items
                    .next()
                    .map(|head| serializer.to_message(&head))
                    .unwrap_or_default();
                ExceptionArgs {
                    message,
                    params: items
                        .enumerate()
                        .map(|(pos, item)| (pos.to_string(), item))
                        .collect(),
                }
            }
            other => ExceptionArgs {
                message: serializer.to_message(&other),
                params: Vec::new(),
            },
        }
    }
}

/// Whether `key` is the canonical decimal form of an integer (`"7"`,
/// `"-3"`; not `"07"`, `"+1"` or `"1.0"`).
fn is_integer_key(key: &str) -> bool {
    key.parse::<i64>().is_ok_and(|n| n.to_string() == key)
}

impl From<&str> for ExceptionArgs {
    fn from(message: &str) -> Self {
        ExceptionArgs {
            message: message.to_string(),
            params: Vec::new(),
        }
    }
}

impl From<String> for ExceptionArgs {
    fn from(message: String) -> Self {
        ExceptionArgs {
            message,
            params: Vec::new(),
        }
    }
}

impl From<Value> for ExceptionArgs {
    fn from(value: Value) -> Self {
        ExceptionArgs::from_value(value)
    }
}

impl From<Vec<Value>> for ExceptionArgs {
    fn from(items: Vec<Value>) -> Self {
        ExceptionArgs::from_value(Value::List(items))
    }
}

impl<M, K, V, const N: usize> From<(M, [(K, V); N])> for ExceptionArgs
where
    M: Into<String>,
    K: Into<String>,
    V: Into<Value>,
{
    fn from((message, params): (M, [(K, V); N])) -> Self {
        ExceptionArgs {
            message: message.into(),
            params: params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<M, K, V> From<(M, Vec<(K, V)>)> for ExceptionArgs
where
    M: Into<String>,
    K: Into<String>,
    V: Into<Value>,
{
    fn from((message, params): (M, Vec<(K, V)>)) -> Self {
        ExceptionArgs {
            message: message.into(),
            params: params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A diagnostic exception: message, code, context params, the exception
/// that caused it, and the call stack at the moment it was created.
///
/// Not `Send`: an exception stays on the thread that created it.
#[derive(Clone, Debug)]
pub struct Exception {
    type_name: Cow<'static, str>,
    message: String,
    code: i64,
    previous: Option<Rc<Exception>>,
    params: ParamStore,
    trace: Backtrace,
}

impl Exception {
    /// Create an exception, capturing the native call stack.
    pub fn new(args: impl Into<ExceptionArgs>) -> Self {
        Self::capture_with(args, 0, None, &NativeFrames)
    }

    /// Create an exception with every field given, capturing from `source`.
    pub fn capture_with<S: FrameSource + ?Sized>(
        args: impl Into<ExceptionArgs>,
        code: i64,
        previous: Option<Rc<Exception>>,
        source: &S,
    ) -> Self {
        let ExceptionArgs { message, params } = args.into();
        let trace = source.capture();
        tracing::debug!(
            message = %message,
            code,
            frames = trace.len(),
            "exception created"
        );
        Exception {
            type_name: Cow::Borrowed(DEFAULT_TYPE_NAME),
            message,
            code,
            previous,
            params: params.into_iter().collect(),
            trace,
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: i64) -> Self {
        self.code = code;
        self
    }

    #[must_use]
    pub fn with_previous(mut self, previous: impl Into<Rc<Exception>>) -> Self {
        self.previous = Some(previous.into());
        self
    }

    /// Report under a different type name (e.g. `"ValidationException"`).
    #[must_use]
    pub fn with_type_name(mut self, type_name: impl Into<Cow<'static, str>>) -> Self {
        self.type_name = type_name.into();
        self
    }

    /// Builder form of [`add_more_info`](Self::add_more_info).
    #[must_use]
    pub fn with_info(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Attach context while the exception propagates.
    ///
    /// Overwrites an existing key in place. Chainable:
    ///
    /// ```text
    /// err.add_more_info("user", id).add_more_info("retry", 3);
    /// ```
    pub fn add_more_info(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.params.insert(key, value);
        self
    }

    // Inspection

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> i64 {
        self.code
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn previous(&self) -> Option<&Exception> {
        self.previous.as_deref()
    }

    /// A copy of the current params. Changing it doesn't affect `self`.
    pub fn params(&self) -> ParamStore {
        self.params.clone()
    }

    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    pub(crate) fn params_ref(&self) -> &ParamStore {
        &self.params
    }

    /// The snapshot captured at construction.
    pub fn trace(&self) -> &Backtrace {
        &self.trace
    }

    pub fn frames(&self) -> &[Frame] {
        self.trace.frames()
    }

    // Rendering

    /// Render the incident report with default configuration.
    pub fn render(&self, decorated: bool) -> String {
        self.render_with(&ReportConfig::default(), decorated)
    }

    pub fn render_with(&self, config: &ReportConfig, decorated: bool) -> String {
        ReportRenderer::new(config).render(self, decorated)
    }

    /// Write the report to `writer`, decorated according to `config.color`.
    pub fn write_report(
        &self,
        writer: &mut impl Write,
        config: &ReportConfig,
        is_tty: bool,
    ) -> io::Result<()> {
        let decorated = config.color.should_use_colors(is_tty);
        writer.write_all(self.render_with(config, decorated).as_bytes())?;
        writer.flush()
    }

    /// Print the report to stderr, configured from the environment.
    ///
    /// Write errors are ignored.
    #[cold]
    pub fn emit(&self) {
        let config = ReportConfig::from_env_or_default();
        let stderr = io::stderr();
        let is_tty = stderr.is_terminal();
        let _ = self.write_report(&mut stderr.lock(), &config, is_tty);
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_name, self.message)?;
        if self.code != 0 {
            write!(f, " [code: {}]", self.code)?;
        }
        Ok(())
    }
}

impl Error for Exception {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.previous
            .as_deref()
            .map(|previous| previous as &(dyn Error + 'static))
    }
}
