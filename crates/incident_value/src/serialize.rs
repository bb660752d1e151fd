//! Safe, bounded conversion of values to display strings.
//!
//! The serializer is total: it never returns an error and never panics.
//!
//! - Callables render as [`CALLABLE_PLACEHOLDER`], never their internals.
//! - Nameable objects render as `<TypeName> (<name>)`.
//! - Other objects render as `Object <TypeName>`; fields are not inspected.
//! - Everything else is JSON-encoded. Values without a structural encoding
//!   (native handles, non-finite floats, nesting beyond
//!   [`MAX_ENCODE_DEPTH`]) degrade to [`UNENCODABLE`].
//!
//! Output longer than the configured limit is cut and suffixed with
//! [`TRUNCATION_MARKER`].

use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::Value;

/// Placeholder for values that cannot be structurally encoded.
pub const UNENCODABLE: &str = "<unencodable>";

/// Placeholder for function references.
pub const CALLABLE_PLACEHOLDER: &str = "Closure";

/// Maximum collection nesting the encoder will follow.
pub const MAX_ENCODE_DEPTH: usize = 64;

/// Default output limit, in characters.
pub const DEFAULT_MAX_LEN: usize = 512;

/// Appended to output cut at the length limit.
pub const TRUNCATION_MARKER: &str = "...";

/// Converts values to safe, bounded display strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ValueSerializer {
    /// Maximum output length in characters (0 = unlimited).
    max_len: usize,
}

impl Default for ValueSerializer {
    fn default() -> Self {
        ValueSerializer::new(DEFAULT_MAX_LEN)
    }
}

impl ValueSerializer {
    /// Create a serializer that cuts output at `max_len` characters.
    ///
    /// A limit of 0 disables truncation.
    pub fn new(max_len: usize) -> Self {
        ValueSerializer { max_len }
    }

    /// Create a serializer without an output limit.
    pub fn unbounded() -> Self {
        ValueSerializer { max_len: 0 }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Render `value` as a display string. Never fails.
    pub fn to_string(&self, value: &Value) -> String {
        let text = opaque_label(value).unwrap_or_else(|| encode(value));
        self.bound(text)
    }

    /// Render `value` as a message: strings are taken verbatim, null is
    /// empty, anything else goes through [`to_string`](Self::to_string).
    pub fn to_message(&self, value: &Value) -> String {
        match value {
            Value::Str(s) => s.clone(),
            Value::Null => String::new(),
            other => self.to_string(other),
        }
    }

    fn bound(&self, mut text: String) -> String {
        if self.max_len == 0 {
            return text;
        }
        if let Some((cut, _)) = text.char_indices().nth(self.max_len) {
            text.truncate(cut);
            text.push_str(TRUNCATION_MARKER);
        }
        text
    }
}

/// Label for values that are never structurally encoded.
fn opaque_label(value: &Value) -> Option<String> {
    match value {
        Value::Callable(_) => Some(CALLABLE_PLACEHOLDER.to_string()),
        Value::Object(object) => Some(match object.as_nameable() {
            Some(nameable) => format!("{} ({})", object.type_name(), nameable.display_name()),
            None => format!("Object {}", object.type_name()),
        }),
        _ => None,
    }
}

fn encode(value: &Value) -> String {
    serde_json::to_string(&Encode { value, depth: 0 }).unwrap_or_else(|_| UNENCODABLE.to_string())
}

/// Depth-tracking JSON view of a [`Value`].
struct Encode<'a> {
    value: &'a Value,
    depth: usize,
}

impl<'a> Encode<'a> {
    fn child(&self, value: &'a Value) -> Encode<'a> {
        Encode {
            value,
            depth: self.depth + 1,
        }
    }
}

impl Serialize for Encode<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.depth > MAX_ENCODE_DEPTH {
            return Err(S::Error::custom("value nested too deeply"));
        }
        match self.value {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(x) if x.is_finite() => serializer.serialize_f64(*x),
            Value::Float(x) => Err(S::Error::custom(format_args!("cannot encode {x}"))),
            Value::Str(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&self.child(item))?;
                }
                seq.end()
            }
            Value::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, item) in entries {
                    map.serialize_entry(key, &self.child(item))?;
                }
                map.end()
            }
            // Nested opaque values encode as their label.
            Value::Callable(_) | Value::Object(_) => {
                let label = opaque_label(self.value).unwrap_or_default();
                serializer.serialize_str(&label)
            }
            Value::Handle { kind, .. } => Err(S::Error::custom(format_args!(
                "cannot encode {kind} handle"
            ))),
        }
    }
}

#[cfg(test)]
mod tests;
