//! The dynamic value model.
//!
//! # Sharing
//!
//! Callables and objects are reference counted with `Rc`, so values are
//! cheap to clone and confined to the thread that created them. Incidents
//! are single-threaded by contract; the compiler enforces it.

use std::fmt;
use std::rc::Rc;

use crate::Object;

/// Signature of a function stored in a [`Callable`].
pub type NativeFn = dyn Fn(&[Value]) -> Value;

/// An opaque function reference.
///
/// Reports never look inside a callable; it always renders as a fixed
/// placeholder.
#[derive(Clone)]
pub struct Callable(Rc<NativeFn>);

impl Callable {
    pub fn new(f: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Callable(Rc::new(f))
    }

    /// Invoke the function.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }

    /// Identity comparison: two callables are equal only if they share the
    /// same allocation.
    pub fn ptr_eq(&self, other: &Callable) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callable(..)")
    }
}

/// A dynamic value attached to an incident.
#[derive(Clone, Default)]
pub enum Value {
    // Scalars
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),

    // Collections
    /// Ordered sequence.
    List(Vec<Value>),
    /// Ordered mapping; entry order is preserved when encoded.
    Map(Vec<(String, Value)>),

    // Opaque
    /// Function reference, rendered as a placeholder.
    Callable(Callable),
    /// Host object, rendered by type name (and display name, if nameable).
    Object(Rc<dyn Object>),
    /// Native resource handle (file descriptor, socket, ...). Has no
    /// structural encoding.
    Handle { kind: String, id: u64 },
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    pub fn list<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn map<K: Into<String>, V: Into<Value>>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn callable(f: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Value::Callable(Callable::new(f))
    }

    pub fn object(object: impl Object + 'static) -> Self {
        Value::Object(Rc::new(object))
    }

    pub fn handle(kind: impl Into<String>, id: u64) -> Self {
        Value::Handle {
            kind: kind.into(),
            id,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the string contents, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Short kind name, used in debug output.
    pub fn kind_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Callable(_) => "callable",
            Value::Object(object) => object.type_name(),
            Value::Handle { kind, .. } => kind,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Callable(a), Value::Callable(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Handle { kind: ka, id: ia }, Value::Handle { kind: kb, id: ib }) => {
                ka == kb && ia == ib
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            Value::Callable(c) => fmt::Debug::fmt(c, f),
            Value::Object(object) => write!(f, "Object({})", object.type_name()),
            Value::Handle { kind, id } => write!(f, "Handle({kind}#{id})"),
        }
    }
}

// Conversions

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u64> for Value {
    /// Saturates at `i64::MAX`.
    fn from(n: u64) -> Self {
        Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<usize> for Value {
    /// Saturates at `i64::MAX`.
    fn from(n: usize) -> Self {
        Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(f64::from(x))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

impl From<Callable> for Value {
    fn from(c: Callable) -> Self {
        Value::Callable(c)
    }
}

impl From<Rc<dyn Object>> for Value {
    fn from(object: Rc<dyn Object>) -> Self {
        Value::Object(object)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items)
    }
}
