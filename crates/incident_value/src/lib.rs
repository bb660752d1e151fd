//! Dynamic values for incident reports.
//!
//! Incidents carry arbitrary contextual data: parameters attached to an
//! exception and the raw arguments of captured call frames. This crate
//! provides:
//! - [`Value`]: the dynamic value model those slots hold
//! - [`Object`] / [`Nameable`]: capability traits for host objects
//! - [`ValueSerializer`]: a total, bounded conversion of any value to text
//!
//! Serialization never fails. Values that cannot be structurally encoded
//! degrade to the [`UNENCODABLE`] placeholder.

mod object;
mod serialize;
mod value;

pub use object::{Nameable, Object};
pub use serialize::{
    ValueSerializer, CALLABLE_PLACEHOLDER, DEFAULT_MAX_LEN, MAX_ENCODE_DEPTH, TRUNCATION_MARKER,
    UNENCODABLE,
};
pub use value::{Callable, Value};
