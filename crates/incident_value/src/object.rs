//! Capability traits for host objects stored in a [`Value`](crate::Value).

/// A host object that can be attached to an incident.
///
/// Objects are opaque to the report: only their type name and, when they
/// expose one, their display name are ever rendered. Fields are never
/// introspected.
pub trait Object {
    /// Display name of the object's type (e.g. `"UserRepository"`).
    fn type_name(&self) -> &str;

    /// Query the [`Nameable`] capability.
    ///
    /// Objects that carry a display name return `Some(self)`.
    fn as_nameable(&self) -> Option<&dyn Nameable> {
        None
    }

    /// Label used when the object is the receiver of a call: its display
    /// name when nameable, its type name otherwise.
    fn receiver_label(&self) -> &str {
        match self.as_nameable() {
            Some(nameable) => nameable.display_name(),
            None => self.type_name(),
        }
    }
}

/// Capability of objects that carry a human-readable display name.
pub trait Nameable {
    fn display_name(&self) -> &str;
}
