//! Identity of catalog records.

/// A record tracked by a stable id.
///
/// Two values with the same id are the same record in different states;
/// stores key on `id()`, never on the whole value.
pub trait Entity {
    /// Strongly-typed identifier, printable for logs and messages.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    fn id(&self) -> &Self::Id;

    /// Whether `other` is the same record, possibly in another state.
    fn same_record(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
