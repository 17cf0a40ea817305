/// Whether the last write reached the backing store.
///
/// Storage failures are never fatal: the value stays in memory and the UI can
/// tell the user that it will not survive a restart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Persistence {
    #[default]
    Persisted,
    InMemoryOnly,
}

impl Persistence {
    #[must_use]
    pub fn is_persisted(self) -> bool {
        matches!(self, Persistence::Persisted)
    }
}

/// A value together with the outcome of persisting it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Stored<T> {
    pub value: T,
    pub persistence: Persistence,
}

impl<T> Stored<T> {
    pub fn new(value: T, persistence: Persistence) -> Self {
        Self { value, persistence }
    }
}
