//! Fetch-once cache state

/// State of a lazily fetched collection.
///
/// Keeps "not fetched yet" distinct from "fetched and empty" (a classic
/// project has `Fetched(vec![])` events, not `NotFetched`).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Fetch<T> {
    #[default]
    NotFetched,
    Fetched(T),
    /// The last attempt failed with this message; the next access retries.
    Failed(String),
}

impl<T> Fetch<T> {
    pub fn get(&self) -> Option<&T> {
        match self {
            Fetch::Fetched(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_fetched(&self) -> bool {
        matches!(self, Fetch::Fetched(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Fetch::Failed(_))
    }
}
