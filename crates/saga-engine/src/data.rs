use std::fmt;

use indexmap::IndexMap;

use crate::cloneable::CloneableAny;

/// Reserved key under which the caller's seed is stored in every snapshot.
pub const INITIAL_DATA: &str = "initial_data";

/// The accumulated data of a saga run.
///
/// Holds the seed under [`INITIAL_DATA`] plus one entry per committed
/// transaction, keyed by the transaction's label, in commit order. Entries are
/// type-erased; read them back with [`SagaData::get`] and the type the
/// transaction produced.
#[derive(Default)]
pub struct SagaData {
    entries: IndexMap<&'static str, Box<dyn CloneableAny>>,
}

impl SagaData {
    pub(crate) fn seeded<T>(seed: T) -> Self
    where
        T: Clone + Send + 'static,
    {
        let mut entries: IndexMap<&'static str, Box<dyn CloneableAny>> = IndexMap::new();
        entries.insert(INITIAL_DATA, Box::new(seed));
        Self { entries }
    }

    /// Returns a copy of this mapping with `label` bound to `value`.
    pub(crate) fn merged(&self, label: &'static str, value: Box<dyn CloneableAny>) -> Self {
        let mut next = self.clone();
        next.entries.insert(label, value);
        next
    }

    /// The seed the run was started with.
    #[must_use]
    pub fn initial<T: 'static>(&self) -> Option<&T> {
        self.get(INITIAL_DATA)
    }

    /// The result stored under `label`, if present and of type `T`.
    #[must_use]
    pub fn get<T: 'static>(&self, label: &str) -> Option<&T> {
        self.entries
            .get(label)
            .and_then(|value| (**value).as_any().downcast_ref::<T>())
    }

    /// Removes and returns the result stored under `label`, if present and of
    /// type `T`. An entry of another type is left in place.
    pub fn take<T: 'static>(&mut self, label: &str) -> Option<T> {
        if self.get::<T>(label).is_none() {
            return None;
        }
        let value = self.entries.shift_remove(label)?;
        value.into_any().downcast::<T>().ok().map(|boxed| *boxed)
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    /// Keys in insertion order, starting with [`INITIAL_DATA`].
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Clone for SagaData {
    fn clone(&self) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(label, value)| (*label, (**value).clone_box()))
                .collect(),
        }
    }
}

impl fmt::Debug for SagaData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SagaData")
            .field("labels", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
