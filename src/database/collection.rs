use thiserror::Error;

/// A record that can live in a [`Collection`].
///
/// Identity is fixed at creation: updates go through `Patch`, which has no way
/// to carry an id.
pub trait Record: Clone {
    /// Human-readable name used in error messages ("Book", "User").
    const LABEL: &'static str;

    /// Field changes accepted by `update_one`.
    type Patch;

    fn id(&self) -> i64;

    fn apply(&mut self, patch: Self::Patch);
}

/// Errors raised by collection operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{label} not found")]
    NotFound { label: &'static str },

    #[error("{label} with id {id} already exists")]
    DuplicateKey { label: &'static str, id: i64 },
}

/// Ordered in-memory collection keyed by a unique integer id
#[derive(Debug, Clone)]
pub struct Collection<T> {
    records: Vec<T>,
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Self { records: Vec::new() }
    }

    /// Build a collection from existing records, rejecting duplicate ids
    pub fn from_records(records: impl IntoIterator<Item = T>) -> Result<Self, StoreError> {
        let mut collection = Self::new();
        for record in records {
            collection.insert_one(record)?;
        }
        Ok(collection)
    }

    /// All records in insertion order
    pub fn find(&self) -> &[T] {
        &self.records
    }

    /// First record matching the predicate. Absence is not an error.
    pub fn find_one<P>(&self, predicate: P) -> Option<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.records.iter().find(|record| predicate(record))
    }

    pub fn find_by_id(&self, id: i64) -> Option<&T> {
        self.find_one(|record| record.id() == id)
    }

    pub fn insert_one(&mut self, record: T) -> Result<&T, StoreError> {
        let id = record.id();
        if self.find_by_id(id).is_some() {
            return Err(StoreError::DuplicateKey { label: T::LABEL, id });
        }

        let index = self.records.len();
        self.records.push(record);
        Ok(&self.records[index])
    }

    /// Patch the first record matching the predicate in place
    pub fn update_one<P>(&mut self, predicate: P, patch: T::Patch) -> Result<&T, StoreError>
    where
        P: Fn(&T) -> bool,
    {
        let record = self
            .records
            .iter_mut()
            .find(|record| predicate(record))
            .ok_or(StoreError::NotFound { label: T::LABEL })?;

        record.apply(patch);
        Ok(&*record)
    }

    /// Remove the first record matching the predicate and hand it back
    pub fn delete_one<P>(&mut self, predicate: P) -> Result<T, StoreError>
    where
        P: Fn(&T) -> bool,
    {
        let index = self
            .records
            .iter()
            .position(|record| predicate(record))
            .ok_or(StoreError::NotFound { label: T::LABEL })?;

        Ok(self.records.remove(index))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
