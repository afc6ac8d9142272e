use super::backend::StorageBackend;
use super::{Deleted, EntityStore};
use crate::error::{CatedraError, Result};
use crate::model::{Entity, Record};
use crate::query::{Criteria, Query};
use std::marker::PhantomData;

/// Typed view over the table of `T`.
///
/// Records are decoded into `T` on the way out and encoded from `T` on the
/// way in, so field names are checked at compile time while the table
/// itself stays schemaless.
pub struct Repository<'a, T: Entity, B: StorageBackend> {
    store: &'a mut EntityStore<B>,
    _entity: PhantomData<T>,
}

impl<'a, T: Entity, B: StorageBackend> Repository<'a, T, B> {
    pub(super) fn new(store: &'a mut EntityStore<B>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub fn list(&self, query: &Query) -> Result<Vec<T>> {
        decode_all(self.store.list(T::KIND, query))
    }

    pub fn filter(&self, criteria: &Criteria, query: &Query) -> Result<Vec<T>> {
        decode_all(self.store.filter(T::KIND, criteria, query))
    }

    pub fn get(&self, id: &str) -> Result<Option<T>> {
        self.store.get(T::KIND, id).map(decode).transpose()
    }

    /// Store `draft`. An empty `id` or a missing `created_date` is filled in.
    pub fn create(&mut self, draft: &T) -> Result<T> {
        let record = self.store.create(T::KIND, encode(draft)?)?;
        decode(record)
    }

    pub fn update(&mut self, id: &str, patch: Record) -> Result<Option<T>> {
        self.store
            .update(T::KIND, id, patch)?
            .map(decode)
            .transpose()
    }

    pub fn delete(&mut self, id: &str) -> Result<Deleted> {
        self.store.delete(T::KIND, id)
    }
}

fn encode<T: Entity>(entity: &T) -> Result<Record> {
    Record::from_value(serde_json::to_value(entity)?)
}

fn decode<T: Entity>(record: Record) -> Result<T> {
    serde_json::from_value(record.into_value()).map_err(CatedraError::Serialization)
}

fn decode_all<T: Entity>(records: Vec<Record>) -> Result<Vec<T>> {
    records.into_iter().map(decode).collect()
}
