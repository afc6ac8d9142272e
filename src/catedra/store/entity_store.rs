use super::backend::StorageBackend;
use super::defaults::{default_tables, merge_snapshot, parse_snapshot};
use super::ids::{timestamp, IdGenerator};
use super::repository::Repository;
use super::{Deleted, LoadOutcome, Tables};
use crate::error::{CatedraError, Result};
use crate::model::{Entity, EntityKind, Record};
use crate::query::{Criteria, Query};
use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// The document store: every table in memory, persisted as one snapshot.
///
/// Construct one per application and hand it to whatever needs it. Reads
/// take `&self` and return copies; mutations take `&mut self`, so each call
/// observes every call that completed before it.
pub struct EntityStore<B: StorageBackend> {
    backend: B,
    snapshot_key: String,
    tables: Tables,
    ids: IdGenerator,
    outcome: LoadOutcome,
}

impl<B: StorageBackend> EntityStore<B> {
    /// Load the store from `backend`, falling back to the default dataset.
    ///
    /// Only backend I/O failures are errors. An unreadable snapshot is
    /// reported through [`EntityStore::load_outcome`].
    pub fn open(backend: B, snapshot_key: impl Into<String>) -> Result<Self> {
        let snapshot_key = snapshot_key.into();
        let mut tables = default_tables()?;

        let outcome = match backend.read(&snapshot_key)? {
            None => LoadOutcome::Fresh,
            Some(raw) => match parse_snapshot(&raw) {
                Ok(snapshot) => LoadOutcome::FromSnapshot {
                    tables: merge_snapshot(&mut tables, snapshot),
                },
                Err(e) => {
                    warn!(key = %snapshot_key, error = %e, "corrupted snapshot, using defaults");
                    LoadOutcome::Recovered {
                        reason: e.to_string(),
                    }
                }
            },
        };
        info!(
            location = %backend.location(&snapshot_key).display(),
            outcome = ?outcome,
            "store loaded"
        );

        Ok(Self {
            backend,
            snapshot_key,
            tables,
            ids: IdGenerator::new(),
            outcome,
        })
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.outcome
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn snapshot_key(&self) -> &str {
        &self.snapshot_key
    }

    /// Typed access to one table.
    pub fn repo<T: Entity>(&mut self) -> Repository<'_, T, B> {
        Repository::new(self)
    }

    /// Every record of `kind`, sorted and truncated per `query`.
    pub fn list(&self, kind: EntityKind, query: &Query) -> Vec<Record> {
        query.apply(self.table(kind).to_vec())
    }

    /// Records of `kind` matching every criterion, sorted and truncated per `query`.
    pub fn filter(&self, kind: EntityKind, criteria: &Criteria, query: &Query) -> Vec<Record> {
        let selected = self
            .table(kind)
            .iter()
            .filter(|record| criteria.matches(record))
            .cloned()
            .collect();
        query.apply(selected)
    }

    pub fn get(&self, kind: EntityKind, id: &str) -> Option<Record> {
        self.table(kind)
            .iter()
            .find(|record| record.id() == Some(id))
            .cloned()
    }

    /// Append a record. Generated `id` and `created_date` are defaults the
    /// payload may override.
    pub fn create(&mut self, kind: EntityKind, payload: Record) -> Result<Record> {
        let now = Utc::now();
        let mut record = Record::new()
            .with("id", self.ids.next_id(kind, now))
            .with("created_date", timestamp(now));
        record.merge(payload);

        let id = record
            .id()
            .ok_or_else(|| CatedraError::InvalidInput("id must be a string".to_string()))?
            .to_string();
        if self.get(kind, &id).is_some() {
            return Err(CatedraError::DuplicateId { kind, id });
        }

        self.table_mut(kind).push(record.clone());
        debug!(kind = %kind, id = %id, "created record");
        self.persist()?;
        Ok(record)
    }

    /// Shallow-merge `patch` into the record with `id`, in place.
    ///
    /// Returns `Ok(None)` when no such record exists. An `id` in the patch is
    /// ignored so the record stays addressable.
    pub fn update(&mut self, kind: EntityKind, id: &str, mut patch: Record) -> Result<Option<Record>> {
        let table = self.table_mut(kind);
        let Some(position) = table.iter().position(|record| record.id() == Some(id)) else {
            debug!(kind = %kind, id = %id, "update of missing record");
            return Ok(None);
        };

        if patch.remove("id").is_some() {
            debug!(kind = %kind, id = %id, "ignoring id field in patch");
        }
        table[position].merge(patch);
        let updated = table[position].clone();

        debug!(kind = %kind, id = %id, "updated record");
        self.persist()?;
        Ok(Some(updated))
    }

    /// Remove every record with `id`. Succeeds whether or not one existed.
    pub fn delete(&mut self, kind: EntityKind, id: &str) -> Result<Deleted> {
        let table = self.table_mut(kind);
        let before = table.len();
        table.retain(|record| record.id() != Some(id));
        let removed = before - table.len();

        debug!(kind = %kind, id = %id, removed, "deleted record");
        self.persist()?;
        Ok(Deleted {
            success: true,
            removed,
        })
    }

    /// Record counts per table, in kind order.
    pub fn stats(&self) -> Vec<(EntityKind, usize)> {
        EntityKind::ALL
            .iter()
            .map(|kind| (*kind, self.table(*kind).len()))
            .collect()
    }

    /// Drop the persisted snapshot and go back to the default dataset.
    pub fn reset(&mut self) -> Result<()> {
        self.backend.remove(&self.snapshot_key)?;
        self.tables = default_tables()?;
        self.outcome = LoadOutcome::Fresh;
        info!(key = %self.snapshot_key, "store reset to defaults");
        Ok(())
    }

    /// The full snapshot as it would be persisted.
    pub fn snapshot_json(&self) -> Result<String> {
        let mut snapshot = Map::new();
        for (kind, records) in &self.tables {
            snapshot.insert(kind.name().to_string(), serde_json::to_value(records)?);
        }
        Ok(serde_json::to_string_pretty(&Value::Object(snapshot))?)
    }

    // A failed write leaves the in-memory tables ahead of storage; the next
    // successful persist writes everything, so the gap closes on its own.
    fn persist(&self) -> Result<()> {
        let json = self.snapshot_json()?;
        self.backend
            .write(&self.snapshot_key, &json)
            .inspect_err(|e| warn!(key = %self.snapshot_key, error = %e, "failed to persist snapshot"))
    }

    fn table(&self, kind: EntityKind) -> &[Record] {
        self.tables.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    fn table_mut(&mut self, kind: EntityKind) -> &mut Vec<Record> {
        self.tables.entry(kind).or_default()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    pub const SNAPSHOT_KEY: &str = "catedra_data";

    /// A store over a `MemBackend` with all default tables emptied.
    pub fn empty_store() -> EntityStore<MemBackend> {
        let mut snapshot = Map::new();
        for kind in EntityKind::ALL {
            snapshot.insert(kind.name().to_string(), Value::Array(Vec::new()));
        }
        let backend =
            MemBackend::new().with_entry(SNAPSHOT_KEY, &Value::Object(snapshot).to_string());
        EntityStore::open(backend, SNAPSHOT_KEY).unwrap()
    }

    /// Seed `kind` with the given field values, one record per entry.
    pub fn seed(store: &mut EntityStore<MemBackend>, kind: EntityKind, records: Vec<Record>) {
        for record in records {
            store.create(kind, record).unwrap();
        }
    }
}
