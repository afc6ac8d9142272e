//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for consumers that address tables by name (the admin CLI, or
//! any other client).
//!
//! It:
//! - **Parses names** into [`EntityKind`]s, turning unknown names into
//!   [`CatedraError::UnknownEntityType`](crate::error::CatedraError::UnknownEntityType)
//! - **Parses query input** (`-field` orders, `field=value` terms)
//! - **Dispatches** to the matching command and returns its `CmdResult`
//!
//! Business logic stays in `commands/*.rs` and `store/`. Nothing here prints.
//!
//! `CatedraApi<B: StorageBackend>` is generic over the storage backend:
//! `FsBackend` in production, `MemBackend` in tests.

use crate::commands;
use crate::config::CatedraConfig;
use crate::error::Result;
use crate::model::{EntityKind, Record};
use crate::query::{parse_assignment, Criteria, OrderBy, Query};
use crate::store::backend::StorageBackend;
use crate::store::{EntityStore, LoadOutcome};
use std::path::PathBuf;
use std::str::FromStr;

pub struct CatedraApi<B: StorageBackend> {
    store: EntityStore<B>,
    config: CatedraConfig,
    config_dir: PathBuf,
}

impl<B: StorageBackend> CatedraApi<B> {
    /// Open the store on `backend` using the keys from `config`.
    pub fn open(backend: B, config: CatedraConfig, config_dir: PathBuf) -> Result<Self> {
        let store = EntityStore::open(backend, config.snapshot_key.clone())?;
        Ok(Self {
            store,
            config,
            config_dir,
        })
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        self.store.load_outcome()
    }

    pub fn store(&self) -> &EntityStore<B> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut EntityStore<B> {
        &mut self.store
    }

    pub fn list(
        &self,
        entity: &str,
        order: Option<&str>,
        limit: Option<usize>,
    ) -> Result<commands::CmdResult> {
        let kind = parse_kind(entity)?;
        let query = parse_query(order, limit)?;
        commands::list::run(&self.store, kind, &query)
    }

    pub fn filter<I: AsRef<str>>(
        &self,
        entity: &str,
        terms: &[I],
        order: Option<&str>,
        limit: Option<usize>,
    ) -> Result<commands::CmdResult> {
        let kind = parse_kind(entity)?;
        let criteria = Criteria::parse_terms(terms)?;
        let query = parse_query(order, limit)?;
        commands::filter::run(&self.store, kind, &criteria, &query)
    }

    pub fn get(&self, entity: &str, id: &str) -> Result<commands::CmdResult> {
        let kind = parse_kind(entity)?;
        commands::get::run(&self.store, kind, id)
    }

    pub fn create(&mut self, entity: &str, payload: Record) -> Result<commands::CmdResult> {
        let kind = parse_kind(entity)?;
        commands::create::run(&mut self.store, kind, payload)
    }

    pub fn update(&mut self, entity: &str, id: &str, patch: Record) -> Result<commands::CmdResult> {
        let kind = parse_kind(entity)?;
        commands::update::run(&mut self.store, kind, id, patch)
    }

    pub fn delete(&mut self, entity: &str, id: &str) -> Result<commands::CmdResult> {
        let kind = parse_kind(entity)?;
        commands::delete::run(&mut self.store, kind, id)
    }

    pub fn stats(&self) -> Result<commands::CmdResult> {
        commands::stats::run(&self.store)
    }

    pub fn reset(&mut self) -> Result<commands::CmdResult> {
        commands::reset::run(&mut self.store)
    }

    pub fn whoami(&self) -> Result<commands::CmdResult> {
        commands::session::whoami(
            self.store.backend(),
            &self.config.session_key,
            &self.config.default_user(),
        )
    }

    pub fn logout(&self) -> Result<commands::CmdResult> {
        commands::session::logout(self.store.backend(), &self.config.session_key)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.config_dir, action)
    }
}

/// Build a record from `field=value` terms layered over an optional JSON
/// object; terms win over the JSON document.
pub fn build_payload<I: AsRef<str>>(json: Option<&str>, terms: &[I]) -> Result<Record> {
    let mut record = match json {
        Some(raw) => Record::from_value(serde_json::from_str(raw)?)?,
        None => Record::new(),
    };
    for term in terms {
        let (field, value) = parse_assignment(term.as_ref())?;
        record.insert(field, value);
    }
    Ok(record)
}

fn parse_kind(entity: &str) -> Result<EntityKind> {
    EntityKind::from_str(entity)
}

fn parse_query(order: Option<&str>, limit: Option<usize>) -> Result<Query> {
    let order = order.map(OrderBy::from_str).transpose()?;
    Ok(Query { order, limit })
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
