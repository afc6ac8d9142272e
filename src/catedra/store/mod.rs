//! # Storage Layer
//!
//! The store is a set of named tables (one per [`EntityKind`]) held in memory
//! and persisted in full, as a single JSON snapshot, after every mutation.
//!
//! ## Layers
//!
//! - [`backend::StorageBackend`]: raw key/value I/O, modeled on browser local
//!   storage. [`fs_backend::FsBackend`] writes `<key>.json` files,
//!   [`mem_backend::MemBackend`] keeps everything in memory for tests.
//! - [`entity_store::EntityStore`]: the tables, id generation, the six
//!   operations (list, filter, get, create, update, delete) and the snapshot
//!   load/save cycle.
//! - [`repository::Repository`]: a typed view over one table.
//!
//! ## Loading
//!
//! On open, the persisted snapshot is shallow-merged over the built-in
//! default dataset: a table present in the snapshot replaces the default
//! table wholesale, tables absent from it keep their defaults. A snapshot
//! that fails to parse is ignored and the defaults are used; the store
//! reports which of these happened through [`LoadOutcome`].
//!
//! ## Snapshot Format
//!
//! ```text
//! {
//!   "BlogPost": [ { "id": "blogpost-1727000000000-1001", "created_date": "...", ... } ],
//!   "Event": [ ... ],
//!   ...
//! }
//! ```
//!
//! The snapshot has a single owner. Two processes writing the same key will
//! overwrite each other's changes (last write wins).

use crate::model::{EntityKind, Record};
use serde::Serialize;
use std::collections::BTreeMap;

pub mod backend;
pub mod defaults;
pub mod entity_store;
pub mod fs_backend;
pub mod ids;
pub mod mem_backend;
pub mod repository;

pub use entity_store::EntityStore;
pub use repository::Repository;

/// In-memory tables, one per entity kind.
pub type Tables = BTreeMap<EntityKind, Vec<Record>>;

/// How the store's initial contents were obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing was persisted; the default dataset is in use.
    Fresh,
    /// A persisted snapshot was merged over the defaults.
    FromSnapshot { tables: usize },
    /// The persisted snapshot was unreadable and the defaults are in use.
    Recovered { reason: String },
}

/// Result of a delete. Deleting is idempotent, so `success` is always true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Deleted {
    pub success: bool,
    #[serde(skip)]
    pub removed: usize,
}
