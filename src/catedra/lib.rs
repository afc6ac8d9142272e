//! # Catedra Architecture
//!
//! Catedra is the content store behind a bilingual (Spanish/English) academic
//! website: blog, publications, events, podcast, gallery and newsletter. The
//! admin panel, the public pages and the `catedra` CLI are all clients of the
//! same uniform interface: six operations over named tables.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Addresses tables by name ("BlogPost", "Event", ...)      │
//! │  - Parses orders, limits and field=value terms              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per operation, returns `CmdResult`            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - EntityStore: tables, ids, list/filter/get/create/...     │
//! │  - Repository<T>: typed view over one table                 │
//! │  - StorageBackend: FsBackend (production), MemBackend       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Store
//!
//! Every table lives in memory and the whole set is written back as one JSON
//! snapshot after each mutation. Records are flat JSON objects with a string
//! `id`; queries are strict field equality, a single sort field, and a limit.
//! See [`store`] and [`query`] for the exact semantics.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for name-addressed operations
//! - [`commands`]: One module per operation
//! - [`store`]: Entity store, typed repositories, storage backends
//! - [`query`]: Criteria, ordering and limits
//! - [`model`]: `EntityKind`, `Record`, typed entities
//! - [`auth`]: Mock sign-in state
//! - [`integrations`]: Offline LLM/email/upload/image stand-ins, exposed for
//!   library consumers; no command routes through them
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod auth;
pub mod commands;
pub mod config;
pub mod error;
pub mod integrations;
pub mod model;
pub mod query;
pub mod store;
