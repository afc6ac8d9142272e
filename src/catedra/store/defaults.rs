use super::Tables;
use crate::error::Result;
use crate::model::{EntityKind, Record};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::warn;

/// Built-in content shipped with the site.
const DEFAULT_SNAPSHOT: &str = include_str!("defaults.json");

/// The default dataset, with an (empty) table for every entity kind.
pub fn default_tables() -> Result<Tables> {
    let mut tables = parse_snapshot(DEFAULT_SNAPSHOT)?;
    for kind in EntityKind::ALL {
        tables.entry(kind).or_default();
    }
    Ok(tables)
}

/// Parse a snapshot blob into tables.
///
/// Keys that do not name an entity kind are dropped with a warning; any
/// structural problem (not an object, a table that is not an array of
/// objects) fails the whole parse.
pub fn parse_snapshot(raw: &str) -> Result<Tables> {
    let parsed: BTreeMap<String, Vec<Record>> = serde_json::from_str(raw)?;
    let mut tables = Tables::new();
    for (name, records) in parsed {
        match EntityKind::from_str(&name) {
            Ok(kind) => {
                tables.insert(kind, records);
            }
            Err(_) => warn!(table = %name, "ignoring unknown table in snapshot"),
        }
    }
    Ok(tables)
}

/// Shallow merge: each table in `snapshot` replaces the one in `base`.
/// Returns how many tables came from the snapshot.
pub fn merge_snapshot(base: &mut Tables, snapshot: Tables) -> usize {
    let count = snapshot.len();
    for (kind, records) in snapshot {
        base.insert(kind, records);
    }
    count
}
