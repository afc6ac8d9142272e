use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::EntityKind;
use crate::store::backend::StorageBackend;
use crate::store::EntityStore;

pub fn run<B: StorageBackend>(store: &EntityStore<B>, kind: EntityKind, id: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match store.get(kind, id) {
        Some(record) => result.records.push(record),
        None => result.add_message(CmdMessage::warning(format!("No {} with id {}", kind, id))),
    }
    Ok(result)
}
