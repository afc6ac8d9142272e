use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{EntityKind, Record};
use crate::store::backend::StorageBackend;
use crate::store::EntityStore;

pub fn run<B: StorageBackend>(
    store: &mut EntityStore<B>,
    kind: EntityKind,
    id: &str,
    patch: Record,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match store.update(kind, id, patch)? {
        Some(record) => {
            result.add_message(CmdMessage::success(format!("{} updated: {}", kind, id)));
            result.records.push(record);
        }
        None => result.add_message(CmdMessage::warning(format!("No {} with id {}", kind, id))),
    }
    Ok(result)
}
