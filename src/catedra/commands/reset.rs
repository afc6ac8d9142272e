use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::EntityStore;

pub fn run<B: StorageBackend>(store: &mut EntityStore<B>) -> Result<CmdResult> {
    store.reset()?;
    let mut result = CmdResult::default().with_stats(store.stats());
    result.add_message(CmdMessage::success("Store reset to the default content"));
    Ok(result)
}
