use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::EntityStore;

pub fn run<B: StorageBackend>(store: &EntityStore<B>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_stats(store.stats()))
}
