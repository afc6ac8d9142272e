use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::EntityKind;
use crate::store::backend::StorageBackend;
use crate::store::EntityStore;

pub fn run<B: StorageBackend>(store: &mut EntityStore<B>, kind: EntityKind, id: &str) -> Result<CmdResult> {
    let deleted = store.delete(kind, id)?;
    let mut result = CmdResult::default();
    if deleted.removed > 0 {
        result.add_message(CmdMessage::success(format!("{} deleted: {}", kind, id)));
    } else {
        result.add_message(CmdMessage::info(format!("No {} with id {}, nothing to delete", kind, id)));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::Record;
    use crate::store::entity_store::fixtures::empty_store;

    #[test]
    fn deleting_twice_succeeds_both_times() {
        let mut store = empty_store();
        let created = store
            .create(EntityKind::GalleryImage, Record::new().with("title", "Foto"))
            .unwrap();
        let id = created.id().unwrap().to_string();

        let first = run(&mut store, EntityKind::GalleryImage, &id).unwrap();
        assert_eq!(first.messages[0].level, MessageLevel::Success);

        let second = run(&mut store, EntityKind::GalleryImage, &id).unwrap();
        assert_eq!(second.messages[0].level, MessageLevel::Info);
        assert!(store.get(EntityKind::GalleryImage, &id).is_none());
    }
}
