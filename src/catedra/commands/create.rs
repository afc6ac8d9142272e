use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{EntityKind, Record};
use crate::store::backend::StorageBackend;
use crate::store::EntityStore;

pub fn run<B: StorageBackend>(
    store: &mut EntityStore<B>,
    kind: EntityKind,
    payload: Record,
) -> Result<CmdResult> {
    let record = store.create(kind, payload)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} created: {}",
        kind,
        record.id().unwrap_or_default()
    )));
    Ok(result.with_records(vec![record]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Query;
    use crate::store::entity_store::fixtures::empty_store;

    #[test]
    fn creates_and_reports() {
        let mut store = empty_store();
        let result = run(
            &mut store,
            EntityKind::Subscriber,
            Record::new().with("email", "lector@example.com"),
        )
        .unwrap();

        assert_eq!(result.records.len(), 1);
        let id = result.records[0].id().unwrap();
        assert!(result.messages[0].content.contains(id));
        assert_eq!(store.list(EntityKind::Subscriber, &Query::new()).len(), 1);
    }

    #[test]
    fn duplicate_id_is_an_error() {
        let mut store = empty_store();
        run(&mut store, EntityKind::Subscriber, Record::new().with("id", "s1")).unwrap();
        assert!(run(&mut store, EntityKind::Subscriber, Record::new().with("id", "s1")).is_err());
    }
}
