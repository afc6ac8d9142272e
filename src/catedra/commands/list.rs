use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::EntityKind;
use crate::query::Query;
use crate::store::backend::StorageBackend;
use crate::store::EntityStore;

pub fn run<B: StorageBackend>(
    store: &EntityStore<B>,
    kind: EntityKind,
    query: &Query,
) -> Result<CmdResult> {
    Ok(CmdResult::default().with_records(store.list(kind, query)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;
    use crate::query::OrderBy;
    use crate::store::entity_store::fixtures::{empty_store, seed};

    #[test]
    fn lists_in_requested_order() {
        let mut store = empty_store();
        seed(
            &mut store,
            EntityKind::Event,
            vec![
                Record::new().with("date", "2024-03-01"),
                Record::new().with("date", "2024-01-01"),
            ],
        );

        let result = run(&store, EntityKind::Event, &Query::new().order(OrderBy::asc("date"))).unwrap();
        let dates: Vec<_> = result
            .records
            .iter()
            .filter_map(|r| r.get("date").and_then(|v| v.as_str()))
            .collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-03-01"]);
    }

    #[test]
    fn empty_table_lists_nothing() {
        let store = empty_store();
        let result = run(&store, EntityKind::Institution, &Query::new()).unwrap();
        assert!(result.records.is_empty());
        assert!(result.messages.is_empty());
    }
}
