use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::EntityKind;
use crate::query::{Criteria, Query};
use crate::store::backend::StorageBackend;
use crate::store::EntityStore;

pub fn run<B: StorageBackend>(
    store: &EntityStore<B>,
    kind: EntityKind,
    criteria: &Criteria,
    query: &Query,
) -> Result<CmdResult> {
    Ok(CmdResult::default().with_records(store.filter(kind, criteria, query)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;
    use crate::store::entity_store::fixtures::{empty_store, seed};

    #[test]
    fn keeps_only_matching_records() {
        let mut store = empty_store();
        seed(
            &mut store,
            EntityKind::Comment,
            vec![
                Record::new().with("post_id", "p1").with("approved", true),
                Record::new().with("post_id", "p1").with("approved", false),
                Record::new().with("post_id", "p2").with("approved", true),
            ],
        );

        let criteria = Criteria::new().eq("post_id", "p1").eq("approved", true);
        let result = run(&store, EntityKind::Comment, &criteria, &Query::new()).unwrap();
        assert_eq!(result.records.len(), 1);
        assert!(criteria.matches(&result.records[0]));
    }

    #[test]
    fn empty_criteria_match_everything() {
        let mut store = empty_store();
        seed(
            &mut store,
            EntityKind::Comment,
            vec![Record::new(), Record::new()],
        );
        let result = run(&store, EntityKind::Comment, &Criteria::new(), &Query::new()).unwrap();
        assert_eq!(result.records.len(), 2);
    }
}
