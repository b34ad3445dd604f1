//! Property-based tests for collection invariants.
//!
//! Whatever sequence of mutations a screen applies, a collection must keep
//! at most one record per id and must not disturb records it does not touch.

use higeia_types::{Collection, Record, RecordId};
use proptest::prelude::*;
use serde_json::json;
use std::collections::HashSet;

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn record_strategy() -> impl Strategy<Value = Record> {
    (0i64..20, "[a-z]{1,8}")
        .prop_map(|(id, name)| Record::from_value(json!({"id": id, "name": name})).unwrap())
}

#[derive(Debug, Clone)]
enum Op {
    Upsert(Record),
    Update(Record),
    Remove(i64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        record_strategy().prop_map(Op::Upsert),
        record_strategy().prop_map(Op::Update),
        (0i64..20).prop_map(Op::Remove),
    ]
}

fn apply(collection: &mut Collection, op: &Op) {
    match op {
        Op::Upsert(record) => {
            collection.upsert(record.clone());
        }
        Op::Update(record) => {
            collection.update(record.clone());
        }
        Op::Remove(id) => {
            collection.remove(&RecordId::Int(*id));
        }
    }
}

fn ids_are_unique(collection: &Collection) -> bool {
    let mut seen = HashSet::new();
    collection.iter().all(|r| seen.insert(r.id().clone()))
}

fn ids_of(collection: &Collection) -> Vec<RecordId> {
    collection.iter().map(|r| r.id().clone()).collect()
}

// =============================================================================
// UNIQUENESS PROPERTIES
// =============================================================================

mod uniqueness_properties {
    use super::*;

    proptest! {
        /// No mutation sequence can produce two records with the same id.
        #[test]
        fn ids_stay_unique(
            initial in prop::collection::vec(record_strategy(), 0..30),
            ops in prop::collection::vec(op_strategy(), 0..50),
        ) {
            let mut collection = Collection::from_records(initial);
            prop_assert!(ids_are_unique(&collection));
            for op in &ops {
                apply(&mut collection, op);
                prop_assert!(ids_are_unique(&collection));
            }
        }

        /// Upserting the same record twice equals upserting it once.
        #[test]
        fn upsert_is_idempotent(
            initial in prop::collection::vec(record_strategy(), 0..30),
            record in record_strategy(),
        ) {
            let mut once = Collection::from_records(initial.clone());
            once.upsert(record.clone());

            let mut twice = Collection::from_records(initial);
            twice.upsert(record.clone());
            twice.upsert(record);

            prop_assert_eq!(once, twice);
        }

        /// Removing an absent id leaves the collection untouched.
        #[test]
        fn remove_absent_is_noop(
            initial in prop::collection::vec(record_strategy(), 0..30),
            id in 100i64..200,
        ) {
            let mut collection = Collection::from_records(initial);
            let before = collection.clone();
            collection.remove(&RecordId::Int(id));
            prop_assert_eq!(collection, before);
        }

        /// replace_all always yields a unique, order-preserving collection.
        #[test]
        fn replace_all_dedups(
            initial in prop::collection::vec(record_strategy(), 0..30),
            incoming in prop::collection::vec(record_strategy(), 0..30),
        ) {
            let mut collection = Collection::from_records(initial);
            collection.replace_all(incoming.clone());
            prop_assert!(ids_are_unique(&collection));

            // first occurrence of each id wins, in arrival order
            let mut seen = HashSet::new();
            let expected: Vec<RecordId> = incoming
                .iter()
                .filter(|r| seen.insert(r.id().clone()))
                .map(|r| r.id().clone())
                .collect();
            prop_assert_eq!(ids_of(&collection), expected);
        }
    }
}

// =============================================================================
// ORDER PROPERTIES
// =============================================================================

mod order_properties {
    use super::*;

    proptest! {
        /// Updating an existing record keeps it at its position.
        #[test]
        fn update_preserves_position(
            initial in prop::collection::vec(record_strategy(), 1..30),
            replacement in record_strategy(),
        ) {
            let mut collection = Collection::from_records(initial);
            let position = collection.position(replacement.id());
            collection.update(replacement.clone());
            prop_assert_eq!(collection.position(replacement.id()), position);
        }

        /// Upsert never reorders the records it does not touch.
        #[test]
        fn upsert_preserves_order_of_others(
            initial in prop::collection::vec(record_strategy(), 0..30),
            record in record_strategy(),
        ) {
            let mut collection = Collection::from_records(initial);
            let others_before: Vec<RecordId> = ids_of(&collection)
                .into_iter()
                .filter(|id| id != record.id())
                .collect();
            collection.upsert(record.clone());
            let others_after: Vec<RecordId> = ids_of(&collection)
                .into_iter()
                .filter(|id| id != record.id())
                .collect();
            prop_assert_eq!(others_before, others_after);
        }

        /// Remove followed by insert_at at the reported position is a
        /// perfect undo.
        #[test]
        fn remove_then_insert_restores(
            initial in prop::collection::vec(record_strategy(), 1..30),
            pick in 0i64..20,
        ) {
            let mut collection = Collection::from_records(initial);
            let before = collection.clone();
            if let Some((index, removed)) = collection.remove(&RecordId::Int(pick)) {
                collection.insert_at(index, removed);
            }
            prop_assert_eq!(collection, before);
        }
    }
}
