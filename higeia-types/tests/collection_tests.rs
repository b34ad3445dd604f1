use higeia_types::{Collection, Record, RecordId};
use pretty_assertions::assert_eq;
use serde_json::json;

fn make_record(id: i64, name: &str) -> Record {
    Record::from_value(json!({"id": id, "name": name})).unwrap()
}

fn names(collection: &Collection) -> Vec<&str> {
    collection
        .iter()
        .map(|r| r.get_str("/name").unwrap())
        .collect()
}

// ── Construction ──────────────────────────────────────────────────

#[test]
fn new_is_empty() {
    let collection = Collection::new();
    assert!(collection.is_empty());
    assert_eq!(collection.len(), 0);
}

#[test]
fn from_records_preserves_order() {
    let collection = Collection::from_records(vec![
        make_record(3, "c"),
        make_record(1, "a"),
        make_record(2, "b"),
    ]);
    assert_eq!(names(&collection), vec!["c", "a", "b"]);
}

#[test]
fn from_records_dedups_first_wins() {
    let collection = Collection::from_records(vec![
        make_record(1, "first"),
        make_record(2, "other"),
        make_record(1, "second"),
    ]);
    assert_eq!(collection.len(), 2);
    assert_eq!(names(&collection), vec!["first", "other"]);
}

// ── Upsert ────────────────────────────────────────────────────────

#[test]
fn upsert_appends_new_id() {
    let mut collection = Collection::new();
    assert!(collection.upsert(make_record(1, "a")).is_none());
    assert!(collection.upsert(make_record(2, "b")).is_none());
    assert_eq!(names(&collection), vec!["a", "b"]);
}

#[test]
fn upsert_existing_id_replaces_in_place() {
    let mut collection = Collection::from_records(vec![
        make_record(1, "a"),
        make_record(2, "b"),
        make_record(3, "c"),
    ]);
    let prior = collection.upsert(make_record(2, "b2"));
    assert_eq!(prior.unwrap().get_str("/name"), Some("b"));
    assert_eq!(names(&collection), vec!["a", "b2", "c"]);
}

// ── Update ────────────────────────────────────────────────────────

#[test]
fn update_replaces_in_place() {
    let mut collection = Collection::from_records(vec![make_record(1, "a"), make_record(2, "b")]);
    let prior = collection.update(make_record(1, "a2"));
    assert_eq!(prior.unwrap().get_str("/name"), Some("a"));
    assert_eq!(names(&collection), vec!["a2", "b"]);
}

#[test]
fn update_absent_id_is_noop() {
    let mut collection = Collection::from_records(vec![make_record(1, "a")]);
    assert!(collection.update(make_record(9, "ghost")).is_none());
    assert_eq!(names(&collection), vec!["a"]);
}

// ── Remove ────────────────────────────────────────────────────────

#[test]
fn remove_returns_position_and_record() {
    let mut collection = Collection::from_records(vec![
        make_record(1, "a"),
        make_record(2, "b"),
        make_record(3, "c"),
    ]);
    let (index, removed) = collection.remove(&RecordId::Int(2)).unwrap();
    assert_eq!(index, 1);
    assert_eq!(removed.get_str("/name"), Some("b"));
    assert_eq!(names(&collection), vec!["a", "c"]);
}

#[test]
fn remove_absent_id_is_noop() {
    let mut collection = Collection::from_records(vec![make_record(1, "a")]);
    assert!(collection.remove(&RecordId::Int(9)).is_none());
    assert_eq!(collection.len(), 1);
}

#[test]
fn double_remove_is_noop() {
    let mut collection = Collection::from_records(vec![make_record(1, "a"), make_record(2, "b")]);
    assert!(collection.remove(&RecordId::Int(1)).is_some());
    assert!(collection.remove(&RecordId::Int(1)).is_none());
    assert_eq!(names(&collection), vec!["b"]);
}

// ── Insert at position ────────────────────────────────────────────

#[test]
fn insert_at_restores_position() {
    let mut collection = Collection::from_records(vec![
        make_record(1, "a"),
        make_record(2, "b"),
        make_record(3, "c"),
    ]);
    let (index, removed) = collection.remove(&RecordId::Int(2)).unwrap();
    collection.insert_at(index, removed);
    assert_eq!(names(&collection), vec!["a", "b", "c"]);
}

#[test]
fn insert_at_clamps_out_of_range() {
    let mut collection = Collection::from_records(vec![make_record(1, "a")]);
    collection.insert_at(100, make_record(2, "b"));
    assert_eq!(names(&collection), vec!["a", "b"]);
}

#[test]
fn insert_at_moves_existing_id() {
    let mut collection = Collection::from_records(vec![make_record(1, "a"), make_record(2, "b")]);
    collection.insert_at(0, make_record(2, "b2"));
    assert_eq!(names(&collection), vec!["b2", "a"]);
    assert_eq!(collection.len(), 2);
}

// ── Replace all ───────────────────────────────────────────────────

#[test]
fn replace_all_swaps_contents() {
    let mut collection = Collection::from_records(vec![make_record(1, "old")]);
    collection.replace_all(vec![make_record(2, "x"), make_record(3, "y")]);
    assert_eq!(names(&collection), vec!["x", "y"]);
    assert!(!collection.contains(&RecordId::Int(1)));
}

#[test]
fn replace_all_dedups() {
    let mut collection = Collection::new();
    collection.replace_all(vec![make_record(1, "a"), make_record(1, "dup")]);
    assert_eq!(names(&collection), vec!["a"]);
}

// ── Lookup ────────────────────────────────────────────────────────

#[test]
fn get_and_position() {
    let collection = Collection::from_records(vec![make_record(1, "a"), make_record(2, "b")]);
    assert_eq!(
        collection.get(&RecordId::Int(2)).unwrap().get_str("/name"),
        Some("b")
    );
    assert_eq!(collection.position(&RecordId::Int(2)), Some(1));
    assert_eq!(collection.get(&RecordId::Int(9)), None);
    assert_eq!(collection.position(&RecordId::Int(9)), None);
}

#[test]
fn string_and_int_ids_coexist() {
    let a = Record::from_value(json!({"id": 1, "name": "int"})).unwrap();
    let b = Record::from_value(json!({"id": "1", "name": "str"})).unwrap();
    let collection = Collection::from_records(vec![a, b]);
    assert_eq!(collection.len(), 2);
    assert_eq!(
        collection.get(&RecordId::from("1")).unwrap().get_str("/name"),
        Some("str")
    );
}

#[test]
fn clear_empties_collection() {
    let mut collection = Collection::from_records(vec![make_record(1, "a")]);
    collection.clear();
    assert!(collection.is_empty());
}

#[test]
fn into_iterator_yields_records_in_order() {
    let collection = Collection::from_records(vec![make_record(1, "a"), make_record(2, "b")]);
    let ids: Vec<RecordId> = collection.into_iter().map(|r| r.id().clone()).collect();
    assert_eq!(ids, vec![RecordId::Int(1), RecordId::Int(2)]);
}
