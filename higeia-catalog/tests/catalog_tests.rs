use higeia_api::ApiClient;
use higeia_catalog::{
    EntityKind, animal_discharge_path, hospitalization_discharge_path,
    hospitalization_records_path,
};
use higeia_store::DraftState;
use higeia_types::{Record, RecordId};
use serde_json::json;
use std::sync::Arc;

// ── Registry table ────────────────────────────────────────────────

#[test]
fn every_kind_has_a_distinct_path() {
    let paths: Vec<&str> = EntityKind::ALL.iter().map(|k| k.config().path).collect();
    let mut deduped = paths.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(deduped.len(), paths.len());
}

#[test]
fn config_reports_its_own_kind() {
    for kind in EntityKind::ALL {
        assert_eq!(kind.config().kind, kind);
    }
}

#[test]
fn registration_entities_live_under_reg() {
    assert_eq!(EntityKind::Animal.config().path, "/reg/animal");
    assert_eq!(EntityKind::Owner.config().path, "/reg/client");
    assert_eq!(EntityKind::Supplier.config().path, "/reg/supplier");
    assert_eq!(EntityKind::Employee.config().path, "/reg/employee");
}

#[test]
fn pharmacy_entities_live_under_pharmacy() {
    assert_eq!(EntityKind::Product.config().path, "/pharmacy/product");
    assert_eq!(EntityKind::ProductEntry.config().path, "/pharmacy/entry");
    assert_eq!(
        EntityKind::ProductOutput.config().path,
        "/pharmacy/product-output"
    );
}

#[test]
fn clinic_entities_live_under_clinic() {
    assert_eq!(EntityKind::Appointment.config().path, "/clinic/appointment");
    assert_eq!(
        EntityKind::Hospitalization.config().path,
        "/clinic/hospitalization"
    );
    assert_eq!(
        EntityKind::Veterinarian.config().path,
        "/clinic/veterinarians"
    );
    assert_eq!(EntityKind::Technician.config().path, "/clinic/technicians");
}

#[test]
fn product_draft_requires_the_full_form() {
    let required = EntityKind::Product.config().required_fields;
    assert!(required.contains(&"name"));
    assert!(required.contains(&"amount"));
    assert!(required.contains(&"bar_code"));
    assert!(required.contains(&"product_category_id"));
    assert!(required.contains(&"unit_id"));
    assert!(required.contains(&"laboratory_id"));
    assert!(required.contains(&"product_use_id"));
}

#[test]
fn appointment_draft_requires_animal_date_and_hour() {
    assert_eq!(
        EntityKind::Appointment.config().required_fields,
        ["animal_id", "date", "hour"]
    );
}

#[test]
fn product_output_requires_who_withdrew() {
    assert_eq!(
        EntityKind::ProductOutput.config().required_fields,
        ["withdrawn_by_id"]
    );
}

#[test]
fn plain_registration_forms_have_no_local_checks() {
    assert!(EntityKind::Animal.config().required_fields.is_empty());
    assert!(EntityKind::Owner.config().required_fields.is_empty());
    assert!(EntityKind::Supplier.config().required_fields.is_empty());
}

// ── Record paths ──────────────────────────────────────────────────

#[test]
fn record_path_appends_the_id() {
    let config = EntityKind::Product.config();
    assert_eq!(
        config.record_path(&RecordId::Int(42)),
        "/pharmacy/product/42"
    );
}

#[test]
fn record_path_keeps_string_ids_verbatim() {
    let config = EntityKind::Owner.config();
    assert_eq!(
        config.record_path(&RecordId::Str("a1b2".into())),
        "/reg/client/a1b2"
    );
}

#[test]
fn hospitalization_paths_nest_under_the_parent() {
    let id = RecordId::Int(7);
    assert_eq!(
        animal_discharge_path(&id),
        "/clinic/hospitalization/animal/7/discharge"
    );
    assert_eq!(
        hospitalization_discharge_path(&id),
        "/clinic/hospitalizations/7/discharge"
    );
    assert_eq!(
        hospitalization_records_path(&id),
        "/clinic/hospitalizations/7/records"
    );
}

// ── Search predicates ─────────────────────────────────────────────

#[test]
fn search_predicate_covers_nested_paths() {
    let appointment = Record::from_value(json!({
        "id": 1,
        "type_appointments": "consulta",
        "animal": {"name": "Rex"},
        "owner_animal": {"name": "Alice"},
    }))
    .unwrap();

    let config = EntityKind::Appointment.config();
    assert!(config.search_predicate("rex").matches(&appointment));
    assert!(config.search_predicate("ALICE").matches(&appointment));
    assert!(!config.search_predicate("mia").matches(&appointment));
}

#[test]
fn empty_search_matches_everything() {
    let owner = Record::from_value(json!({"id": 1, "name": "Alice"})).unwrap();
    assert!(EntityKind::Owner.config().search_predicate("").matches(&owner));
}

// ── Builders ──────────────────────────────────────────────────────

#[test]
fn store_builder_binds_the_entity_path() {
    let client = Arc::new(ApiClient::with_defaults().unwrap());
    let store = EntityKind::Hospitalization.config().store(client);
    assert_eq!(store.path(), "/clinic/hospitalization");
}

#[test]
fn form_builder_starts_empty() {
    let client = Arc::new(ApiClient::with_defaults().unwrap());
    let form = EntityKind::Owner.config().form(client);
    assert_eq!(form.state(), DraftState::Empty);
}
