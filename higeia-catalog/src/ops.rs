//! Consolidated flows the screens used to hand-roll: create or update a
//! record through a form, the admit/discharge toggle, clinical records
//! and the appointment filter.

use crate::entities::{
    EntityConfig, EntityKind, animal_discharge_path, hospitalization_discharge_path,
    hospitalization_records_path,
};
use higeia_api::{ApiClient, ApiError, ApiResult, SubmitMethod, ValidationErrors};
use higeia_store::{FilterProjection, FormController, ListSyncStore, MutationMode, Predicate};
use higeia_types::{Record, RecordId};
use serde_json::{Value, json};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Fields a clinical record cannot be saved without.
const RECORD_REQUIRED: &[&str] = &["temperature", "record_date", "record_time"];

// ── Form submission ──────────────────────────────────────────────

/// Creates a record through `form` and merges the confirmed row into
/// `store`.
///
/// A local required-field miss rejects the draft without touching the
/// network, shaped exactly like a server rejection so screens handle
/// both the same way.
pub async fn create_record(
    store: &ListSyncStore,
    form: &mut FormController,
    config: &EntityConfig,
) -> ApiResult<Value> {
    check_required(form, config.required_fields)?;
    let body = form.submit(config.path, SubmitMethod::Post).await?;
    merge_confirmation(store, &body, MutationMode::Insert).await;
    Ok(body)
}

/// Updates record `id` through `form`.
pub async fn update_record(
    store: &ListSyncStore,
    form: &mut FormController,
    config: &EntityConfig,
    id: &RecordId,
) -> ApiResult<Value> {
    check_required(form, config.required_fields)?;
    let body = form
        .submit(&config.record_path(id), SubmitMethod::Put)
        .await?;
    merge_confirmation(store, &body, MutationMode::Update).await;
    Ok(body)
}

/// Runs the local required-field check, recording misses on the form and
/// returning them shaped like a server validation rejection.
fn check_required(form: &mut FormController, required: &[&str]) -> ApiResult<()> {
    let missing = form.validate(required);
    if missing.is_empty() {
        return Ok(());
    }
    let mut errors: HashMap<String, Vec<String>> = HashMap::new();
    for error in &missing {
        errors
            .entry(error.field.clone())
            .or_default()
            .push(error.message.clone());
    }
    form.set_field_errors(missing);
    Err(ApiError::Validation(ValidationErrors {
        message: None,
        errors,
    }))
}

/// Merges a confirmation body into the store when it carries a record.
///
/// Bodies without a usable id (bare status objects) leave the store
/// alone; the next load picks the row up.
async fn merge_confirmation(store: &ListSyncStore, body: &Value, mode: MutationMode) {
    match Record::from_value(body.clone()) {
        Ok(record) => store.apply_mutation(record, mode).await,
        Err(_) => debug!("confirmation body carries no record, store left as-is"),
    }
}

// ── Hospitalization ──────────────────────────────────────────────

/// Opens a hospitalization for an animal and attaches the confirmed
/// hospitalization to the animal's row in `animals`.
///
/// Vitals start zeroed; the ward fills them in afterwards.
pub async fn admit_animal(
    animals: &ListSyncStore,
    client: &ApiClient,
    animal_id: &RecordId,
) -> ApiResult<Value> {
    let body = json!({
        "animal_id": animal_id,
        "weight": 0,
        "temperature": 0,
        "blood_pressure": "",
        "observations": "",
    });
    let response = client
        .submit(SubmitMethod::Post, "/clinic/hospitalization", Some(&body))
        .await?;
    if let Some(mut animal) = animals.get(animal_id).await {
        animal.set("hospitalization", response.clone());
        animals.apply_mutation(animal, MutationMode::Update).await;
    }
    info!("animal {animal_id} admitted");
    Ok(response)
}

/// Discharges an animal from the animals list, clearing the attached
/// hospitalization up front and restoring it if the server refuses.
pub async fn discharge_animal(
    animals: &ListSyncStore,
    client: &ApiClient,
    animal_id: &RecordId,
) -> ApiResult<Value> {
    let receipt = match animals.get(animal_id).await {
        Some(mut animal) => {
            animal.set("hospitalization", Value::Null);
            Some(animals.optimistic_apply(animal, MutationMode::Update).await)
        }
        None => None,
    };

    let body = json!({ "discharged": true });
    let result = client
        .submit(SubmitMethod::Put, &animal_discharge_path(animal_id), Some(&body))
        .await;
    match result {
        Ok(response) => {
            info!("animal {animal_id} discharged");
            Ok(response)
        }
        Err(error) => {
            if let Some(receipt) = receipt {
                warn!("discharge of animal {animal_id} failed, restoring: {error}");
                animals.revert(receipt).await;
            }
            Err(error)
        }
    }
}

/// Closes hospitalization `id` from the hospitalizations list. The row
/// is removed only after the server confirms.
pub async fn discharge_hospitalization(
    hospitalizations: &ListSyncStore,
    client: &ApiClient,
    id: &RecordId,
) -> ApiResult<Value> {
    let response = client
        .submit(SubmitMethod::Put, &hospitalization_discharge_path(id), None)
        .await?;
    if let Some(record) = hospitalizations.get(id).await {
        hospitalizations
            .apply_mutation(record, MutationMode::Remove)
            .await;
    }
    info!("hospitalization {id} discharged");
    Ok(response)
}

/// Appends a clinical record to one hospitalization. The vitals and the
/// moment they were taken are required; the rest of the draft rides
/// along as-is.
pub async fn add_hospitalization_record(
    form: &mut FormController,
    hospitalization_id: &RecordId,
) -> ApiResult<Value> {
    check_required(form, RECORD_REQUIRED)?;
    form.set_field("hospitalization_id", hospitalization_id.to_value());
    form.submit(
        &hospitalization_records_path(hospitalization_id),
        SubmitMethod::Post,
    )
    .await
}

// ── Filtering ────────────────────────────────────────────────────

/// The appointment screen's combined filter: a type tab plus a search
/// box over the animal and owner names. `"all"` on the tab matches
/// every type.
#[must_use]
pub fn appointment_filter(type_selection: &str, search_text: &str) -> FilterProjection {
    let config = EntityKind::Appointment.config();
    FilterProjection::new(Predicate::all_of([
        Predicate::selection("/type_appointments", type_selection),
        config.search_predicate(search_text),
    ]))
}
