//! The entity registry: which lists exist, where they live on the API,
//! what a draft must carry and which fields a search box looks at.

use higeia_api::ApiClient;
use higeia_store::{FormController, ListSyncStore, Predicate};
use higeia_types::RecordId;
use std::sync::Arc;

/// Every list the app syncs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Animal,
    Owner,
    Supplier,
    Employee,
    Product,
    ProductEntry,
    ProductOutput,
    Appointment,
    Hospitalization,
    Veterinarian,
    Technician,
}

/// Static description of one entity.
///
/// `required_fields` mirrors the pre-submit check the corresponding form
/// runs locally; entities whose forms submit straight to the server carry
/// an empty list and rely on the validation rejection coming back.
/// `search_paths` are JSON pointers into a record, so nested fields like
/// `/animal/name` work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityConfig {
    pub kind: EntityKind,
    pub path: &'static str,
    pub required_fields: &'static [&'static str],
    pub search_paths: &'static [&'static str],
}

impl EntityKind {
    pub const ALL: [EntityKind; 11] = [
        EntityKind::Animal,
        EntityKind::Owner,
        EntityKind::Supplier,
        EntityKind::Employee,
        EntityKind::Product,
        EntityKind::ProductEntry,
        EntityKind::ProductOutput,
        EntityKind::Appointment,
        EntityKind::Hospitalization,
        EntityKind::Veterinarian,
        EntityKind::Technician,
    ];

    /// The static configuration for this entity.
    #[must_use]
    pub fn config(self) -> EntityConfig {
        match self {
            EntityKind::Animal => EntityConfig {
                kind: self,
                path: "/reg/animal",
                required_fields: &[],
                search_paths: &["/name", "/species", "/breed"],
            },
            EntityKind::Owner => EntityConfig {
                kind: self,
                path: "/reg/client",
                required_fields: &[],
                search_paths: &["/name", "/cpf"],
            },
            EntityKind::Supplier => EntityConfig {
                kind: self,
                path: "/reg/supplier",
                required_fields: &[],
                search_paths: &["/name"],
            },
            EntityKind::Employee => EntityConfig {
                kind: self,
                path: "/reg/employee",
                required_fields: &[],
                search_paths: &["/name"],
            },
            EntityKind::Product => EntityConfig {
                kind: self,
                path: "/pharmacy/product",
                required_fields: &[
                    "name",
                    "amount",
                    "bar_code",
                    "product_category_id",
                    "unit_id",
                    "laboratory_id",
                    "product_use_id",
                ],
                search_paths: &["/name", "/bar_code"],
            },
            EntityKind::ProductEntry => EntityConfig {
                kind: self,
                path: "/pharmacy/entry",
                required_fields: &["supplier_id", "document"],
                search_paths: &["/document", "/supplier/name"],
            },
            EntityKind::ProductOutput => EntityConfig {
                kind: self,
                path: "/pharmacy/product-output",
                required_fields: &["withdrawn_by_id"],
                search_paths: &[],
            },
            EntityKind::Appointment => EntityConfig {
                kind: self,
                path: "/clinic/appointment",
                required_fields: &["animal_id", "date", "hour"],
                search_paths: &["/animal/name", "/owner_animal/name"],
            },
            EntityKind::Hospitalization => EntityConfig {
                kind: self,
                path: "/clinic/hospitalization",
                required_fields: &["animal_id"],
                search_paths: &["/animal/name"],
            },
            EntityKind::Veterinarian => EntityConfig {
                kind: self,
                path: "/clinic/veterinarians",
                required_fields: &[],
                search_paths: &["/name"],
            },
            EntityKind::Technician => EntityConfig {
                kind: self,
                path: "/clinic/technicians",
                required_fields: &[],
                search_paths: &["/name"],
            },
        }
    }
}

impl EntityConfig {
    /// A list store bound to this entity's endpoint.
    #[must_use]
    pub fn store(&self, client: Arc<ApiClient>) -> ListSyncStore {
        ListSyncStore::new(client, self.path)
    }

    /// An empty draft for creating a record of this entity.
    #[must_use]
    pub fn form(&self, client: Arc<ApiClient>) -> FormController {
        FormController::new(client)
    }

    /// The path of one record, for updates and deletes.
    #[must_use]
    pub fn record_path(&self, id: &RecordId) -> String {
        format!("{}/{id}", self.path)
    }

    /// Search-box predicate over this entity's searchable paths.
    #[must_use]
    pub fn search_predicate(&self, text: impl Into<String>) -> Predicate {
        Predicate::search(self.search_paths.iter().copied(), text)
    }
}

// Hospitalization flows reach a few endpoints that hang off a parent
// record instead of the flat per-entity paths above.

/// Clears the hospitalization attached to an animal.
#[must_use]
pub fn animal_discharge_path(animal_id: &RecordId) -> String {
    format!("/clinic/hospitalization/animal/{animal_id}/discharge")
}

/// Closes one hospitalization from the hospitalizations list.
#[must_use]
pub fn hospitalization_discharge_path(hospitalization_id: &RecordId) -> String {
    format!("/clinic/hospitalizations/{hospitalization_id}/discharge")
}

/// Clinical records nested under one hospitalization.
#[must_use]
pub fn hospitalization_records_path(hospitalization_id: &RecordId) -> String {
    format!("/clinic/hospitalizations/{hospitalization_id}/records")
}
