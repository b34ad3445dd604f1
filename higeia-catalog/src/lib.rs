//! The concrete Higeia catalog on top of the generic store layer.
//!
//! `higeia-store` knows nothing about animals or ampoules. This crate
//! adds what is specific to the clinic and the pharmacy:
//! - [`EntityKind`] / [`EntityConfig`]: the registry of synced lists,
//!   their endpoints, required draft fields and searchable paths
//! - consolidated flows ([`create_record`], [`admit_animal`],
//!   [`discharge_animal`], ...) that pair a form submission or a direct
//!   write with the store merge screens previously hand-rolled
//! - [`load_stock_dashboard`]: the aggregated pharmacy counters

mod entities;
mod ops;
mod stock;

pub use entities::{
    EntityConfig, EntityKind, animal_discharge_path, hospitalization_discharge_path,
    hospitalization_records_path,
};
pub use ops::{
    add_hospitalization_record, admit_animal, appointment_filter, create_record,
    discharge_animal, discharge_hospitalization, update_record,
};
pub use stock::{StockDashboard, load_stock_dashboard};
