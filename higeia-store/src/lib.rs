//! Screen-facing state for Higeia.
//!
//! Every list screen in the app follows the same data flow: fetch a list,
//! render it, mutate it after the server confirms a change, filter it
//! locally. This crate holds that flow once:
//! - [`ListSyncStore`]: one endpoint, one collection, loading flags,
//!   explicit mutations with optimistic variants
//! - [`FormController`]: draft fields, local required checks, per-field
//!   server validation messages
//! - [`FilterProjection`]: pure filter/sort views recomputed on demand
//!
//! Stores never talk to each other and nothing here spawns tasks; all
//! operations are awaited inline by the caller.

mod filter;
mod form;
mod store;

pub use filter::{FilterProjection, Predicate, SortKey};
pub use form::{DraftState, FieldError, FormController, REQUIRED_MESSAGE};
pub use store::{ListSyncStore, MutationMode, MutationReceipt};
