//! Core data types for the Higeia client.
//!
//! This crate defines the building blocks every screen-facing store is
//! built from:
//! - `RecordId` and `Record`: server-assigned identity plus the untyped
//!   JSON payload the row carried
//! - `Collection`: an ordered, id-unique list of records
//! - `FetchParams`: query parameters in the wire format the backend expects
//!
//! Everything here is synchronous and free of I/O. Networking lives in
//! `higeia-api`, stateful stores in `higeia-store`.

mod collection;
mod params;
mod record;

pub use collection::Collection;
pub use params::FetchParams;
pub use record::{Record, RecordId};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building records from raw payloads.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("record payload is not a JSON object")]
    NotAnObject,

    #[error("record payload has no usable id")]
    MissingId,
}
