//! HTTP access to the Higeia backend.
//!
//! One [`ApiClient`] serves every entity endpoint of the clinic and
//! pharmacy API: list reads are normalized through the response envelope,
//! writes go through [`ApiClient::submit`], and the bearer token captured
//! at login rides every request.
//!
//! Failures always surface as one [`ApiError`] variant so callers can
//! branch on the kind without inspecting messages.

mod client;
mod config;
mod envelope;
mod error;

pub use client::{ApiClient, SubmitMethod};
pub use config::ApiConfig;
pub use envelope::record_values;
pub use error::{ApiError, ApiResult, ValidationErrors};
