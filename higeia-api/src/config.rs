//! Client configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the API client.
///
/// The default base URL is the Android emulator loopback development
/// builds run against; tests and production builds point it elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend, including the `/api` prefix.
    pub base_url: String,
    /// Bearer token to start with, when one is already known.
    pub bearer_token: Option<String>,
    /// Optional request timeout in seconds. The app historically ran
    /// without one, so `None` means requests wait as long as the
    /// transport does.
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://10.0.2.2:8000/api".to_string(),
            bearer_token: None,
            timeout_secs: None,
        }
    }
}
