//! Draft form state and submission.

use higeia_api::{ApiClient, ApiError, ApiResult, SubmitMethod};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Message shown under an input left empty.
pub const REQUIRED_MESSAGE: &str = "Campo obrigatório";

/// Lifecycle of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftState {
    #[default]
    Empty,
    Editing,
    Submitting,
    Succeeded,
    Failed,
}

/// A single field rejection, local or from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The error local required-field checks produce.
    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, REQUIRED_MESSAGE)
    }
}

/// Form state for creating or editing one record.
///
/// The controller holds no reference to any list store: a successful
/// submission returns the response body and the caller decides how to
/// merge it, so a failed submission can never corrupt a collection.
pub struct FormController {
    client: Arc<ApiClient>,
    fields: Map<String, Value>,
    errors: HashMap<String, String>,
    state: DraftState,
}

impl FormController {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            fields: Map::new(),
            errors: HashMap::new(),
            state: DraftState::Empty,
        }
    }

    /// Starts from an existing record's fields, for edit flows.
    pub fn prefilled(client: Arc<ApiClient>, value: Value) -> Self {
        let fields = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let state = if fields.is_empty() {
            DraftState::Empty
        } else {
            DraftState::Editing
        };
        Self {
            client,
            fields,
            errors: HashMap::new(),
            state,
        }
    }

    /// Sets one field and clears that field's error, the keystroke-level
    /// behavior inputs rely on.
    pub fn set_field(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        self.errors.remove(&name);
        self.fields.insert(name, value);
        self.state = DraftState::Editing;
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Local required-field check; never calls the server.
    ///
    /// A field is missing when it is absent, JSON null or an empty
    /// string. Zero and `false` count as present (admission vitals start
    /// at zero).
    #[must_use]
    pub fn validate(&self, required: &[&str]) -> Vec<FieldError> {
        required
            .iter()
            .filter(|name| self.is_blank(name))
            .map(|name| FieldError::required(*name))
            .collect()
    }

    fn is_blank(&self, name: &str) -> bool {
        match self.fields.get(name) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        }
    }

    /// Records field errors and marks the draft failed. Used for local
    /// rejections that should read exactly like server ones.
    pub fn set_field_errors(&mut self, errors: impl IntoIterator<Item = FieldError>) {
        for error in errors {
            self.errors.insert(error.field, error.message);
        }
        self.state = DraftState::Failed;
    }

    /// Submits the draft and returns the decoded response body.
    ///
    /// A validation rejection replaces the per-field error map with the
    /// server's first message per field; any other failure leaves the map
    /// as it was. Merging the response into a collection is the caller's
    /// decision.
    pub async fn submit(&mut self, path: &str, method: SubmitMethod) -> ApiResult<Value> {
        self.state = DraftState::Submitting;
        let body = Value::Object(self.fields.clone());
        debug!("submitting draft to {path}");
        match self.client.submit(method, path, Some(&body)).await {
            Ok(response) => {
                self.errors.clear();
                self.state = DraftState::Succeeded;
                Ok(response)
            }
            Err(error) => {
                if let ApiError::Validation(validation) = &error {
                    self.errors = validation.first_messages();
                }
                self.state = DraftState::Failed;
                Err(error)
            }
        }
    }

    /// Drops the draft and its errors.
    pub fn cancel(&mut self) {
        self.fields.clear();
        self.errors.clear();
        self.state = DraftState::Empty;
    }

    /// Snapshot of the draft as the JSON object `submit` sends.
    #[must_use]
    pub fn draft(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn errors(&self) -> &HashMap<String, String> {
        &self.errors
    }

    #[must_use]
    pub fn state(&self) -> DraftState {
        self.state
    }

    #[must_use]
    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }
}
