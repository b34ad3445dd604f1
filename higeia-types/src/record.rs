//! Record identity and payload types.
//!
//! The backend assigns every row an `id` that is an integer or a string
//! depending on the table. Everything else in a row is carried as raw JSON
//! so one store implementation serves every entity.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Server-assigned record identity.
///
/// Integer and string ids never compare equal, even when they render the
/// same. The backend is consistent per table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordId {
    Int(i64),
    Str(String),
}

impl RecordId {
    /// Extracts an id from a raw JSON value, if it holds one.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Self::Int),
            Value::String(s) => Some(Self::Str(s.clone())),
            _ => None,
        }
    }

    /// Returns the id as the JSON value the server sent.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Int(n) => Value::from(*n),
            Self::Str(s) => Value::from(s.clone()),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::Str(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).ok_or_else(|| D::Error::custom("expected an integer or string id"))
    }
}

/// One row from the backend: an id plus everything else the row carried.
///
/// Fields are arbitrary JSON whose structure is defined per entity by the
/// server. Accessors use JSON pointers so nested relations (`/animal/name`)
/// read the same as flat fields (`/name`).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: RecordId,
    fields: Map<String, Value>,
}

impl Record {
    /// Builds a record from parts. An `id` key inside `fields` is dropped;
    /// identity lives outside the field map.
    #[must_use]
    pub fn new(id: impl Into<RecordId>, mut fields: Map<String, Value>) -> Self {
        fields.remove("id");
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Builds a record from a raw response value.
    ///
    /// The value must be a JSON object carrying a usable `id`; anything
    /// else is rejected so callers can drop malformed rows explicitly.
    pub fn from_value(value: Value) -> crate::Result<Self> {
        let Value::Object(mut map) = value else {
            return Err(crate::Error::NotAnObject);
        };
        let id = map
            .get("id")
            .and_then(RecordId::from_value)
            .ok_or(crate::Error::MissingId)?;
        map.remove("id");
        Ok(Self { id, fields: map })
    }

    #[must_use]
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Returns a top-level field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Looks up a value by JSON pointer into the fields (e.g. `/animal/name`).
    /// The id is not addressable this way.
    #[must_use]
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        let rest = pointer.strip_prefix('/')?;
        match rest.split_once('/') {
            Some((head, tail)) => self
                .fields
                .get(head)
                .and_then(|v| v.pointer(&format!("/{tail}"))),
            None => self.fields.get(rest),
        }
    }

    /// Extract a string value using a JSON pointer (e.g., "/name").
    #[must_use]
    pub fn get_str(&self, pointer: &str) -> Option<&str> {
        self.pointer(pointer).and_then(|v| v.as_str())
    }

    /// Extract a boolean value using a JSON pointer.
    #[must_use]
    pub fn get_bool(&self, pointer: &str) -> Option<bool> {
        self.pointer(pointer).and_then(|v| v.as_bool())
    }

    /// Extract a numeric value using a JSON pointer.
    #[must_use]
    pub fn get_number(&self, pointer: &str) -> Option<f64> {
        self.pointer(pointer).and_then(|v| v.as_f64())
    }

    /// Sets a top-level field. Identity is immutable; setting `id` is a no-op.
    pub fn set(&mut self, name: &str, value: Value) {
        if name == "id" {
            return;
        }
        self.fields.insert(name.to_string(), value);
    }

    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The record as the flat JSON object the server sent.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map = Map::with_capacity(self.fields.len() + 1);
        map.insert("id".to_string(), self.id.to_value());
        for (name, value) in &self.fields {
            map.insert(name.clone(), value.clone());
        }
        Value::Object(map)
    }

    /// Consuming variant of [`to_value`](Self::to_value).
    #[must_use]
    pub fn into_value(self) -> Value {
        let mut map = self.fields;
        map.insert("id".to_string(), self.id.to_value());
        Value::Object(map)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(D::Error::custom)
    }
}
