/// Document store abstraction
///
/// The lending domain persists everything through this port. A document is a
/// flat map of named `FieldValue`s plus a store-assigned id and a version
/// stamp that is bumped on every write; `update_if_version` uses the stamp as
/// an optimistic concurrency token.
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    fn rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Bool(_) => 1,
            FieldValue::Integer(_) => 2,
            FieldValue::Text(_) => 3,
            FieldValue::Timestamp(_) => 4,
        }
    }

    /// Total order used by `list_ordered`. Values of different kinds order by kind.
    pub fn sort_cmp(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

pub type Fields = BTreeMap<String, FieldValue>;

/// Builds a `Fields` map from `key => value` pairs.
#[macro_export]
macro_rules! fields {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut map = $crate::shared::infrastructure::document_store::Fields::new();
        $(map.insert($key.to_string(), $crate::shared::infrastructure::document_store::FieldValue::from($value));)*
        map
    }};
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub version: u64,
    pub fields: Fields,
}

impl Document {
    fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name).filter(|v| **v != FieldValue::Null)
    }

    fn type_error(&self, name: &str, expected: &str) -> AppError {
        AppError::SerializationError(format!(
            "Document {} field '{}' is missing or not {}",
            self.id, name, expected
        ))
    }

    pub fn text(&self, name: &str) -> AppResult<String> {
        self.optional_text(name)?
            .ok_or_else(|| self.type_error(name, "text"))
    }

    pub fn optional_text(&self, name: &str) -> AppResult<Option<String>> {
        match self.field(name) {
            None => Ok(None),
            Some(FieldValue::Text(value)) => Ok(Some(value.clone())),
            Some(_) => Err(self.type_error(name, "text")),
        }
    }

    /// Missing integers read as zero, matching documents written before the field existed.
    pub fn integer_or_zero(&self, name: &str) -> AppResult<i64> {
        match self.field(name) {
            None => Ok(0),
            Some(FieldValue::Integer(value)) => Ok(*value),
            Some(_) => Err(self.type_error(name, "an integer")),
        }
    }

    pub fn timestamp(&self, name: &str) -> AppResult<DateTime<Utc>> {
        self.optional_timestamp(name)?
            .ok_or_else(|| self.type_error(name, "a timestamp"))
    }

    pub fn optional_timestamp(&self, name: &str) -> AppResult<Option<DateTime<Utc>>> {
        match self.field(name) {
            None => Ok(None),
            Some(FieldValue::Timestamp(value)) => Ok(Some(*value)),
            Some(_) => Err(self.type_error(name, "a timestamp")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document and return its generated id
    async fn insert_one(&self, collection: &str, fields: Fields) -> AppResult<Uuid>;

    /// All documents in the store's natural scan order
    async fn list_all(&self, collection: &str) -> AppResult<Vec<Document>>;

    /// All documents ordered by one field
    async fn list_ordered(
        &self,
        collection: &str,
        field: &str,
        direction: SortDirection,
    ) -> AppResult<Vec<Document>>;

    async fn get_by_id(&self, collection: &str, id: Uuid) -> AppResult<Option<Document>>;

    /// Merge `fields` into an existing document. Missing id is `NotFound`.
    async fn update_fields(&self, collection: &str, id: Uuid, fields: Fields) -> AppResult<()>;

    /// Merge `fields` only if the document is still at `expected_version`.
    /// Returns `false` when another writer got there first.
    async fn update_if_version(
        &self,
        collection: &str,
        id: Uuid,
        expected_version: u64,
        fields: Fields,
    ) -> AppResult<bool>;

    async fn delete_by_id(&self, collection: &str, id: Uuid) -> AppResult<()>;

    /// Atomically add `delta` to an integer field and return the new value
    async fn increment(&self, collection: &str, id: Uuid, field: &str, delta: i64)
        -> AppResult<i64>;

    /// Cheap round trip used to test connectivity
    async fn ping(&self) -> AppResult<()>;
}
