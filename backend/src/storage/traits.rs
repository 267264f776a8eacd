//! # Storage Traits
//!
//! The document store abstraction the rest of the backend is written against.
//! A store holds named collections; each collection maps an opaque document id
//! to a flat JSON object. Backends only promise read-your-writes for calls made
//! from the same process; nothing spans more than one document atomically.

use async_trait::async_trait;
use serde_json::{Map, Value};

/// Top-level fields of a stored document
pub type Fields = Map<String, Value>;

/// A document together with the id it is addressed by in its collection
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// String value of a top-level field, if present and a string
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document {collection}/{id} not found")]
    NotFound { collection: String, id: String },

    #[error("document {collection}/{id} is malformed: {reason}")]
    Malformed {
        collection: String,
        id: String,
        reason: String,
    },

    #[error("sqlite error: {0}")]
    Sqlite(#[from] sqlx::Error),

    #[error("invalid document body: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Trait defining the document store operations
///
/// Every call is an independent unit of work: it succeeds wholly or fails
/// wholly, and there is no retry at this level.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one document, `None` when the id is unused
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// All documents of a collection, ordered by id
    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>>;

    /// Documents whose top-level `field` equals `value`
    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<Document>> {
        let documents = self.list(collection).await?;
        Ok(filter_by_field(documents, field, value))
    }

    /// Insert a document under a freshly generated id and return that id
    async fn create(&self, collection: &str, fields: Fields) -> StoreResult<String>;

    /// Create-or-replace: whatever was stored under `id` is discarded entirely
    async fn set(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()>;

    /// Merge `fields` into an existing document's top-level fields.
    /// Fails with `NotFound` if nothing is stored under `id`.
    async fn update(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()>;

    /// Remove a document; removing an unused id is not an error
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()>;
}

/// Keep only the documents whose `field` equals `value`
pub fn filter_by_field(documents: Vec<Document>, field: &str, value: &Value) -> Vec<Document> {
    documents
        .into_iter()
        .filter(|doc| doc.fields.get(field) == Some(value))
        .collect()
}

/// Generate an id for a document created without one
pub fn generate_document_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str, value: Value) -> Document {
        match value {
            Value::Object(fields) => Document::new(id, fields),
            _ => panic!("test documents must be objects"),
        }
    }

    #[test]
    fn test_filter_by_field_matches_exact_value() {
        let documents = vec![
            doc("1", json!({"role": "teacher", "name": "Ada"})),
            doc("2", json!({"role": "student", "name": "Bob"})),
            doc("3", json!({"name": "No role"})),
        ];

        let teachers = filter_by_field(documents, "role", &json!("teacher"));
        assert_eq!(teachers.len(), 1);
        assert_eq!(teachers[0].id, "1");
    }

    #[test]
    fn test_filter_by_field_does_not_match_arrays_against_strings() {
        let documents = vec![doc("1", json!({"section": ["A", "B"]}))];
        assert!(filter_by_field(documents, "section", &json!("A")).is_empty());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(generate_document_id(), generate_document_id());
    }
}
