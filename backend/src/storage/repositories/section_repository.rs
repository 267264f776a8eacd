use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

use crate::domain::models::Section;
use crate::storage::collections::SECTIONS;
use crate::storage::traits::{Document, DocumentStore, Fields, StoreError, StoreResult};

/// Repository for the `sections` collection (`{ "name": "A" }`)
#[derive(Clone)]
pub struct SectionRepository {
    store: Arc<dyn DocumentStore>,
}

impl SectionRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// All sections, ordered by name
    pub async fn list(&self) -> StoreResult<Vec<Section>> {
        let documents = self.store.list(SECTIONS).await?;

        let mut sections: Vec<Section> = documents
            .into_iter()
            .filter_map(|doc| match Self::from_document(doc) {
                Ok(section) => Some(section),
                Err(e) => {
                    warn!("Skipping unreadable section document: {}", e);
                    None
                }
            })
            .collect();

        sections.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(sections)
    }

    pub async fn get(&self, id: &str) -> StoreResult<Option<Section>> {
        match self.store.get(SECTIONS, id).await? {
            Some(doc) => Ok(Some(Self::from_document(doc)?)),
            None => Ok(None),
        }
    }

    pub async fn create(&self, name: &str) -> StoreResult<Section> {
        let id = self.store.create(SECTIONS, Self::to_fields(name)).await?;
        Ok(Section {
            id,
            name: name.to_string(),
        })
    }

    pub async fn rename(&self, id: &str, name: &str) -> StoreResult<()> {
        self.store.update(SECTIONS, id, Self::to_fields(name)).await
    }

    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        self.store.delete(SECTIONS, id).await
    }

    fn from_document(doc: Document) -> StoreResult<Section> {
        let name = doc
            .str_field("name")
            .map(str::to_string)
            .ok_or_else(|| StoreError::Malformed {
                collection: SECTIONS.to_string(),
                id: doc.id.clone(),
                reason: "missing string field 'name'".to_string(),
            })?;

        Ok(Section { id: doc.id, name })
    }

    fn to_fields(name: &str) -> Fields {
        match json!({ "name": name }) {
            Value::Object(fields) => fields,
            _ => Fields::new(),
        }
    }
}
