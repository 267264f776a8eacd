/// Test utilities shared by the storage and domain test modules.
///
/// `TestHelper` wires every repository onto one in-memory store and offers
/// seeding shortcuts; `CountingStore` wraps a store and counts write calls so
/// tests can assert that an operation wrote nothing.
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use super::memory::MemoryDocumentStore;
use super::repositories::{AccountRepository, AttendanceRepository, SectionRepository};
use super::traits::{Document, DocumentStore, Fields, StoreResult};
use crate::domain::models::{Section, Student, Teacher};

/// Store wrapper that counts `create`/`set`/`update`/`delete` calls
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryDocumentStore,
    writes: AtomicUsize,
    delete_before_update: AtomicBool,
}

impl CountingStore {
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// When on, every `update` first removes its target, as if another
    /// client deleted it between a read and the write
    pub fn delete_before_update(&self, enabled: bool) {
        self.delete_before_update.store(enabled, Ordering::SeqCst);
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for CountingStore {
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        self.inner.get(collection, id).await
    }

    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>> {
        self.inner.list(collection).await
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<Document>> {
        self.inner.find_by_field(collection, field, value).await
    }

    async fn create(&self, collection: &str, fields: Fields) -> StoreResult<String> {
        self.record_write();
        self.inner.create(collection, fields).await
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()> {
        self.record_write();
        self.inner.set(collection, id, fields).await
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()> {
        self.record_write();
        if self.delete_before_update.load(Ordering::SeqCst) {
            self.inner.delete(collection, id).await?;
        }
        self.inner.update(collection, id, fields).await
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        self.record_write();
        self.inner.delete(collection, id).await
    }
}

/// Test helper that provides repository instances over one counting store
pub struct TestHelper {
    pub store: Arc<CountingStore>,
    pub accounts: AccountRepository,
    pub sections: SectionRepository,
    pub attendance: AttendanceRepository,
}

impl TestHelper {
    pub fn new() -> Self {
        let store = Arc::new(CountingStore::default());
        let shared: Arc<dyn DocumentStore> = store.clone();

        Self {
            accounts: AccountRepository::new(shared.clone()),
            sections: SectionRepository::new(shared.clone()),
            attendance: AttendanceRepository::new(shared),
            store,
        }
    }

    pub async fn add_section(&self, name: &str) -> Section {
        self.sections
            .create(name)
            .await
            .expect("Failed to seed section")
    }

    pub async fn add_teacher(&self, name: &str, subjects: &[&str]) -> Teacher {
        self.accounts
            .create_teacher(&Teacher {
                id: String::new(),
                name: name.to_string(),
                sections: Vec::new(),
                subjects: subjects.iter().map(|s| s.to_string()).collect(),
            })
            .await
            .expect("Failed to seed teacher")
    }

    pub async fn add_student(&self, name: &str, section: &str) -> Student {
        self.accounts
            .create_student(&Student {
                id: String::new(),
                name: name.to_string(),
                section: section.to_string(),
            })
            .await
            .expect("Failed to seed student")
    }
}
