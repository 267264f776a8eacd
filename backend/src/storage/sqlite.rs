//! # SQLite Document Store
//!
//! Persists documents as JSON bodies in a single table:
//!
//! ```sql
//! CREATE TABLE documents (
//!     collection TEXT NOT NULL,
//!     id         TEXT NOT NULL,
//!     body       TEXT NOT NULL,
//!     PRIMARY KEY (collection, id)
//! );
//! ```
//!
//! `set` maps onto `INSERT OR REPLACE`, which gives the create-or-replace
//! semantics attendance snapshots rely on.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::str::FromStr;
use tracing::{debug, info};

use super::traits::{
    filter_by_field, generate_document_id, Document, DocumentStore, Fields, StoreError, StoreResult,
};

#[derive(Clone)]
pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

impl SqliteDocumentStore {
    /// Open (creating if missing) the database at `url`, e.g. `sqlite:attendance.db`
    pub async fn new(url: &str) -> StoreResult<Self> {
        info!("Opening SQLite document store at {}", url);
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        Self::setup_schema(&pool).await?;
        Ok(Self { pool })
    }

    /// A private in-memory database.
    ///
    /// Pinned to one connection that never expires, otherwise the pool could
    /// drop the connection and the data with it.
    pub async fn in_memory() -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Self::setup_schema(&pool).await?;
        Ok(Self { pool })
    }

    async fn setup_schema(pool: &SqlitePool) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                body TEXT NOT NULL,
                PRIMARY KEY (collection, id)
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Close every pooled connection; later calls fail with a store error
    pub async fn close(&self) {
        self.pool.close().await;
    }

    fn decode(id: String, body: &str) -> StoreResult<Document> {
        let fields: Fields = serde_json::from_str(body)?;
        Ok(Document::new(id, fields))
    }

    fn decode_rows(rows: Vec<sqlx::sqlite::SqliteRow>) -> StoreResult<Vec<Document>> {
        rows.into_iter()
            .map(|row| {
                let id: String = row.get("id");
                let body: String = row.get("body");
                Self::decode(id, &body)
            })
            .collect()
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let row = sqlx::query("SELECT body FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(r) => {
                let body: String = r.get("body");
                Ok(Some(Self::decode(id.to_string(), &body)?))
            }
            None => Ok(None),
        }
    }

    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let rows = sqlx::query("SELECT id, body FROM documents WHERE collection = ? ORDER BY id")
            .bind(collection)
            .fetch_all(&self.pool)
            .await?;

        Self::decode_rows(rows)
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<Document>> {
        // Only string equality is pushed down to SQLite; other values are
        // filtered in process.
        let documents = match value {
            Value::String(expected) => {
                let rows = sqlx::query(
                    r#"
                    SELECT id, body FROM documents
                    WHERE collection = ? AND json_extract(body, ?) = ?
                    ORDER BY id
                    "#,
                )
                .bind(collection)
                .bind(format!("$.{}", field))
                .bind(expected)
                .fetch_all(&self.pool)
                .await?;
                Self::decode_rows(rows)?
            }
            _ => self.list(collection).await?,
        };

        Ok(filter_by_field(documents, field, value))
    }

    async fn create(&self, collection: &str, fields: Fields) -> StoreResult<String> {
        let id = generate_document_id();
        let body = serde_json::to_string(&fields)?;

        sqlx::query("INSERT INTO documents (collection, id, body) VALUES (?, ?, ?)")
            .bind(collection)
            .bind(&id)
            .bind(body)
            .execute(&self.pool)
            .await?;

        debug!("Created {}/{}", collection, id);
        Ok(id)
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()> {
        let body = serde_json::to_string(&fields)?;

        sqlx::query("INSERT OR REPLACE INTO documents (collection, id, body) VALUES (?, ?, ?)")
            .bind(collection)
            .bind(id)
            .bind(body)
            .execute(&self.pool)
            .await?;

        debug!("Set {}/{}", collection, id);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT body FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        let body: String = row.get("body");
        let mut merged: Fields = serde_json::from_str(&body)?;
        merged.extend(fields);

        sqlx::query("UPDATE documents SET body = ? WHERE collection = ? AND id = ?")
            .bind(serde_json::to_string(&merged)?)
            .bind(collection)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        debug!("Updated {}/{}", collection, id);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!("Deleted {}/{}", collection, id);
        Ok(())
    }
}
