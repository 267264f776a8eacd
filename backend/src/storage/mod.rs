//! # Storage Module
//!
//! Everything the backend persists goes through the [`DocumentStore`] trait:
//! named collections of JSON documents addressed by id. The repositories in
//! [`repositories`] translate between those documents and the domain models,
//! so the domain never sees raw JSON.
//!
//! ## Backends
//!
//! - [`MemoryDocumentStore`]: process-local, used by tests and the `memory`
//!   store setting
//! - [`SqliteDocumentStore`]: one JSON body per (collection, id) row via sqlx
//!
//! ## Collections
//!
//! - `users`: teachers and students, distinguished by `role`
//! - `sections`: class groupings
//! - `attendance`: one snapshot per (date, section), keyed `date-{date}_{section}`

pub mod memory;
pub mod repositories;
pub mod sqlite;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use memory::MemoryDocumentStore;
pub use repositories::{AccountRepository, AttendanceRepository, SectionRepository};
pub use sqlite::SqliteDocumentStore;
pub use traits::{Document, DocumentStore, Fields, StoreError, StoreResult};

/// Collection names
pub mod collections {
    pub const USERS: &str = "users";
    pub const SECTIONS: &str = "sections";
    pub const ATTENDANCE: &str = "attendance";
}
