//! # Attendance Backend
//!
//! Records class attendance over a document store and exposes it as a JSON
//! API.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (axum handlers, DTO mappers)
//!     ↓
//! Domain Layer (services, attendance sessions)
//!     ↓
//! Storage Layer (repositories over a DocumentStore)
//! ```
//!
//! [`initialize_backend`] builds every service on the configured store and
//! [`create_router`] wires them into the HTTP router.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{AppConfig, StoreBackend};
use crate::domain::{
    AttendanceComposer, AttendanceService, SectionService, StudentService, TeacherService,
};
use crate::io::rest;
use crate::storage::{
    AccountRepository, AttendanceRepository, DocumentStore, MemoryDocumentStore,
    SectionRepository, SqliteDocumentStore,
};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub teacher_service: TeacherService,
    pub student_service: StudentService,
    pub section_service: SectionService,
    pub attendance_service: AttendanceService,
    pub cors_origin: String,
}

impl AppState {
    /// Build every service on top of one shared store
    pub fn new(
        store: Arc<dyn DocumentStore>,
        cors_origin: impl Into<String>,
        session_ttl: Duration,
    ) -> Self {
        let accounts = AccountRepository::new(store.clone());
        let sections = SectionRepository::new(store.clone());
        let attendance = AttendanceRepository::new(store);

        let composer = AttendanceComposer::new(accounts.clone(), sections.clone(), attendance);

        Self {
            teacher_service: TeacherService::new(accounts.clone()),
            student_service: StudentService::new(accounts),
            section_service: SectionService::new(sections),
            attendance_service: AttendanceService::new(composer, session_ttl),
            cors_origin: cors_origin.into(),
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    let store: Arc<dyn DocumentStore> = match config.store {
        StoreBackend::Memory => {
            info!("Setting up in-memory document store");
            Arc::new(MemoryDocumentStore::new())
        }
        StoreBackend::Sqlite => {
            info!("Setting up SQLite document store");
            let store = SqliteDocumentStore::new(&config.database_url)
                .await
                .with_context(|| format!("Failed to open database {}", config.database_url))?;
            Arc::new(store)
        }
    };

    info!("Setting up application state");
    Ok(AppState::new(
        store,
        config.cors_origin.clone(),
        config.session_ttl(),
    ))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Result<Router> {
    let origin = app_state
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin '{}'", app_state.cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .nest("/teachers", rest::teacher_apis::router())
        .nest("/students", rest::student_apis::router())
        .nest("/sections", rest::section_apis::router())
        .nest("/attendance", rest::attendance_apis::router());

    Ok(Router::new()
        .route("/health", get(rest::health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state))
}
