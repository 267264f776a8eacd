//! # REST API Interface Layer
//!
//! JSON endpoints under `/api`, one module per resource. Each module exposes
//! a `router()` that `create_router` nests under the resource's path.
//!
//! Handlers log the request, map the DTO onto a domain command, call one
//! service method and map the result back. Errors go through the
//! `IntoResponse` impl in [`error`]: validation failures are 400, unknown ids
//! 404 and store failures 500 with a generic message.

pub mod attendance_apis;
pub mod error;
pub mod mappers;
pub mod section_apis;
pub mod student_apis;
pub mod teacher_apis;

use axum::response::Json;
use shared::HealthResponse;

/// Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
