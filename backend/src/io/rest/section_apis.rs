//! # REST API for Section Management

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::{error, info};

use crate::io::rest::mappers::SectionMapper;
use crate::AppState;
use shared::{CreateSectionRequest, UpdateSectionRequest};

/// Create a router for section related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sections).post(create_section))
        .route(
            "/:id",
            get(get_section).put(rename_section).delete(delete_section),
        )
}

pub async fn list_sections(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/sections");

    match state.section_service.list_sections().await {
        Ok(sections) => Json(SectionMapper::to_section_list_dto(sections)).into_response(),
        Err(e) => {
            error!("Failed to list sections: {}", e);
            e.into_response()
        }
    }
}

pub async fn create_section(
    State(state): State<AppState>,
    Json(request): Json<CreateSectionRequest>,
) -> impl IntoResponse {
    info!("POST /api/sections - request: {:?}", request);

    match state.section_service.create_section(&request.name).await {
        Ok(section) => (
            StatusCode::CREATED,
            Json(SectionMapper::to_section_response_dto(
                section,
                "Section created successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to create section: {}", e);
            e.into_response()
        }
    }
}

pub async fn get_section(
    State(state): State<AppState>,
    Path(section_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/sections/{}", section_id);

    match state.section_service.get_section(&section_id).await {
        Ok(section) => Json(SectionMapper::to_dto(section)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Rename a section. Accounts keep the old name.
pub async fn rename_section(
    State(state): State<AppState>,
    Path(section_id): Path<String>,
    Json(request): Json<UpdateSectionRequest>,
) -> impl IntoResponse {
    info!("PUT /api/sections/{} - request: {:?}", section_id, request);

    match state
        .section_service
        .rename_section(&section_id, &request.name)
        .await
    {
        Ok(section) => Json(SectionMapper::to_section_response_dto(
            section,
            "Section updated successfully",
        ))
        .into_response(),
        Err(e) => {
            error!("Failed to rename section: {}", e);
            e.into_response()
        }
    }
}

pub async fn delete_section(
    State(state): State<AppState>,
    Path(section_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/sections/{}", section_id);

    match state.section_service.delete_section(&section_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete section: {}", e);
            e.into_response()
        }
    }
}
