//! # REST API for Teacher Management

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::{error, info};

use crate::io::rest::mappers::AccountMapper;
use crate::AppState;
use shared::{CreateTeacherRequest, UpdateTeacherRequest};

/// Create a router for teacher related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_teachers).post(create_teacher))
        .route(
            "/:id",
            get(get_teacher).put(update_teacher).delete(delete_teacher),
        )
}

pub async fn list_teachers(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/teachers");

    match state.teacher_service.list_teachers().await {
        Ok(teachers) => Json(AccountMapper::to_teacher_list_dto(teachers)).into_response(),
        Err(e) => {
            error!("Failed to list teachers: {}", e);
            e.into_response()
        }
    }
}

pub async fn create_teacher(
    State(state): State<AppState>,
    Json(request): Json<CreateTeacherRequest>,
) -> impl IntoResponse {
    info!("POST /api/teachers - request: {:?}", request);

    let command = AccountMapper::to_create_teacher_command(request);
    match state.teacher_service.create_teacher(command).await {
        Ok(teacher) => (
            StatusCode::CREATED,
            Json(AccountMapper::to_teacher_response_dto(
                teacher,
                "Teacher created successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to create teacher: {}", e);
            e.into_response()
        }
    }
}

pub async fn get_teacher(
    State(state): State<AppState>,
    Path(teacher_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/teachers/{}", teacher_id);

    match state.teacher_service.get_teacher(&teacher_id).await {
        Ok(teacher) => Json(AccountMapper::to_teacher_dto(teacher)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_teacher(
    State(state): State<AppState>,
    Path(teacher_id): Path<String>,
    Json(request): Json<UpdateTeacherRequest>,
) -> impl IntoResponse {
    info!("PUT /api/teachers/{} - request: {:?}", teacher_id, request);

    let command = AccountMapper::to_update_teacher_command(request);
    match state.teacher_service.update_teacher(&teacher_id, command).await {
        Ok(teacher) => Json(AccountMapper::to_teacher_response_dto(
            teacher,
            "Teacher updated successfully",
        ))
        .into_response(),
        Err(e) => {
            error!("Failed to update teacher: {}", e);
            e.into_response()
        }
    }
}

pub async fn delete_teacher(
    State(state): State<AppState>,
    Path(teacher_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/teachers/{}", teacher_id);

    match state.teacher_service.delete_teacher(&teacher_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete teacher: {}", e);
            e.into_response()
        }
    }
}
