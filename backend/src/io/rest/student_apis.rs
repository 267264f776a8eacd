//! # REST API for Student Management

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::{error, info};

use crate::io::rest::mappers::AccountMapper;
use crate::AppState;
use shared::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest};

/// Create a router for student related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_students).post(create_student))
        .route(
            "/:id",
            get(get_student).put(update_student).delete(delete_student),
        )
}

/// List students, optionally only those of one section (`?section=A`)
pub async fn list_students(
    State(state): State<AppState>,
    Query(query): Query<StudentListQuery>,
) -> impl IntoResponse {
    info!("GET /api/students - query: {:?}", query);

    match state.student_service.list_students(query.section.as_deref()).await {
        Ok(students) => Json(AccountMapper::to_student_list_dto(students)).into_response(),
        Err(e) => {
            error!("Failed to list students: {}", e);
            e.into_response()
        }
    }
}

pub async fn create_student(
    State(state): State<AppState>,
    Json(request): Json<CreateStudentRequest>,
) -> impl IntoResponse {
    info!("POST /api/students - request: {:?}", request);

    let command = AccountMapper::to_create_student_command(request);
    match state.student_service.create_student(command).await {
        Ok(student) => (
            StatusCode::CREATED,
            Json(AccountMapper::to_student_response_dto(
                student,
                "Student created successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to create student: {}", e);
            e.into_response()
        }
    }
}

pub async fn get_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/students/{}", student_id);

    match state.student_service.get_student(&student_id).await {
        Ok(student) => Json(AccountMapper::to_student_dto(student)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    Json(request): Json<UpdateStudentRequest>,
) -> impl IntoResponse {
    info!("PUT /api/students/{} - request: {:?}", student_id, request);

    let command = AccountMapper::to_update_student_command(request);
    match state.student_service.update_student(&student_id, command).await {
        Ok(student) => Json(AccountMapper::to_student_response_dto(
            student,
            "Student updated successfully",
        ))
        .into_response(),
        Err(e) => {
            error!("Failed to update student: {}", e);
            e.into_response()
        }
    }
}

pub async fn delete_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/students/{}", student_id);

    match state.student_service.delete_student(&student_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete student: {}", e);
            e.into_response()
        }
    }
}
