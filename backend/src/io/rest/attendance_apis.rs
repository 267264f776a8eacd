//! # REST API for Attendance Recording
//!
//! A client opens a session, picks teacher, subject, section and date,
//! toggles rows, then saves. Each response carries the full session view so
//! the client never has to rebuild it.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use tracing::{error, info};

use crate::io::rest::mappers::AttendanceMapper;
use crate::AppState;
use shared::{SelectDateRequest, SelectSectionRequest, SelectSubjectRequest, SelectTeacherRequest};

/// Create a router for attendance related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(open_session))
        .route("/sessions/:id", get(get_session).delete(close_session))
        .route("/sessions/:id/teacher", put(select_teacher))
        .route("/sessions/:id/subject", put(select_subject))
        .route("/sessions/:id/section", put(select_section))
        .route("/sessions/:id/date", put(select_date))
        .route("/sessions/:id/rows/:student_id/toggle", post(toggle_presence))
        .route("/sessions/:id/save", post(save_attendance))
        .route("/snapshots/:date/:section", get(get_snapshot))
}

pub async fn open_session(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/attendance/sessions");

    match state.attendance_service.open_session().await {
        Ok(view) => (
            StatusCode::CREATED,
            Json(AttendanceMapper::to_session_view_dto(view)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to open attendance session: {}", e);
            e.into_response()
        }
    }
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/attendance/sessions/{}", session_id);

    match state.attendance_service.get_session(&session_id).await {
        Ok(view) => Json(AttendanceMapper::to_session_view_dto(view)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn close_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/attendance/sessions/{}", session_id);

    match state.attendance_service.close_session(&session_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn select_teacher(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<SelectTeacherRequest>,
) -> impl IntoResponse {
    info!(
        "PUT /api/attendance/sessions/{}/teacher - request: {:?}",
        session_id, request
    );

    match state
        .attendance_service
        .select_teacher(&session_id, request.teacher_id.as_deref())
        .await
    {
        Ok(view) => Json(AttendanceMapper::to_session_view_dto(view)).into_response(),
        Err(e) => {
            error!("Failed to select teacher: {}", e);
            e.into_response()
        }
    }
}

pub async fn select_subject(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<SelectSubjectRequest>,
) -> impl IntoResponse {
    info!(
        "PUT /api/attendance/sessions/{}/subject - request: {:?}",
        session_id, request
    );

    match state
        .attendance_service
        .select_subject(&session_id, request.subject.as_deref())
        .await
    {
        Ok(view) => Json(AttendanceMapper::to_session_view_dto(view)).into_response(),
        Err(e) => {
            error!("Failed to select subject: {}", e);
            e.into_response()
        }
    }
}

pub async fn select_section(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<SelectSectionRequest>,
) -> impl IntoResponse {
    info!(
        "PUT /api/attendance/sessions/{}/section - request: {:?}",
        session_id, request
    );

    match state
        .attendance_service
        .select_section(&session_id, request.section.as_deref())
        .await
    {
        Ok(view) => Json(AttendanceMapper::to_session_view_dto(view)).into_response(),
        Err(e) => {
            error!("Failed to select section: {}", e);
            e.into_response()
        }
    }
}

pub async fn select_date(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<SelectDateRequest>,
) -> impl IntoResponse {
    info!(
        "PUT /api/attendance/sessions/{}/date - request: {:?}",
        session_id, request
    );

    match state
        .attendance_service
        .select_date(&session_id, request.date.as_deref())
        .await
    {
        Ok(view) => Json(AttendanceMapper::to_session_view_dto(view)).into_response(),
        Err(e) => {
            error!("Failed to select date: {}", e);
            e.into_response()
        }
    }
}

pub async fn toggle_presence(
    State(state): State<AppState>,
    Path((session_id, student_id)): Path<(String, String)>,
) -> impl IntoResponse {
    info!(
        "POST /api/attendance/sessions/{}/rows/{}/toggle",
        session_id, student_id
    );

    match state
        .attendance_service
        .toggle_presence(&session_id, &student_id)
        .await
    {
        Ok(view) => Json(AttendanceMapper::to_session_view_dto(view)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn save_attendance(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/attendance/sessions/{}/save", session_id);

    match state.attendance_service.save(&session_id).await {
        Ok(result) => Json(AttendanceMapper::to_save_response_dto(result)).into_response(),
        Err(e) => {
            error!("Failed to save attendance: {}", e);
            e.into_response()
        }
    }
}

pub async fn get_snapshot(
    State(state): State<AppState>,
    Path((date, section)): Path<(String, String)>,
) -> impl IntoResponse {
    info!("GET /api/attendance/snapshots/{}/{}", date, section);

    match state.attendance_service.lookup_snapshot(&date, &section).await {
        Ok(snapshot) => Json(AttendanceMapper::to_snapshot_dto(snapshot)).into_response(),
        Err(e) => e.into_response(),
    }
}
