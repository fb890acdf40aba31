//! Attendance service routes

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::{Duration, Local};
use serde_json::json;

use crate::{
    error::AttendanceError,
    models::{
        CheckInRequest, CheckInResponse, CreateSessionRequest, CreateSessionResponse,
        LoginCredentials, NewStudent, NewTeacherRequest, NewUser, QrSessionRequest,
        QrSessionResponse, Role, SessionResponse, StudentLoginRequest, UpdateStudent, UpdateUser,
        WIRE_TIME_FORMAT,
    },
    qr,
    state::AppState,
    store::AttendanceStore,
    validation,
};

/// Create the router for the attendance service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/sessions", post(create_session))
        .route("/sessions", get(get_sessions))
        .route("/sessions/qr", post(create_qr_session))
        .route("/sessions/:id", get(get_session))
        .route("/sessions/:id", delete(delete_session))
        .route("/sessions/:id/attendance", get(session_attendance))
        .route("/attendance", post(check_in))
        .route("/students", post(create_student))
        .route("/students", get(get_students))
        .route("/students/:id", put(update_student))
        .route("/students/:id", delete(delete_student))
        .route("/students/:id/report", get(student_report))
        .route("/students/login", post(student_login))
        .route("/teachers", post(create_teacher))
        .route("/teachers", get(get_teachers))
        .route("/teachers/:id", put(update_teacher))
        .route("/teachers/:id", delete(delete_teacher))
        .route("/admins", post(register_admin))
        .route("/admins/login", post(admin_login))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "attendance-service"
    }))
}

/// Create a new session
pub async fn create_session(
    State(state): State<AppState>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<impl IntoResponse, AttendanceError> {
    let now = Local::now().naive_local();
    let session = state.registry.create_session(&payload, now).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            id: session.id,
            code: session.code,
        }),
    ))
}

/// Create a session and return its check-in payload as a base64 QR image
pub async fn create_qr_session(
    State(state): State<AppState>,
    Json(payload): Json<QrSessionRequest>,
) -> Result<impl IntoResponse, AttendanceError> {
    let now = Local::now().naive_local();
    let expiry_minutes = payload.expiry_minutes.unwrap_or(5);
    let expiry = now + Duration::minutes(expiry_minutes);

    let request = CreateSessionRequest {
        session_name: payload.session_name,
        location_lat: payload.location_lat,
        location_long: payload.location_long,
        expiry_time: Some(expiry.format(WIRE_TIME_FORMAT).to_string()),
        created_by: payload.created_by,
    };

    let session = state.registry.create_session(&request, now).await?;
    let qr_code = qr::encode_session(session.id, session.expiry_time)?;

    Ok((
        StatusCode::CREATED,
        Json(QrSessionResponse {
            qr_code,
            session_id: session.id,
        }),
    ))
}

/// Get all sessions
pub async fn get_sessions(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AttendanceError> {
    let sessions = state.registry.list().await?;
    let response: Vec<SessionResponse> = sessions.into_iter().map(SessionResponse::from).collect();

    Ok(Json(response))
}

/// Get a session by id
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AttendanceError> {
    let session = state
        .registry
        .lookup(id)
        .await?
        .ok_or_else(|| AttendanceError::NotFound("Invalid session".to_string()))?;

    Ok(Json(SessionResponse::from(session)))
}

/// Delete a session by id
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AttendanceError> {
    if state.registry.delete(id).await? {
        Ok(Json(json!({"message": "Session deleted successfully"})))
    } else {
        Err(AttendanceError::NotFound("Invalid session".to_string()))
    }
}

/// Evaluate a check-in attempt
pub async fn check_in(
    State(state): State<AppState>,
    Json(payload): Json<CheckInRequest>,
) -> Result<impl IntoResponse, AttendanceError> {
    validation::validate_coordinates(payload.latitude, payload.longitude)
        .map_err(|msg| AttendanceError::Validation(vec![msg]))?;

    let now = Local::now().naive_local();
    let status = state
        .validator
        .evaluate(
            payload.student_id,
            payload.session_id,
            (payload.latitude, payload.longitude),
            now,
        )
        .await?;

    Ok(Json(CheckInResponse { status }))
}

/// Get the attendance rows recorded for a session
pub async fn session_attendance(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AttendanceError> {
    let records = state.attendance_repository.by_session(id).await?;

    if records.is_empty() {
        return Err(AttendanceError::NotFound(
            "No attendance records found for this session".to_string(),
        ));
    }

    Ok(Json(records))
}

/// Get a student's attendance report, most recent first
pub async fn student_report(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AttendanceError> {
    let records = state.attendance_repository.by_student(id).await?;

    Ok(Json(records))
}

/// Add a student to the roster
pub async fn create_student(
    State(state): State<AppState>,
    Json(payload): Json<NewStudent>,
) -> Result<impl IntoResponse, AttendanceError> {
    let mut invalid = Vec::new();
    if validation::validate_name(&payload.name).is_err() {
        invalid.push("name".to_string());
    }
    if validation::validate_email(&payload.email).is_err() {
        invalid.push("email".to_string());
    }
    if !invalid.is_empty() {
        return Err(AttendanceError::Validation(invalid));
    }

    let student = state.student_repository.create(&payload).await?;

    Ok((StatusCode::CREATED, Json(student)))
}

/// Get all students
pub async fn get_students(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AttendanceError> {
    let students = state.student_repository.get_all().await?;

    Ok(Json(students))
}

/// Update a student
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStudent>,
) -> Result<impl IntoResponse, AttendanceError> {
    if state.student_repository.update(id, &payload).await? {
        Ok(Json(json!({"message": "Student updated successfully"})))
    } else {
        Err(AttendanceError::NotFound("Student not found".to_string()))
    }
}

/// Delete a student
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AttendanceError> {
    if state.student_repository.delete(id).await? {
        Ok(Json(json!({"message": "Student deleted successfully"})))
    } else {
        Err(AttendanceError::NotFound("Student not found".to_string()))
    }
}

/// Student roster login
pub async fn student_login(
    State(state): State<AppState>,
    Json(payload): Json<StudentLoginRequest>,
) -> Result<impl IntoResponse, AttendanceError> {
    let student = state
        .student_repository
        .find_by_id_and_email(payload.id, &payload.email)
        .await?;

    match student {
        Some(_) => Ok(Json(json!({"message": "Login successful"}))),
        None => Err(AttendanceError::Unauthorized),
    }
}

/// Add a teacher; the TEACHER role is implied
pub async fn create_teacher(
    State(state): State<AppState>,
    Json(payload): Json<NewTeacherRequest>,
) -> Result<impl IntoResponse, AttendanceError> {
    let mut invalid = Vec::new();
    if validation::validate_name(&payload.name).is_err() {
        invalid.push("name".to_string());
    }
    if validation::validate_email(&payload.email).is_err() {
        invalid.push("email".to_string());
    }
    if payload.password.is_empty() {
        invalid.push("password".to_string());
    }
    if !invalid.is_empty() {
        return Err(AttendanceError::Validation(invalid));
    }

    let new_user = NewUser {
        name: payload.name,
        email: payload.email,
        password: payload.password,
        role: Role::Teacher,
    };
    let teacher = state.user_repository.create(&new_user).await?;

    Ok((StatusCode::CREATED, Json(teacher)))
}

/// Get all teachers
pub async fn get_teachers(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AttendanceError> {
    let teachers = state.user_repository.get_teachers().await?;

    Ok(Json(teachers))
}

/// Update a teacher
pub async fn update_teacher(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUser>,
) -> Result<impl IntoResponse, AttendanceError> {
    if state.user_repository.update(id, &payload).await? {
        Ok(Json(json!({"message": "Teacher updated successfully"})))
    } else {
        Err(AttendanceError::NotFound("Teacher not found".to_string()))
    }
}

/// Delete a teacher; only rows holding the TEACHER role qualify
pub async fn delete_teacher(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AttendanceError> {
    if state.user_repository.delete_teacher(id).await? {
        Ok(Json(json!({"message": "Teacher deleted successfully"})))
    } else {
        Err(AttendanceError::NotFound("Teacher not found".to_string()))
    }
}

/// Register a staff user with the ADMIN or TEACHER role
pub async fn register_admin(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Result<impl IntoResponse, AttendanceError> {
    let mut invalid = Vec::new();
    if validation::validate_name(&payload.name).is_err() {
        invalid.push("name".to_string());
    }
    if validation::validate_email(&payload.email).is_err() {
        invalid.push("email".to_string());
    }
    if !payload.role.is_staff() {
        invalid.push("role".to_string());
    }
    if !invalid.is_empty() {
        return Err(AttendanceError::Validation(invalid));
    }

    let user = state.user_repository.create(&payload).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Staff login
pub async fn admin_login(
    State(state): State<AppState>,
    Json(payload): Json<LoginCredentials>,
) -> Result<impl IntoResponse, AttendanceError> {
    let user = state
        .user_repository
        .find_by_email(&payload.email)
        .await?
        .ok_or(AttendanceError::Unauthorized)?;

    if state
        .user_repository
        .verify_password(&user, &payload.password)?
    {
        Ok(Json(json!({"message": "Login successful"})))
    } else {
        Err(AttendanceError::Unauthorized)
    }
}
