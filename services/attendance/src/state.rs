//! Application state shared across handlers

use std::sync::Arc;

use crate::registry::SessionRegistry;
use crate::repositories::{AttendanceRepository, StudentRepository, UserRepository};
use crate::validator::AttendanceValidator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: SessionRegistry,
    pub validator: AttendanceValidator,
    pub attendance_repository: Arc<AttendanceRepository>,
    pub student_repository: StudentRepository,
    pub user_repository: UserRepository,
}
