//! Session registry: lifecycle of time- and location-bound attendance windows

use chrono::NaiveDateTime;
use std::sync::Arc;
use tracing::info;

use crate::error::{AttendanceError, AttendanceResult};
use crate::models::{CreateSessionRequest, NewSession, Session, WIRE_TIME_FORMAT};
use crate::store::{RoleProvider, SessionStore};

/// Owns session creation, lookup, and deletion.
///
/// Codes are derived from the creation instant at second resolution. Two
/// sessions created within the same second get the same code; uniqueness of
/// codes is probabilistic only and must not be treated as a security
/// boundary. The assigned id is the durable identity.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<dyn SessionStore>,
    roles: Arc<dyn RoleProvider>,
}

impl SessionRegistry {
    /// Create a new session registry
    pub fn new(sessions: Arc<dyn SessionStore>, roles: Arc<dyn RoleProvider>) -> Self {
        Self { sessions, roles }
    }

    /// Create a session from a wire request.
    ///
    /// `now` is the creation instant and seeds the session code. Validation
    /// reports every missing key at once; the creator must resolve to ADMIN
    /// or TEACHER, otherwise nothing is written.
    pub async fn create_session(
        &self,
        request: &CreateSessionRequest,
        now: NaiveDateTime,
    ) -> AttendanceResult<Session> {
        let mut missing = Vec::new();
        if request.session_name.as_deref().map_or(true, str::is_empty) {
            missing.push("session_name".to_string());
        }
        if request.location_lat.is_none() {
            missing.push("location_lat".to_string());
        }
        if request.location_long.is_none() {
            missing.push("location_long".to_string());
        }
        if request.expiry_time.as_deref().map_or(true, str::is_empty) {
            missing.push("expiry_time".to_string());
        }
        if request.created_by.is_none() {
            missing.push("created_by".to_string());
        }
        if !missing.is_empty() {
            return Err(AttendanceError::Validation(missing));
        }

        let expiry_raw = request.expiry_time.as_deref().unwrap_or_default();
        let expiry_time = NaiveDateTime::parse_from_str(expiry_raw, WIRE_TIME_FORMAT)
            .map_err(|_| AttendanceError::Validation(vec!["expiry_time".to_string()]))?;

        let created_by = request.created_by.unwrap_or_default();
        let role = self.roles.role_of(created_by).await?;
        if !role.is_staff() {
            return Err(AttendanceError::Forbidden(
                "Only ADMIN or TEACHER users can create sessions".to_string(),
            ));
        }

        let new_session = NewSession {
            code: generate_code(now),
            name: request.session_name.clone().unwrap_or_default(),
            location_lat: request.location_lat.unwrap_or_default(),
            location_long: request.location_long.unwrap_or_default(),
            expiry_time,
            created_by,
        };

        let session = self.sessions.insert(&new_session).await?;
        info!(
            "Created session {} ({}) expiring at {}",
            session.id, session.code, session.expiry_time
        );
        Ok(session)
    }

    /// Fetch a session by id; read-only
    pub async fn lookup(&self, session_id: i64) -> AttendanceResult<Option<Session>> {
        Ok(self.sessions.find_by_id(session_id).await?)
    }

    /// List all sessions
    pub async fn list(&self) -> AttendanceResult<Vec<Session>> {
        Ok(self.sessions.list().await?)
    }

    /// Hard-delete a session. Attendance rows referencing it remain; their
    /// session simply becomes unresolvable.
    pub async fn delete(&self, session_id: i64) -> AttendanceResult<bool> {
        let deleted = self.sessions.delete(session_id).await?;
        if deleted {
            info!("Deleted session {}", session_id);
        }
        Ok(deleted)
    }
}

/// Session code deterministic from the creation instant, second resolution
fn generate_code(now: NaiveDateTime) -> String {
    format!("SESSION_{}", now.and_utc().timestamp())
}
