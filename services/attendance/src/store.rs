//! Collaborator seams for the attendance engine
//!
//! The registry and the validator never touch the database directly; they
//! talk to these traits. Production wires in the sqlx repositories, tests
//! wire in the in-memory doubles below.

use async_trait::async_trait;
use common::error::DatabaseResult;

use crate::models::{
    Attendance, NewAttendance, NewSession, Role, Session, SessionAttendanceEntry,
    StudentReportEntry,
};

/// Session persistence seam
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a new session and return it with the assigned id
    async fn insert(&self, new_session: &NewSession) -> DatabaseResult<Session>;

    /// Fetch a session by id
    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Session>>;

    /// List all sessions
    async fn list(&self) -> DatabaseResult<Vec<Session>>;

    /// Hard-delete a session; historical attendance rows are left in place
    async fn delete(&self, id: i64) -> DatabaseResult<bool>;
}

/// Attendance persistence seam, append-only
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Append exactly one row for a check-in attempt (single atomic insert)
    async fn append(&self, record: &NewAttendance) -> DatabaseResult<Attendance>;

    /// Attendance rows for a session, oldest first
    async fn by_session(&self, session_id: i64) -> DatabaseResult<Vec<SessionAttendanceEntry>>;

    /// Attendance rows for a student, most recent first
    async fn by_student(&self, student_id: i64) -> DatabaseResult<Vec<StudentReportEntry>>;
}

/// Authorization seam: resolve an actor id to a role
#[async_trait]
pub trait RoleProvider: Send + Sync {
    async fn role_of(&self, user_id: i64) -> DatabaseResult<Role>;
}

#[cfg(test)]
pub mod testing {
    //! In-memory doubles for the store seams

    use super::*;
    use crate::models::WIRE_TIME_FORMAT;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory session store backed by a vector
    pub struct InMemorySessionStore {
        sessions: Mutex<Vec<Session>>,
        next_id: Mutex<i64>,
    }

    impl InMemorySessionStore {
        pub fn new() -> Self {
            Self {
                sessions: Mutex::new(Vec::new()),
                next_id: Mutex::new(1),
            }
        }

        pub fn with_sessions(sessions: Vec<Session>) -> Self {
            let next = sessions.iter().map(|s| s.id).max().unwrap_or(0) + 1;
            Self {
                sessions: Mutex::new(sessions),
                next_id: Mutex::new(next),
            }
        }

        pub fn count(&self) -> usize {
            self.sessions.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl SessionStore for InMemorySessionStore {
        async fn insert(&self, new_session: &NewSession) -> DatabaseResult<Session> {
            let mut next_id = self.next_id.lock().unwrap();
            let session = Session {
                id: *next_id,
                code: new_session.code.clone(),
                name: new_session.name.clone(),
                location_lat: new_session.location_lat,
                location_long: new_session.location_long,
                expiry_time: new_session.expiry_time,
                created_by: new_session.created_by,
            };
            *next_id += 1;
            self.sessions.lock().unwrap().push(session.clone());
            Ok(session)
        }

        async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Session>> {
            Ok(self
                .sessions
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.id == id)
                .cloned())
        }

        async fn list(&self) -> DatabaseResult<Vec<Session>> {
            Ok(self.sessions.lock().unwrap().clone())
        }

        async fn delete(&self, id: i64) -> DatabaseResult<bool> {
            let mut sessions = self.sessions.lock().unwrap();
            let before = sessions.len();
            sessions.retain(|s| s.id != id);
            Ok(sessions.len() != before)
        }
    }

    /// In-memory append-only attendance store
    #[derive(Default)]
    pub struct InMemoryAttendanceStore {
        rows: Mutex<Vec<Attendance>>,
    }

    impl InMemoryAttendanceStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn rows(&self) -> Vec<Attendance> {
            self.rows.lock().unwrap().clone()
        }

        pub fn count(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl AttendanceStore for InMemoryAttendanceStore {
        async fn append(&self, record: &NewAttendance) -> DatabaseResult<Attendance> {
            let mut rows = self.rows.lock().unwrap();
            let row = Attendance {
                id: rows.len() as i64 + 1,
                student_id: record.student_id,
                session_id: record.session_id,
                status: record.status.as_str().to_string(),
                timestamp: record.timestamp,
            };
            rows.push(row.clone());
            Ok(row)
        }

        async fn by_session(&self, session_id: i64) -> DatabaseResult<Vec<SessionAttendanceEntry>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.session_id == session_id)
                .map(|r| SessionAttendanceEntry {
                    student_id: r.student_id,
                    status: r.status.clone(),
                    timestamp: r.timestamp.format(WIRE_TIME_FORMAT).to_string(),
                })
                .collect())
        }

        async fn by_student(&self, student_id: i64) -> DatabaseResult<Vec<StudentReportEntry>> {
            let mut rows: Vec<_> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.student_id == student_id)
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            Ok(rows
                .into_iter()
                .map(|r| StudentReportEntry {
                    session_id: r.session_id,
                    status: r.status,
                    timestamp: r.timestamp.format(WIRE_TIME_FORMAT).to_string(),
                })
                .collect())
        }
    }

    /// Attendance store that starts refusing appends after a set number of
    /// successes, for exercising the store-failure path
    pub struct FailingAttendanceStore {
        rows: Mutex<Vec<Attendance>>,
        remaining_successes: Mutex<usize>,
    }

    impl FailingAttendanceStore {
        pub fn failing_immediately() -> Self {
            Self::after_successes(0)
        }

        pub fn after_successes(successes: usize) -> Self {
            Self {
                rows: Mutex::new(Vec::new()),
                remaining_successes: Mutex::new(successes),
            }
        }

        pub fn rows(&self) -> Vec<Attendance> {
            self.rows.lock().unwrap().clone()
        }

        pub fn count(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl AttendanceStore for FailingAttendanceStore {
        async fn append(&self, record: &NewAttendance) -> DatabaseResult<Attendance> {
            let mut remaining = self.remaining_successes.lock().unwrap();
            if *remaining == 0 {
                return Err(common::error::DatabaseError::Query(
                    sqlx::Error::PoolClosed,
                ));
            }
            *remaining -= 1;

            let mut rows = self.rows.lock().unwrap();
            let row = Attendance {
                id: rows.len() as i64 + 1,
                student_id: record.student_id,
                session_id: record.session_id,
                status: record.status.as_str().to_string(),
                timestamp: record.timestamp,
            };
            rows.push(row.clone());
            Ok(row)
        }

        async fn by_session(&self, session_id: i64) -> DatabaseResult<Vec<SessionAttendanceEntry>> {
            let _ = session_id;
            Ok(Vec::new())
        }

        async fn by_student(&self, student_id: i64) -> DatabaseResult<Vec<StudentReportEntry>> {
            let _ = student_id;
            Ok(Vec::new())
        }
    }

    /// Fixed role table for authorization tests
    #[derive(Default)]
    pub struct FixedRoles {
        roles: HashMap<i64, Role>,
    }

    impl FixedRoles {
        pub fn new(entries: &[(i64, Role)]) -> Self {
            Self {
                roles: entries.iter().copied().collect(),
            }
        }
    }

    #[async_trait]
    impl RoleProvider for FixedRoles {
        async fn role_of(&self, user_id: i64) -> DatabaseResult<Role> {
            Ok(self.roles.get(&user_id).copied().unwrap_or(Role::None))
        }
    }

    /// Convenience constructor for a session used across engine tests
    pub fn campus_session(id: i64, expiry: chrono::NaiveDateTime) -> Session {
        Session {
            id,
            code: format!("SESSION_{}", 1_748_770_200 + id),
            name: "Campus lecture".to_string(),
            location_lat: 20.2961,
            location_long: 85.8245,
            expiry_time: expiry,
            created_by: 1,
        }
    }
}
