//! Attendance repository for database operations

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::{PgPool, Row};

use crate::models::{
    Attendance, NewAttendance, SessionAttendanceEntry, StudentReportEntry, WIRE_TIME_FORMAT,
};
use crate::store::AttendanceStore;

/// Attendance repository, append-only
#[derive(Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    /// Create a new attendance repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceStore for AttendanceRepository {
    async fn append(&self, record: &NewAttendance) -> DatabaseResult<Attendance> {
        // Single-statement insert: the write either lands whole or not at
        // all, so a failure after the session lookup leaves no partial state.
        let row = sqlx::query(
            r#"
            INSERT INTO attendance (student_id, session_id, status, timestamp)
            VALUES ($1, $2, $3, $4)
            RETURNING id, student_id, session_id, status, timestamp
            "#,
        )
        .bind(record.student_id)
        .bind(record.session_id)
        .bind(record.status.as_str())
        .bind(record.timestamp)
        .fetch_one(&self.pool)
        .await?;

        Ok(Attendance {
            id: row.get("id"),
            student_id: row.get("student_id"),
            session_id: row.get("session_id"),
            status: row.get("status"),
            timestamp: row.get("timestamp"),
        })
    }

    async fn by_session(&self, session_id: i64) -> DatabaseResult<Vec<SessionAttendanceEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT student_id, status, timestamp
            FROM attendance
            WHERE session_id = $1
            ORDER BY timestamp
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| SessionAttendanceEntry {
                student_id: row.get("student_id"),
                status: row.get("status"),
                timestamp: row
                    .get::<chrono::NaiveDateTime, _>("timestamp")
                    .format(WIRE_TIME_FORMAT)
                    .to_string(),
            })
            .collect())
    }

    async fn by_student(&self, student_id: i64) -> DatabaseResult<Vec<StudentReportEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT session_id, status, timestamp
            FROM attendance
            WHERE student_id = $1
            ORDER BY timestamp DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| StudentReportEntry {
                session_id: row.get("session_id"),
                status: row.get("status"),
                timestamp: row
                    .get::<chrono::NaiveDateTime, _>("timestamp")
                    .format(WIRE_TIME_FORMAT)
                    .to_string(),
            })
            .collect())
    }
}
