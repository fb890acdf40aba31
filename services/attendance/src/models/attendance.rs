//! Attendance model and related payloads

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::session::wire_time;

/// Outcome of a check-in evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    /// Database representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
        }
    }

    /// Parse the database representation back into a status
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "present" => Some(AttendanceStatus::Present),
            "absent" => Some(AttendanceStatus::Absent),
            _ => None,
        }
    }
}

/// Attendance entity, one row per check-in attempt
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Attendance {
    pub id: i64,
    pub student_id: i64,
    pub session_id: i64,
    pub status: String,
    #[serde(with = "wire_time")]
    pub timestamp: NaiveDateTime,
}

/// New attendance payload, assembled by the validator only
#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub student_id: i64,
    pub session_id: i64,
    pub status: AttendanceStatus,
    /// Evaluation instant assigned by the validator, never client-supplied
    pub timestamp: NaiveDateTime,
}

/// Request for a check-in attempt
#[derive(Debug, Clone, Deserialize)]
pub struct CheckInRequest {
    pub student_id: i64,
    pub session_id: i64,
    pub latitude: f64,
    pub longitude: f64,
}

/// Response for a check-in attempt
#[derive(Debug, Serialize)]
pub struct CheckInResponse {
    pub status: AttendanceStatus,
}

/// Per-session attendance listing entry
#[derive(Debug, Serialize)]
pub struct SessionAttendanceEntry {
    pub student_id: i64,
    pub status: String,
    pub timestamp: String,
}

/// Per-student report entry, most recent first
#[derive(Debug, Serialize)]
pub struct StudentReportEntry {
    pub session_id: i64,
    pub status: String,
    pub timestamp: String,
}
