//! Attendance validation engine
//!
//! Turns a (session, reported position, instant) triple into a definitive
//! PRESENT/ABSENT decision and appends the audit row. Expiry is checked
//! before the geofence: a late check-in is absent no matter how close it is.

use chrono::NaiveDateTime;
use std::sync::Arc;
use tracing::info;

use crate::error::{AttendanceError, AttendanceResult};
use crate::geofence;
use crate::models::{AttendanceStatus, NewAttendance, Session};
use crate::store::{AttendanceStore, SessionStore};

/// Decides and records attendance for check-in attempts.
///
/// Each evaluation is an independent, stateless decision over the fetched
/// session snapshot; the engine keeps no memory of prior evaluations, so
/// resubmission appends a new row rather than updating one.
#[derive(Clone)]
pub struct AttendanceValidator {
    sessions: Arc<dyn SessionStore>,
    attendance: Arc<dyn AttendanceStore>,
    allowed_radius_km: f64,
}

impl AttendanceValidator {
    /// Create a new validator with the deployment's geofence radius
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        attendance: Arc<dyn AttendanceStore>,
        allowed_radius_km: f64,
    ) -> Self {
        Self {
            sessions,
            attendance,
            allowed_radius_km,
        }
    }

    /// Evaluate a check-in attempt and persist the outcome.
    ///
    /// `now` is the evaluation instant; it becomes the audit timestamp.
    /// An unknown session fails with `NotFound` and writes nothing. The audit
    /// row is appended before the status is returned; if the append fails the
    /// caller gets the error, never a fabricated status.
    pub async fn evaluate(
        &self,
        student_id: i64,
        session_id: i64,
        position: (f64, f64),
        now: NaiveDateTime,
    ) -> AttendanceResult<AttendanceStatus> {
        let session = self
            .sessions
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| AttendanceError::NotFound("Invalid session".to_string()))?;

        let status = classify(&session, position, now, self.allowed_radius_km);

        self.attendance
            .append(&NewAttendance {
                student_id,
                session_id,
                status,
                timestamp: now,
            })
            .await?;

        info!(
            "Evaluated check-in: student {} session {} -> {}",
            student_id,
            session_id,
            status.as_str()
        );
        Ok(status)
    }
}

/// Pure decision rule for a single check-in.
///
/// Expiry dominates location: strictly after `expiry_time` the geofence is
/// not evaluated at all. At or before expiry the status is PRESENT exactly
/// when the geodesic distance to the session center is within the radius.
pub fn classify(
    session: &Session,
    position: (f64, f64),
    now: NaiveDateTime,
    allowed_radius_km: f64,
) -> AttendanceStatus {
    if now > session.expiry_time {
        return AttendanceStatus::Absent;
    }

    let center = (session.location_lat, session.location_long);
    let distance_km = geofence::distance_km(center, position);
    if distance_km <= allowed_radius_km {
        AttendanceStatus::Present
    } else {
        AttendanceStatus::Absent
    }
}
